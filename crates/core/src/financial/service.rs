//! Financial aggregation service.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use properly_shared::types::money::{percent_of, sum_amounts};
use properly_shared::types::period::MONTH_LABELS;
use properly_shared::types::{OwnerId, PropertyId};
use rust_decimal::Decimal;

use super::types::{
    BreakdownItem, FinancialOverview, FinancialSummary, MonthlyBucket, MonthlySeries,
    ProfitAndLoss, PropertyFinancials, StatementAccount, StatementLine, Transaction,
    TransactionCategory, TransactionScope, TransactionType,
};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::property::Property;
use crate::snapshot::PortfolioSnapshot;

/// Service for income and expense aggregation.
pub struct FinancialService;

impl FinancialService {
    /// Computes revenue, expenses, NOI and profit margin.
    #[must_use]
    pub fn summarize<'a, I>(transactions: I) -> FinancialSummary
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;

        for transaction in transactions {
            match transaction.category {
                TransactionCategory::Income => total_revenue += transaction.amount,
                TransactionCategory::Expense => total_expenses += transaction.amount,
            }
        }

        let noi = total_revenue - total_expenses;

        FinancialSummary {
            total_revenue,
            total_expenses,
            noi,
            profit_margin: percent_of(noi, total_revenue),
        }
    }

    /// Sums one category by transaction type.
    ///
    /// Sorted by amount descending, ties by label.
    #[must_use]
    pub fn breakdown<'a, I>(transactions: I, category: TransactionCategory) -> Vec<BreakdownItem>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals: BTreeMap<TransactionType, Decimal> = BTreeMap::new();
        for transaction in transactions {
            if transaction.category == category {
                *totals.entry(transaction.transaction_type).or_default() += transaction.amount;
            }
        }

        let mut items: Vec<BreakdownItem> = totals
            .into_iter()
            .map(|(transaction_type, amount)| BreakdownItem {
                transaction_type,
                label: transaction_type.label().to_string(),
                amount,
                color: transaction_type.chart_color(category).to_string(),
            })
            .collect();

        items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.label.cmp(&b.label)));
        items
    }

    /// Buckets income and expenses by month for `year`.
    ///
    /// Transactions dated in other years are ignored.
    #[must_use]
    pub fn monthly_series<'a, I>(transactions: I, year: i32) -> MonthlySeries
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut months: Vec<MonthlyBucket> = MONTH_LABELS
            .iter()
            .map(|label| MonthlyBucket {
                month: (*label).to_string(),
                ..MonthlyBucket::default()
            })
            .collect();

        for transaction in transactions {
            if transaction.date.year() != year {
                continue;
            }
            let bucket = &mut months[transaction.date.month0() as usize];
            match transaction.category {
                TransactionCategory::Income => bucket.income += transaction.amount,
                TransactionCategory::Expense => bucket.expenses += transaction.amount,
            }
        }

        MonthlySeries { year, months }
    }

    /// Revenue, expenses and NOI for each of `properties`.
    ///
    /// Sorted by NOI descending, ties by name. Transactions for other
    /// properties are ignored.
    #[must_use]
    pub fn property_financials<'a, I>(
        transactions: I,
        properties: &[&Property],
    ) -> Vec<PropertyFinancials>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals: HashMap<PropertyId, (Decimal, Decimal)> = properties
            .iter()
            .map(|p| (p.id, (Decimal::ZERO, Decimal::ZERO)))
            .collect();

        for transaction in transactions {
            if let Some((revenue, expenses)) = totals.get_mut(&transaction.property_id) {
                match transaction.category {
                    TransactionCategory::Income => *revenue += transaction.amount,
                    TransactionCategory::Expense => *expenses += transaction.amount,
                }
            }
        }

        let mut rows: Vec<PropertyFinancials> = properties
            .iter()
            .map(|property| {
                let (revenue, expenses) = totals
                    .get(&property.id)
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                PropertyFinancials {
                    property_id: property.id,
                    property_name: property.name.clone(),
                    revenue,
                    expenses,
                    noi: revenue - expenses,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.noi
                .cmp(&a.noi)
                .then_with(|| a.property_name.cmp(&b.property_name))
        });
        rows
    }

    /// Builds the profit and loss statement.
    ///
    /// Lines are listed in account order; accounts with no activity are left
    /// out.
    #[must_use]
    pub fn profit_and_loss<'a, I>(transactions: I) -> ProfitAndLoss
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut accounts: BTreeMap<StatementAccount, (TransactionCategory, Decimal)> =
            BTreeMap::new();
        for transaction in transactions {
            let account = transaction.transaction_type.account(transaction.category);
            accounts
                .entry(account)
                .or_insert((transaction.category, Decimal::ZERO))
                .1 += transaction.amount;
        }

        let mut statement = ProfitAndLoss::default();
        for (account, (category, amount)) in accounts {
            if amount.is_zero() {
                continue;
            }
            let line = StatementLine {
                account,
                name: account.name().to_string(),
                amount,
            };
            match category {
                TransactionCategory::Income => statement.income_lines.push(line),
                TransactionCategory::Expense => statement.expense_lines.push(line),
            }
        }

        statement.total_income = sum_amounts(statement.income_lines.iter().map(|l| l.amount));
        statement.total_expenses = sum_amounts(statement.expense_lines.iter().map(|l| l.amount));
        statement.noi = statement.total_income - statement.total_expenses;
        statement
    }

    /// Selects the snapshot transactions in `scope`.
    ///
    /// Transactions whose property is not in the snapshot are skipped and
    /// counted.
    #[must_use]
    pub fn scoped<'a>(
        snapshot: &'a PortfolioSnapshot,
        scope: &TransactionScope,
    ) -> (Vec<&'a Transaction>, Diagnostics) {
        let known: HashSet<PropertyId> = snapshot.properties.iter().map(|p| p.id).collect();
        let mut diagnostics = Diagnostics::new();

        let selected = snapshot
            .transactions
            .iter()
            .filter(|transaction| {
                if known.contains(&transaction.property_id) {
                    true
                } else {
                    tracing::debug!(
                        transaction_id = %transaction.id,
                        property_id = %transaction.property_id,
                        "skipping transaction for unknown property"
                    );
                    diagnostics.record_skip(SkipReason::TransactionUnknownProperty);
                    false
                }
            })
            .filter(|transaction| scope.matches(transaction))
            .collect();

        (selected, diagnostics)
    }

    /// Builds the owner financial overview for one year.
    #[must_use]
    pub fn overview(snapshot: &PortfolioSnapshot, owner_id: OwnerId, year: i32) -> FinancialOverview {
        let scope = TransactionScope::for_owner(owner_id).within_year(year);
        let (transactions, diagnostics) = Self::scoped(snapshot, &scope);

        let properties: Vec<&Property> = snapshot
            .properties
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .collect();

        if diagnostics.total_skipped() > 0 {
            tracing::warn!(
                owner_id = %owner_id,
                skipped = diagnostics.total_skipped(),
                "financial overview skipped records"
            );
        }

        FinancialOverview {
            owner_id,
            year,
            summary: Self::summarize(transactions.iter().copied()),
            monthly: Self::monthly_series(transactions.iter().copied(), year),
            income_breakdown: Self::breakdown(
                transactions.iter().copied(),
                TransactionCategory::Income,
            ),
            expense_breakdown: Self::breakdown(
                transactions.iter().copied(),
                TransactionCategory::Expense,
            ),
            properties: Self::property_financials(transactions.iter().copied(), &properties),
            diagnostics,
        }
    }
}
