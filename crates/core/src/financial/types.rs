//! Financial types.

use chrono::NaiveDate;
use properly_shared::types::{OwnerId, PropertyId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

/// Kind of income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Rent.
    Rent,
    /// Late fee.
    #[serde(rename = "Late Fee")]
    LateFee,
    /// Parking.
    Parking,
    /// Maintenance and repairs.
    Maintenance,
    /// Property taxes.
    Taxes,
    /// Utilities.
    Utilities,
    /// Insurance premiums.
    Insurance,
    /// Property management fee.
    #[serde(rename = "Management Fee")]
    ManagementFee,
    /// Anything else, including labels not listed above.
    #[serde(other)]
    Other,
}

const INCOME_FALLBACK_COLOR: &str = "#6b7280";
const EXPENSE_FALLBACK_COLOR: &str = "#d1d5db";

impl TransactionType {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::LateFee => "Late Fee",
            Self::Parking => "Parking",
            Self::Maintenance => "Maintenance",
            Self::Taxes => "Taxes",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::ManagementFee => "Management Fee",
            Self::Other => "Other",
        }
    }

    /// Chart colour of this type within a category palette.
    ///
    /// Types outside a palette get the palette's grey.
    #[must_use]
    pub const fn chart_color(self, category: TransactionCategory) -> &'static str {
        match category {
            TransactionCategory::Income => match self {
                Self::Rent => "#10b981",
                Self::LateFee => "#3b82f6",
                Self::Parking => "#8b5cf6",
                Self::Other => "#f59e0b",
                _ => INCOME_FALLBACK_COLOR,
            },
            TransactionCategory::Expense => match self {
                Self::Maintenance => "#ef4444",
                Self::Taxes => "#f97316",
                Self::Utilities => "#f59e0b",
                Self::ManagementFee => "#6b7280",
                Self::Insurance => "#3b82f6",
                Self::Other => "#8b5cf6",
                _ => EXPENSE_FALLBACK_COLOR,
            },
        }
    }

    /// Chart-of-accounts line this type posts to.
    #[must_use]
    pub const fn account(self, category: TransactionCategory) -> StatementAccount {
        match category {
            TransactionCategory::Income => match self {
                Self::Rent => StatementAccount::RentalIncome,
                Self::LateFee => StatementAccount::LateFeeIncome,
                Self::Parking => StatementAccount::ParkingIncome,
                _ => StatementAccount::OtherIncome,
            },
            TransactionCategory::Expense => match self {
                Self::Maintenance => StatementAccount::RepairsAndMaintenance,
                Self::Utilities => StatementAccount::Utilities,
                Self::Taxes => StatementAccount::PropertyTaxes,
                Self::Insurance => StatementAccount::Insurance,
                Self::ManagementFee => StatementAccount::ManagementFees,
                _ => StatementAccount::MiscellaneousExpense,
            },
        }
    }
}

/// Profit and loss line, in statement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementAccount {
    /// Rent received.
    RentalIncome,
    /// Late fees received.
    LateFeeIncome,
    /// Parking fees received.
    ParkingIncome,
    /// Any other income.
    OtherIncome,
    /// Maintenance spend.
    RepairsAndMaintenance,
    /// Utility bills.
    Utilities,
    /// Property taxes.
    PropertyTaxes,
    /// Insurance premiums.
    Insurance,
    /// Management fees.
    ManagementFees,
    /// Any other expense.
    MiscellaneousExpense,
}

impl StatementAccount {
    /// Account name as printed on the statement.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RentalIncome => "Rental Income",
            Self::LateFeeIncome => "Late Fee Income",
            Self::ParkingIncome => "Parking Income",
            Self::OtherIncome => "Other Income",
            Self::RepairsAndMaintenance => "Repairs & Maintenance",
            Self::Utilities => "Utilities",
            Self::PropertyTaxes => "Property Taxes",
            Self::Insurance => "Insurance",
            Self::ManagementFees => "Management Fees",
            Self::MiscellaneousExpense => "Miscellaneous Expense",
        }
    }
}

/// A ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Booking date.
    pub date: NaiveDate,
    /// Property the transaction belongs to.
    pub property_id: PropertyId,
    /// Owner of the property.
    pub owner_id: OwnerId,
    /// Income or expense.
    pub category: TransactionCategory,
    /// Kind of income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount, always positive.
    pub amount: Decimal,
}

impl Transaction {
    /// Returns true for income.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.category == TransactionCategory::Income
    }
}

/// Which transactions an aggregation covers.
///
/// Date bounds are inclusive. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionScope {
    /// Earliest booking date.
    pub date_from: Option<NaiveDate>,
    /// Latest booking date.
    pub date_to: Option<NaiveDate>,
    /// Single property.
    pub property_id: Option<PropertyId>,
    /// Single owner.
    pub owner_id: Option<OwnerId>,
}

impl TransactionScope {
    /// Scope covering everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope covering one owner.
    #[must_use]
    pub fn for_owner(owner_id: OwnerId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    /// Restricts to one calendar year.
    #[must_use]
    pub fn within_year(mut self, year: i32) -> Self {
        self.date_from = NaiveDate::from_ymd_opt(year, 1, 1);
        self.date_to = NaiveDate::from_ymd_opt(year, 12, 31);
        self
    }

    /// Returns true if `transaction` falls in this scope.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.date_from.is_none_or(|from| transaction.date >= from)
            && self.date_to.is_none_or(|to| transaction.date <= to)
            && self.property_id.is_none_or(|id| transaction.property_id == id)
            && self.owner_id.is_none_or(|id| transaction.owner_id == id)
    }
}

/// Headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Sum of income.
    pub total_revenue: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// Net operating income, revenue minus expenses.
    pub noi: Decimal,
    /// NOI as a percentage of revenue, 0 without revenue.
    pub profit_margin: Decimal,
}

/// One slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownItem {
    /// Transaction type.
    pub transaction_type: TransactionType,
    /// Type label.
    pub label: String,
    /// Summed amount.
    pub amount: Decimal,
    /// Chart colour.
    pub color: String,
}

/// Income and expense for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// "Jan" through "Dec".
    pub month: String,
    /// Income booked in the month.
    pub income: Decimal,
    /// Expenses booked in the month.
    pub expenses: Decimal,
}

/// Twelve monthly buckets for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    /// Calendar year.
    pub year: i32,
    /// January through December, zero-filled.
    pub months: Vec<MonthlyBucket>,
}

/// Revenue, expenses and NOI of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFinancials {
    /// Property.
    pub property_id: PropertyId,
    /// Property name.
    pub property_name: String,
    /// Income.
    pub revenue: Decimal,
    /// Expenses.
    pub expenses: Decimal,
    /// Revenue minus expenses.
    pub noi: Decimal,
}

/// One line of the profit and loss statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    /// Account.
    pub account: StatementAccount,
    /// Account name.
    pub name: String,
    /// Summed amount.
    pub amount: Decimal,
}

/// Profit and loss statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    /// Non-zero income lines in account order.
    pub income_lines: Vec<StatementLine>,
    /// Total income.
    pub total_income: Decimal,
    /// Non-zero expense lines in account order.
    pub expense_lines: Vec<StatementLine>,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Net operating income.
    pub noi: Decimal,
}

/// Everything the owner financial overview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    /// Owner.
    pub owner_id: OwnerId,
    /// Year covered.
    pub year: i32,
    /// Headline figures for the year.
    pub summary: FinancialSummary,
    /// Month-by-month income and expenses.
    pub monthly: MonthlySeries,
    /// Income by type.
    pub income_breakdown: Vec<BreakdownItem>,
    /// Expenses by type.
    pub expense_breakdown: Vec<BreakdownItem>,
    /// Per-property results, best NOI first.
    pub properties: Vec<PropertyFinancials>,
    /// Records left out.
    pub diagnostics: Diagnostics,
}
