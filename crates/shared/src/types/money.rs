//! Decimal money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the system is a `rust_decimal::Decimal`.

use rust_decimal::Decimal;

/// Number of decimal places money amounts are stored and displayed with.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to cents.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// Sums amounts exactly.
#[must_use]
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().sum()
}

/// Returns `part / whole * 100` rounded to two places.
///
/// A zero or negative `whole` yields zero instead of dividing by it.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(MONEY_SCALE)
}

/// Percentage of two counts, zero when `whole` is zero.
#[must_use]
pub fn percent_of_counts(part: usize, whole: usize) -> Decimal {
    percent_of(Decimal::from(part), Decimal::from(whole))
}

/// Formats an amount as US dollars with thousands separators.
///
/// Negative amounts use accounting parentheses: `($1,250.00)`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_money(amount.abs());
    let text = format!("{rounded:.2}");
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount.is_sign_negative() && !rounded.is_zero() {
        format!("(${grouped}.{cents})")
    } else {
        format!("${grouped}.{cents}")
    }
}
