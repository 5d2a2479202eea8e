//! Report filters.

use std::fmt;

use chrono::NaiveDate;
use properly_shared::types::OwnerId;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Property selector value meaning "no restriction".
pub const ALL_PROPERTIES: &str = "All Properties";

/// Property restriction by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyScope {
    /// Every property.
    #[default]
    All,
    /// One property, matched by exact name.
    Named(String),
}

impl PropertyScope {
    /// Scope for one property.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// Returns true if a record of `property_name` is in scope.
    #[must_use]
    pub fn matches(&self, property_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == property_name,
        }
    }

    /// Returns true for the unrestricted scope.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<String> for PropertyScope {
    fn from(name: String) -> Self {
        if name.is_empty() || name == ALL_PROPERTIES {
            Self::All
        } else {
            Self::Named(name)
        }
    }
}

impl From<&str> for PropertyScope {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<PropertyScope> for String {
    fn from(scope: PropertyScope) -> Self {
        match scope {
            PropertyScope::All => ALL_PROPERTIES.to_string(),
            PropertyScope::Named(name) => name,
        }
    }
}

impl fmt::Display for PropertyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_PROPERTIES),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Filter shared by all reports.
///
/// Date bounds are inclusive and only apply to reports whose records carry
/// a date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// Earliest date.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Latest date.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Property restriction.
    #[serde(default)]
    pub property: PropertyScope,
    /// Owner restriction.
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
}

impl ReportFilter {
    /// Rejects a range whose start is after its end.
    pub fn validate(&self) -> Result<(), ReportError> {
        match (self.date_from, self.date_to) {
            (Some(start), Some(end)) if start > end => {
                Err(ReportError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Returns true if either date bound is set.
    #[must_use]
    pub fn has_date_bounds(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Returns true if `date` lies within the bounds.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("All Properties", PropertyScope::All)]
    #[case("", PropertyScope::All)]
    #[case("Oak Grove", PropertyScope::Named("Oak Grove".to_string()))]
    fn test_scope_from_name(#[case] name: &str, #[case] expected: PropertyScope) {
        assert_eq!(PropertyScope::from(name), expected);
    }

    #[test]
    fn test_named_scope_is_exact_match() {
        let scope = PropertyScope::named("Oak Grove");

        assert!(scope.matches("Oak Grove"));
        assert!(!scope.matches("oak grove"));
        assert!(PropertyScope::All.matches("anything"));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let filter = ReportFilter {
            date_from: Some(date(2024, 3, 31)),
            date_to: Some(date(2024, 3, 1)),
            ..ReportFilter::default()
        };

        assert!(matches!(
            filter.validate(),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filter = ReportFilter {
            date_from: Some(date(2024, 3, 1)),
            date_to: Some(date(2024, 3, 31)),
            ..ReportFilter::default()
        };

        assert!(filter.validate().is_ok());
        assert!(filter.contains_date(date(2024, 3, 1)));
        assert!(filter.contains_date(date(2024, 3, 31)));
        assert!(!filter.contains_date(date(2024, 4, 1)));
        assert!(ReportFilter::default().contains_date(date(1999, 1, 1)));
    }
}
