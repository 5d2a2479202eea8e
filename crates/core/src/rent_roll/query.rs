//! Filtering, search and sorting of rent roll rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{RentRollItem, RentStatus};
use crate::reports::PropertyScope;

/// Column to sort the rent roll by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentRollSortKey {
    /// Tenant name.
    Tenant,
    /// Property name.
    Property,
    /// Unit name.
    Unit,
    /// Monthly rent.
    Rent,
    /// Outstanding balance.
    Balance,
    /// Due date.
    #[default]
    DueDate,
    /// Status label.
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// View over rent roll rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentRollQuery {
    /// Property to show.
    pub property: PropertyScope,
    /// Status to show, all when unset.
    pub status: Option<RentStatus>,
    /// Case-insensitive text matched against tenant, property and unit names.
    pub search: Option<String>,
    /// Sort column.
    pub sort_key: RentRollSortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

impl RentRollQuery {
    /// Query showing every row by due date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one property.
    #[must_use]
    pub fn property(mut self, property: PropertyScope) -> Self {
        self.property = property;
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn status(mut self, status: RentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to rows matching `text`.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn sort_by(mut self, key: RentRollSortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.direction = direction;
        self
    }

    /// Returns true if `item` passes the filters.
    #[must_use]
    pub fn matches(&self, item: &RentRollItem) -> bool {
        if !self.property.matches(&item.property_name) {
            return false;
        }
        if self.status.is_some_and(|status| item.status != status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [&item.tenant_name, &item.property_name, &item.unit_name]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    /// Filters and sorts `items`. The sort is stable.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [RentRollItem]) -> Vec<&'a RentRollItem> {
        let mut rows: Vec<&RentRollItem> = items.iter().filter(|i| self.matches(i)).collect();
        rows.sort_by(|a, b| {
            let ordering = Self::compare(self.sort_key, a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    fn compare(key: RentRollSortKey, a: &RentRollItem, b: &RentRollItem) -> Ordering {
        match key {
            RentRollSortKey::Tenant => a.tenant_name.cmp(&b.tenant_name),
            RentRollSortKey::Property => a.property_name.cmp(&b.property_name),
            RentRollSortKey::Unit => a.unit_name.cmp(&b.unit_name),
            RentRollSortKey::Rent => a.rent.cmp(&b.rent),
            RentRollSortKey::Balance => a.balance.cmp(&b.balance),
            RentRollSortKey::DueDate => a.due_date.cmp(&b.due_date),
            RentRollSortKey::Status => a.status.label().cmp(b.status.label()),
        }
    }
}
