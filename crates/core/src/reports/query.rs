//! Generic filter and projection over report records.

use chrono::NaiveDate;
use properly_shared::types::OwnerId;

use super::filter::ReportFilter;
use super::types::Cell;

type DateFn<'a, R> = Box<dyn Fn(&R) -> Option<NaiveDate> + 'a>;
type PropertyFn<'a, R> = Box<dyn Fn(&'a R) -> Option<&'a str> + 'a>;
type OwnerFn<'a, R> = Box<dyn Fn(&R) -> Option<OwnerId> + 'a>;
type Predicate<'a, R> = Box<dyn Fn(&R) -> bool + 'a>;

/// Applies a [`ReportFilter`] to records of type `R`.
///
/// Each filter dimension only applies once the query knows how to read it
/// from a record. A record with no date is excluded only when a date bound is
/// set; likewise for property and owner. Records are borrowed for the life of
/// the query so property names may come from the record or from an index.
pub struct ReportQuery<'a, R: 'a> {
    filter: &'a ReportFilter,
    date_of: Option<DateFn<'a, R>>,
    property_of: Option<PropertyFn<'a, R>>,
    owner_of: Option<OwnerFn<'a, R>>,
    predicates: Vec<Predicate<'a, R>>,
}

impl<'a, R: 'a> ReportQuery<'a, R> {
    /// Starts a query under `filter`.
    #[must_use]
    pub fn new(filter: &'a ReportFilter) -> Self {
        Self {
            filter,
            date_of: None,
            property_of: None,
            owner_of: None,
            predicates: Vec::new(),
        }
    }

    /// Applies the date bounds to the date read by `date_of`.
    #[must_use]
    pub fn dated<F>(mut self, date_of: F) -> Self
    where
        F: Fn(&R) -> Option<NaiveDate> + 'a,
    {
        self.date_of = Some(Box::new(date_of));
        self
    }

    /// Applies the property scope to the name read by `property_of`.
    #[must_use]
    pub fn property<F>(mut self, property_of: F) -> Self
    where
        F: Fn(&'a R) -> Option<&'a str> + 'a,
    {
        self.property_of = Some(Box::new(property_of));
        self
    }

    /// Applies the owner restriction to the owner read by `owner_of`.
    #[must_use]
    pub fn owner<F>(mut self, owner_of: F) -> Self
    where
        F: Fn(&R) -> Option<OwnerId> + 'a,
    {
        self.owner_of = Some(Box::new(owner_of));
        self
    }

    /// Adds a report-specific predicate.
    #[must_use]
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Returns true if `record` passes every applicable condition.
    #[must_use]
    pub fn matches(&self, record: &'a R) -> bool {
        if let Some(date_of) = &self.date_of
            && self.filter.has_date_bounds()
        {
            match date_of(record) {
                Some(date) if self.filter.contains_date(date) => {}
                _ => return false,
            }
        }

        if let Some(property_of) = &self.property_of
            && !self.filter.property.is_all()
        {
            match property_of(record) {
                Some(name) if self.filter.property.matches(name) => {}
                _ => return false,
            }
        }

        if let (Some(owner_of), Some(owner_id)) = (&self.owner_of, self.filter.owner_id)
            && owner_of(record) != Some(owner_id)
        {
            return false;
        }

        self.predicates.iter().all(|predicate| predicate(record))
    }

    /// Records passing the query, in input order.
    #[must_use]
    pub fn select<I>(&self, records: I) -> Vec<&'a R>
    where
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().filter(|&r| self.matches(r)).collect()
    }

    /// Projects the records passing the query into table rows.
    #[must_use]
    pub fn project<I, F>(&self, records: I, row: F) -> Vec<Vec<Cell>>
    where
        I: IntoIterator<Item = &'a R>,
        F: Fn(&R) -> Vec<Cell>,
    {
        records
            .into_iter()
            .filter(|&r| self.matches(r))
            .map(row)
            .collect()
    }
}
