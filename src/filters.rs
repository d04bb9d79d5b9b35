//! Domain filters carried alongside pagination arguments

use async_graphql::InputObject;

use crate::store::Node;
use crate::types::Date;

/// Inclusive calendar-day range
#[derive(InputObject, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl DateRange {
    pub fn new(start_date: Option<Date>, end_date: Option<Date>) -> Self {
        Self { start_date, end_date }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Check whether a day falls inside the range, both ends inclusive
    pub fn contains(&self, day: Date) -> bool {
        self.start_date.map_or(true, |start| day >= start)
            && self.end_date.map_or(true, |end| day <= end)
    }
}

/// Filters passed through to the store and the loader's node predicate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub date_range: DateRange,
    pub search: Option<String>,
}

impl Filters {
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Node predicate for date-filtered connections
///
/// A node without a timestamp only passes an unbounded range.
pub fn within_date_range<N: Node>(node: &N, filters: &Filters) -> bool {
    if filters.date_range.is_unbounded() {
        return true;
    }
    node.timestamp()
        .map(|ts| filters.date_range.contains(Date(ts.date_naive())))
        .unwrap_or(false)
}

/// Node predicate for searchable connections
///
/// Case-insensitive substring match on [`Node::search_text`]. A blank search
/// matches everything; otherwise a node without text never matches.
pub fn within_search<N: Node>(node: &N, filters: &Filters) -> bool {
    let search = filters.search.as_deref().unwrap_or_default().trim();
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    node.search_text()
        .map(|text| text.to_lowercase().contains(&needle))
        .unwrap_or(false)
}
