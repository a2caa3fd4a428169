//! Client-side search and status filtering.
//!
//! The visible rows of every list are a pure function of
//! (collection, query, status); nothing here touches the network.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::error::AppError;

/// A small fixed set of statuses a list can be narrowed to
pub trait StatusFilter:
    Copy + Default + PartialEq + Debug + Display + FromStr<Err = AppError> + Send + Sync + 'static
{
    /// Every status, `All` first
    const VARIANTS: &'static [Self];
}

/// Search text, kept both as typed and case-folded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Needle {
    raw: String,
    folded: String,
}

impl Needle {
    pub fn new(query: &str) -> Self {
        Self {
            raw: query.to_string(),
            folded: query.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Case-insensitive containment for free-text fields
    pub fn in_text(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.folded)
    }

    /// Exact containment for identifier-like fields (ISBN, national ID, phone)
    pub fn in_identifier(&self, field: &str) -> bool {
        field.contains(&self.raw)
    }
}

/// Rows that can be searched and narrowed by status
pub trait Filterable {
    type Status: StatusFilter;

    fn matches_query(&self, needle: &Needle) -> bool;

    fn matches_status(&self, status: Self::Status) -> bool;

    /// Display order of the filtered rows. Must be stable.
    fn order(_rows: &mut Vec<&Self>) {}
}

/// Rows of `items` matching both the query and the status, in display order
pub fn filter_view<'a, T: Filterable>(items: &'a [T], needle: &Needle, status: T::Status) -> Vec<&'a T> {
    let mut rows: Vec<&T> = items
        .iter()
        .filter(|item| item.matches_query(needle) && item.matches_status(status))
        .collect();
    T::order(&mut rows);
    rows
}

/// Count of the whole collection per status (ignores the search text)
pub fn status_counts<T: Filterable>(items: &[T]) -> Vec<(T::Status, usize)> {
    T::Status::VARIANTS
        .iter()
        .map(|status| {
            let count = items.iter().filter(|item| item.matches_status(*status)).count();
            (*status, count)
        })
        .collect()
}

/// Status for lists that have no status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnyStatus {
    #[default]
    All,
}

impl StatusFilter for AnyStatus {
    const VARIANTS: &'static [Self] = &[AnyStatus::All];
}

impl Display for AnyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("all")
    }
}

impl FromStr for AnyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(AnyStatus::All),
            other => Err(AppError::Validation(format!("This list has no status filter '{}'", other))),
        }
    }
}
