//! Row selection for paged tables.
//!
//! Selection survives paging: rows picked on one page stay picked while
//! another page is shown, and page-level toggles touch only the rows on the
//! visible page.

use std::collections::BTreeSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::models::TokenRecord;

/// A row with a stable identity.
pub trait Identified {
    /// Identity type.
    type Id: Clone + Ord + Hash;

    /// Returns the row's identity.
    fn id(&self) -> Self::Id;
}

impl Identified for TokenRecord {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// How much of the visible page is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSelectionState {
    /// No row on the page is selected (or the page is empty).
    None,
    /// Some but not all rows are selected.
    Partial,
    /// Every row on the page is selected.
    All,
}

/// Selected row ids, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelection<Id: Ord> {
    selected: BTreeSet<Id>,
}

impl<Id: Ord> Default for RowSelection<Id> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<Id: Clone + Ord> RowSelection<Id> {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected rows across all pages.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterates selected ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }

    /// Flips one row. Returns whether it is selected afterwards.
    pub fn toggle_row<R>(&mut self, row: &R) -> bool
    where
        R: Identified<Id = Id>,
    {
        let id = row.id();
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Selects every row on the page, or clears them if all were selected.
    ///
    /// Rows on other pages are never touched.
    pub fn toggle_page<R>(&mut self, page: &[R])
    where
        R: Identified<Id = Id>,
    {
        if self.page_state(page) == PageSelectionState::All {
            for row in page {
                self.selected.remove(&row.id());
            }
        } else {
            self.selected.extend(page.iter().map(Identified::id));
        }
    }

    /// Counts selected rows on the page.
    pub fn count_on_page<R>(&self, page: &[R]) -> usize
    where
        R: Identified<Id = Id>,
    {
        page.iter()
            .filter(|row| self.selected.contains(&row.id()))
            .count()
    }

    /// Returns the header checkbox state for the page.
    pub fn page_state<R>(&self, page: &[R]) -> PageSelectionState
    where
        R: Identified<Id = Id>,
    {
        let selected = self.count_on_page(page);
        if selected == 0 {
            PageSelectionState::None
        } else if selected == page.len() {
            PageSelectionState::All
        } else {
            PageSelectionState::Partial
        }
    }

    /// Clears the whole selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl<Id: Clone + Ord> FromIterator<Id> for RowSelection<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
