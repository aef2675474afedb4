//! Pricing filter engine.
//!
//! ## Submodules
//!
//! - [`filter`] - Record predicates and the filtered result list
//! - [`facets`] - Per-dimension option lists with match counts
//! - [`collate`] - Stable display ordering for option values
//!
//! Everything here is pure and synchronous. Callers pass a snapshot of the
//! records and selections and get fresh results back.

mod collate;
mod facets;
mod filter;

pub use collate::{display_cmp, sorted_unique};
pub use facets::{FacetOption, PricingFacets, compute_facets};
pub use filter::{Dimension, apply_filters, filter_except, has_tag, matches_dimension};
