// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tollgate Core
//!
//! Domain models and the pure engines behind the Tollgate console.
//!
//! Nothing in this crate performs I/O. Records, settings and the session are
//! passed in as snapshots; results are recomputed on every call.
//!
//! ## Key Types
//!
//! ### Navigation
//! - [`HeaderNavModules`] - Operator switches for header entries
//! - [`NavLink`] - One header entry, possibly with children
//! - [`build_nav_links`] - Template filtered by switches and role
//! - [`resolve_target_path`] - Destination after the login gate
//!
//! ### Pricing
//! - [`ModelRecord`] - A priced model
//! - [`FilterState`] - The five filters plus search
//! - [`apply_filters`] - Filtered list in original order
//! - [`compute_facets`] - Option lists with per-option counts
//! - [`PricingViewState`] - Filters plus display preferences
//!
//! ### Tables & Content
//! - [`TokenRecord`] - An API token
//! - [`RowSelection`] - Selection that survives paging
//! - [`HomeContent`] - Operator home page content

pub mod error;
pub mod models;
pub mod nav;
pub mod pricing;
pub mod selection;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Navigation
    HeaderNavModules,
    NavLink,
    NavModule,
    NavTarget,
    PricingModule,
    Session,
    SessionUser,
    // Pricing
    ALL,
    Currency,
    FilterState,
    FilterValue,
    ModelRecord,
    PricingCatalog,
    PricingGroups,
    PricingViewState,
    QuotaType,
    TokenUnit,
    UNKNOWN_VENDOR,
    VendorChoice,
    ViewMode,
    normalize_tags,
    // Tokens & content
    HomeContent,
    TokenRecord,
    TokenStatus,
};

// Re-export engines
pub use nav::{
    ADMIN_ROLE_THRESHOLD, LOGIN_PATH, NavContext, ResolvedNavLink, build_nav_links, resolve_nav,
    resolve_target_path,
};
pub use pricing::{Dimension, FacetOption, PricingFacets, apply_filters, compute_facets};
pub use selection::{Identified, PageSelectionState, RowSelection};

// Re-export traits
pub use traits::{FnTranslator, PassthroughTranslator, Translator};
