//! Domain models for Tollgate.
//!
//! ## Submodules
//!
//! - [`modules`] - Header navigation module visibility
//! - [`nav`] - Navigation entries and session state
//! - [`pricing`] - Priced model records and group configuration
//! - [`filters`] - Pricing filter selections and view state
//! - [`token`] - API token records
//! - [`content`] - Operator-provided page content

mod content;
mod filters;
mod modules;
mod nav;
mod pricing;
mod token;

pub use content::HomeContent;
pub use filters::{
    ALL, Currency, FilterState, FilterValue, PricingViewState, TokenUnit, UNKNOWN_VENDOR,
    VendorChoice, ViewMode,
};
pub use modules::{HeaderNavModules, NavModule, PricingModule};
pub use nav::{NavLink, NavTarget, Session, SessionUser};
pub use pricing::{ModelRecord, PricingCatalog, PricingGroups, QuotaType, normalize_tags};
pub use token::{TokenRecord, TokenStatus};
