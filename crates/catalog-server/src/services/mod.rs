//! Business logic services

pub mod catalog;
pub mod diagnostics;
pub mod inquiry;

pub use catalog::{CatalogService, ProductQuery};
pub use diagnostics::{Diagnostics, DiagnosticsReport};
pub use inquiry::{InquiryIntake, PersistOutcome};
