//! Catalog & session state core for the Hi-Tech Homes property
//! platform.
//!
//! The crate holds the client-side state that the marketing site and
//! admin back office render from: the authoritative in-memory property
//! collection ([`repository::PropertyRepository`]), derived filtered
//! views over it ([`query`]), the admin enquiry list
//! ([`repository::EnquiryRepository`]), and the authenticated session
//! ([`session::SessionStore`]). The remote service is reached only
//! through the [`api::EstateApi`] seam.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod session;

#[cfg(test)]
mod testutil;

pub use api::{EstateApi, HttpEstateApi};
pub use config::AppConfig;
pub use error::{ApiError, LoginError, StoreError};
pub use models::{Enquiry, EnquiryStatus, Property, PropertyType};
pub use query::{FilterSpec, PriceBand, FEATURED_LIMIT};
pub use repository::{EnquiryRepository, PropertyRepository};
pub use session::{FileTokenStore, MemoryTokenStore, SessionStore};
