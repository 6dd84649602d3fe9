//! Venue catalog, query validation and filtering for the cafe finder.
//!
//! This crate holds everything the `/cafe` endpoint does that is not HTTP:
//!
//! # Modules
//!
//! - [`catalog`] -- The read-only city to venue mapping, the built-in
//!   dataset, and loading from a YAML file.
//! - [`query`] -- Raw parameter collection, typed validation into
//!   [`CafeQuery`], and response body formatting.
//! - [`config`] -- Service configuration loading from `cafe-config.yaml`
//!   with environment overrides.
//!
//! [`CafeQuery`]: query::CafeQuery

pub mod catalog;
pub mod config;
pub mod query;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, ServiceConfig};
pub use query::{format_venues, CafeQuery, QueryError, RawCafeParams};
