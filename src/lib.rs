//! Static pages and view rendering for the izithakazelo clan praise site.
//!
//! The generator ([`generate`]) turns the clan dataset into one page per clan
//! plus a sitemap. The renderer ([`site`]) drives the home, explore and clan
//! detail views over the same dataset.

pub mod config;
pub mod error;
pub mod generate;
pub mod loader;
pub mod page;
pub mod query;
pub mod render;
pub mod select;
pub mod site;
pub mod spotlight;
pub mod stats;
pub mod types;
pub mod utils;

pub use error::RecordError;
pub use types::*;
