//! PokePedia core: catalog loading and name search

pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
pub mod session;

pub use cancel::CancellationToken;
pub use catalog::{Catalog, CatalogLoader, Entry};
pub use config::{AggregationPolicy, CatalogConfig};
pub use error::{ConfigError, FetchError, LoadError};
pub use session::{LoadStatus, Session};
