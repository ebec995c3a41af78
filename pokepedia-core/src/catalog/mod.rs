//! PokePedia Catalog - Loading the Pokémon catalog from PokeAPI
//!
//! # Architecture
//!
//! ```text
//! PokeAPI
//!     │
//!     ├── /pokemon?limit=N   ← Listing: ordered {name, url} references
//!     └── /pokemon/{id}/     ← Detail: name, sprites.front_default
//!            │
//!            ▼
//!     CatalogSource (HTTP or fixtures)
//!            │
//!            ▼
//!     CatalogLoader          ← fan-out, aggregation policy, cancellation
//!            │
//!            ▼
//!     Catalog                ← immutable, shared with search and session
//! ```

#[cfg(feature = "http")]
mod http;
mod loader;
mod model;
mod source;

#[cfg(feature = "http")]
pub use http::HttpSource;
pub use loader::{CatalogLoader, DetailFailure, LoadReport};
pub use model::{Catalog, DetailBody, Entry, ListingPage, Reference, Sprites};
pub use source::CatalogSource;

#[cfg(test)]
pub(crate) use source::mock;
