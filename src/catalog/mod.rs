//! STAC catalog search client
//!
//! This module wraps a remote STAC search endpoint, including:
//! - HTTP client construction with a proper user agent
//! - Eager search returning a realized item sequence
//! - Lazy, pull-based search that fetches pages on demand
//! - Asset signing against a SAS token endpoint

mod client;
mod item;
mod stream;

pub use client::{build_http_client, CatalogClient};
pub use item::{Asset, ItemPage, PageLink, StacItem};
pub use stream::ItemStream;
