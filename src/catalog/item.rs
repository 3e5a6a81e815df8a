//! STAC wire types
//!
//! Minimal serde models for the subset of the STAC item spec this crate
//! consumes: items with assets, and the paged `FeatureCollection` envelope
//! returned by the search endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single STAC item (one catalog entry, e.g. one satellite scene)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StacItem {
    /// Item identifier, unique within its collection
    pub id: String,

    /// Collection the item belongs to
    #[serde(default)]
    pub collection: Option<String>,

    /// Item footprint as (west, south, east, north)
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,

    /// Free-form item properties (acquisition time, orbit metadata, ...)
    #[serde(default)]
    pub properties: serde_json::Value,

    /// Downloadable assets keyed by band or role name
    #[serde(default)]
    pub assets: HashMap<String, Asset>,
}

impl StacItem {
    /// Returns the item's acquisition timestamp from its `datetime` property
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.properties
            .get("datetime")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// A downloadable asset attached to an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset location
    pub href: String,

    /// Media type of the asset
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Human-readable asset title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One page of search results (a STAC `FeatureCollection`)
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPage {
    /// Items on this page
    #[serde(default)]
    pub features: Vec<StacItem>,

    /// Pagination and relation links
    #[serde(default)]
    pub links: Vec<PageLink>,
}

impl ItemPage {
    /// Returns the `rel="next"` pagination link, if the result set continues
    pub fn next_link(&self) -> Option<&PageLink> {
        self.links.iter().find(|link| link.rel == "next")
    }
}

/// A hypermedia link attached to a result page
#[derive(Debug, Clone, Deserialize)]
pub struct PageLink {
    /// Link relation (`next`, `self`, `root`, ...)
    pub rel: String,

    /// Link target
    pub href: String,

    /// HTTP method to use when following the link; GET when absent
    #[serde(default)]
    pub method: Option<String>,

    /// Request body to send when the link must be followed with POST
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}
