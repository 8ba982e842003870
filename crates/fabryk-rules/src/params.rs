//! Paging and sort parameters.
//!
//! `from` in a request is a page index, not a document offset: the engine
//! offset is `from * size`. Page zero and an absent `from` both omit the
//! offset so the engine applies its own default.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::CompilerConfig;
use crate::request::{GeoFilter, RequestParams, SortOrder};

/// Top-level parameters of a query document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// Target index.
    pub index: String,
    /// Page size.
    pub size: u64,
    /// Document offset, `None` when no offset is sent.
    pub from: Option<u64>,
}

/// A distance sort around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSort {
    /// Geo-point field sorted on.
    pub field: String,
    /// Longitude of the origin.
    pub longitude: f64,
    /// Latitude of the origin.
    pub latitude: f64,
    /// Sort direction.
    pub order: SortOrder,
    /// Maximum distance in kilometres.
    pub distance_km: f64,
}

impl Serialize for GeoSort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut outer = serializer.serialize_map(Some(1))?;
        outer.serialize_entry("_geo_distance", &GeoDistance(self))?;
        outer.end()
    }
}

/// The `_geo_distance` body: the origin under the field name, then the
/// distance options.
struct GeoDistance<'a>(&'a GeoSort);

impl Serialize for GeoDistance<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sort = self.0;
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry(&sort.field, &[sort.longitude, sort.latitude])?;
        map.serialize_entry("order", &sort.order)?;
        map.serialize_entry("distance", &sort.distance_km)?;
        map.serialize_entry("unit", "km")?;
        map.serialize_entry("mode", "min")?;
        map.serialize_entry("distance_type", "arc")?;
        map.serialize_entry("ignore_unmapped", &true)?;
        map.end()
    }
}

/// Derives paging and sort parameters from a request.
#[derive(Debug, Clone, Copy)]
pub struct ParamsBuilder<'a> {
    config: &'a CompilerConfig,
}

impl<'a> ParamsBuilder<'a> {
    /// Create a builder falling back to `config` defaults.
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Index, size and offset for `params`.
    pub fn params(&self, params: &RequestParams) -> Params {
        let index = params
            .index
            .clone()
            .filter(|index| !index.is_empty())
            .unwrap_or_else(|| self.config.index.clone());
        let size = params.size.unwrap_or(self.config.default_size);

        Params {
            index,
            size,
            from: offset(params.from, size),
        }
    }

    /// Distance sort for an optional geo filter.
    ///
    /// Missing coordinates default to `0`, the order to ascending and the
    /// distance to the configured maximum.
    pub fn geo_sort(&self, geo: Option<&GeoFilter>) -> Option<GeoSort> {
        let geo = geo?;
        if geo.longitude.is_none() || geo.latitude.is_none() {
            log::debug!("Geo filter without full coordinates, defaulting to 0");
        }

        Some(GeoSort {
            field: self.config.geo_field.clone(),
            longitude: geo.longitude.unwrap_or(0.0),
            latitude: geo.latitude.unwrap_or(0.0),
            order: geo.order.unwrap_or_default(),
            distance_km: geo
                .max_distance_km
                .unwrap_or(self.config.geo_default_max_distance_km),
        })
    }
}

/// Document offset for page `from` of `size` documents.
pub fn offset(from: Option<u64>, size: u64) -> Option<u64> {
    match from {
        None | Some(0) => None,
        Some(page) => Some(page.saturating_mul(size)),
    }
}

// ============================================================================
// Tests
// ============================================================================
