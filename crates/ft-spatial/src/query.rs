//! Linear-scan proximity query.
//!
//! Every call walks the whole snapshot.  That is the intended cost model for
//! fleets up to a few tens of thousands of assets; beyond that, build an
//! [`AssetIndex`][crate::AssetIndex] once per snapshot and query it instead.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ft_core::{Asset, AssetId, AssetKind, AssetStatus, GeoPoint};

use crate::{SpatialError, SpatialResult};

/// A radius search around `center`, optionally restricted by status and kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityQuery {
    pub center:    GeoPoint,
    pub radius_km: f64,
    pub status:    Option<AssetStatus>,
    pub kind:      Option<AssetKind>,
}

impl ProximityQuery {
    /// Unfiltered search within `radius_km` of `center`.
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km, status: None, kind: None }
    }

    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_kind(mut self, kind: AssetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Reject an out-of-range center or a negative / non-finite radius.
    pub fn validate(&self) -> SpatialResult<()> {
        self.center.validate()?;
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(SpatialError::InvalidRadius(self.radius_km));
        }
        Ok(())
    }

    /// Status/kind predicate, applied before any distance is computed.
    #[inline]
    pub fn admits(&self, asset: &Asset) -> bool {
        self.status.is_none_or(|s| s == asset.status)
            && self.kind.as_ref().is_none_or(|k| *k == asset.kind)
    }

    /// `Some(hit)` if `asset` passes the filter and lies within the radius.
    #[inline]
    pub(crate) fn hit(&self, asset: &Asset) -> Option<Nearby> {
        if !self.admits(asset) {
            return None;
        }
        let distance_km = self.center.distance_km(asset.position);
        (distance_km <= self.radius_km).then(|| Nearby::new(asset, distance_km))
    }
}

/// One search hit: a summary of the asset plus its distance from the query
/// center.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nearby {
    pub asset_id:    AssetId,
    pub name:        String,
    pub kind:        AssetKind,
    pub status:      AssetStatus,
    pub position:    GeoPoint,
    pub distance_km: f64,
}

impl Nearby {
    pub(crate) fn new(asset: &Asset, distance_km: f64) -> Self {
        Self {
            asset_id: asset.id.clone(),
            name:     asset.name.clone(),
            kind:     asset.kind.clone(),
            status:   asset.status,
            position: asset.position,
            distance_km,
        }
    }
}

/// All assets in `assets` matching `query`, nearest first.
///
/// The sort is stable, so assets at identical distances keep their relative
/// order from `assets`.
pub fn nearby(query: &ProximityQuery, assets: &[Asset]) -> SpatialResult<Vec<Nearby>> {
    query.validate()?;

    #[cfg(feature = "parallel")]
    let mut hits: Vec<Nearby> = assets.par_iter().filter_map(|a| query.hit(a)).collect();

    #[cfg(not(feature = "parallel"))]
    let mut hits: Vec<Nearby> = assets.iter().filter_map(|a| query.hit(a)).collect();

    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Ok(hits)
}
