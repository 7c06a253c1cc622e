//! R-tree index over an asset snapshot.
//!
//! # Embedding
//!
//! Each position is mapped onto the surface of a sphere of radius
//! [`EARTH_RADIUS_KM`] in 3-D Cartesian space.  Straight-line (chord)
//! distance in that space is a monotonic function of great-circle distance,
//! so:
//!
//! - the nearest point by chord is the nearest point by haversine, and
//! - a great-circle radius `r` maps to a chord bound `2R·sin(r / 2R)`.
//!
//! Neither the ±180° meridian nor the poles need special handling, unlike a
//! lat/lon-plane index.  Candidates returned by the chord bound are re-checked
//! with haversine so the result is identical to the linear
//! [`nearby`][crate::nearby] scan.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ft_core::{Asset, EARTH_RADIUS_KM, GeoPoint};

use crate::{Nearby, ProximityQuery, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// A point on the sphere plus the position of its asset in the snapshot.
#[derive(Clone)]
struct AssetEntry {
    point: [f64; 3],
    slot:  usize,
}

impl RTreeObject for AssetEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AssetEntry {
    /// Squared chord length, km².
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

fn to_cartesian(p: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (p.lat.to_radians(), p.lon.to_radians());
    [
        EARTH_RADIUS_KM * lat.cos() * lon.cos(),
        EARTH_RADIUS_KM * lat.cos() * lon.sin(),
        EARTH_RADIUS_KM * lat.sin(),
    ]
}

/// Chord length for a great-circle radius, slightly widened so rounding can
/// never drop a candidate the haversine check would accept.
fn chord_bound_km(radius_km: f64) -> f64 {
    let half_angle = (radius_km / (2.0 * EARTH_RADIUS_KM)).min(std::f64::consts::FRAC_PI_2);
    2.0 * EARTH_RADIUS_KM * half_angle.sin() * (1.0 + 1e-9) + 1e-9
}

// ── AssetIndex ────────────────────────────────────────────────────────────────

/// Immutable spatial index over one snapshot of asset positions.
///
/// Build once per snapshot with [`AssetIndex::build`]; positions are not
/// updated in place.
pub struct AssetIndex {
    assets: Vec<Asset>,
    tree:   RTree<AssetEntry>,
}

impl AssetIndex {
    /// Bulk-load an index from a snapshot.  Snapshot order is remembered and
    /// used to break distance ties.
    pub fn build(assets: Vec<Asset>) -> Self {
        let entries = assets
            .iter()
            .enumerate()
            .map(|(slot, a)| AssetEntry { point: to_cartesian(a.position), slot })
            .collect();
        Self { assets, tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Same result as [`nearby`][crate::nearby] over the indexed snapshot.
    pub fn within(&self, query: &ProximityQuery) -> SpatialResult<Vec<Nearby>> {
        query.validate()?;

        let bound = chord_bound_km(query.radius_km);
        let mut hits: Vec<(usize, f64)> = self
            .tree
            .locate_within_distance(to_cartesian(query.center), bound * bound)
            .filter_map(|e| {
                let asset = &self.assets[e.slot];
                if !query.admits(asset) {
                    return None;
                }
                let d = query.center.distance_km(asset.position);
                (d <= query.radius_km).then_some((e.slot, d))
            })
            .collect();

        // Tree traversal order is arbitrary; restore snapshot order on ties.
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        Ok(hits
            .into_iter()
            .map(|(slot, d)| Nearby::new(&self.assets[slot], d))
            .collect())
    }

    /// The single closest asset to `point`, ignoring status and kind.
    ///
    /// Returns `None` only if the index is empty.
    pub fn nearest(&self, point: GeoPoint) -> Option<Nearby> {
        self.tree.nearest_neighbor(&to_cartesian(point)).map(|e| {
            let asset = &self.assets[e.slot];
            Nearby::new(asset, point.distance_km(asset.position))
        })
    }
}
