//! `ft-spatial` — "which assets are near this point?"
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`query`]  | `ProximityQuery`, `Nearby`, linear-scan [`nearby`]           |
//! | [`index`]  | `AssetIndex` — R-tree over a snapshot, same result contract   |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Result contract
//!
//! Both search paths apply the same four steps: filter by status/kind →
//! compute haversine distance → keep `distance <= radius` → sort ascending by
//! distance, ties kept in input order.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Linear scan computes distances on the Rayon pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod index;
pub mod query;


pub use error::{SpatialError, SpatialResult};
pub use index::AssetIndex;
pub use query::{Nearby, ProximityQuery, nearby};
