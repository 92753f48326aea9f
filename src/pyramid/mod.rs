//! Pyramid geometry engine.
//!
//! The pure core of the tile server: derives the pyramid shape from the slide
//! dimensions, resolves tile addresses to full-resolution regions of
//! interest, and clamps those regions to the usable scene bounds. Nothing in
//! this module performs I/O or holds mutable state; every function is a
//! deterministic map from inputs to outputs.
//!
//! # Pipeline
//!
//! ```text
//! (level, col, row)
//!        │
//!        ▼
//! ┌──────────────┐   level-space     ┌──────────────┐   nominal ROI
//! │   geometry   │──footprint──────▶│   resolver   │──+ zoom──────┐
//! │ scale, dims  │                   │ clip to grid │              ▼
//! └──────────────┘                   └──────────────┘      ┌──────────────┐
//!                                                          │    clamp     │
//!                                    clamped ROI + zoom ◀──│ scene bounds │
//!                                                          └──────────────┘
//! ```
//!
//! [`derive_tile`] runs the whole pipeline and records every intermediate in
//! a [`TileDerivation`], shared between the tile service and the debug
//! endpoint.

mod clamp;
mod derivation;
mod descriptor;
mod geometry;
mod resolver;

pub use clamp::{clamp, effective_zoom, ClampedRoi};
pub use derivation::{derive_tile, TileDerivation, TileLevelRect};
pub use descriptor::{dzi_xml, InfoResponse};
pub use geometry::{ceil_log2, LevelGeometry, PyramidInfo};
pub use resolver::{level_footprint, map_to_full_res, resolve, LevelFootprint, NominalRoi};
