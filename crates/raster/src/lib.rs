#![deny(unsafe_code)]
//! CPU rendering for the constellation background.
//!
//! [`Raster`] is a pixel-buffer [`DrawSurface`](constellation_core::DrawSurface)
//! so fields can be rendered headlessly; [`snapshot`] writes rasters to PNG.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::Raster;
