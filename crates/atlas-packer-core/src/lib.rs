//! Core engine for packing images into a single texture atlas.
//!
//! - Placement algorithms: Shelf (first-fit-decreasing-height rows) and
//!   MaxRects (best-short-side-fit with free-rectangle splitting/pruning)
//! - Size search: Fixed (one candidate), Fast (one growing candidate),
//!   BestFit (min-heap of per-height minimal sizes, smallest area first)
//! - `pack_images` takes in-memory RGBA images and returns the composed atlas,
//!   a placement map suitable for a JSON sidecar, and packing statistics.
//!
//! Quick example:
//! ```ignore
//! use atlas_packer_core::{pack_images, InputImage, PackingConfig};
//! # fn main() -> anyhow::Result<()> {
//! let a = image::open("a.png")?.to_rgba8();
//! let b = image::open("b.png")?.to_rgba8();
//! let inputs = vec![
//!     InputImage { key: "a".into(), image: a },
//!     InputImage { key: "b".into(), image: b },
//! ];
//! let out = pack_images(&inputs, &PackingConfig::default())?;
//! println!("atlas: {}x{}", out.atlas_size.w, out.atlas_size.h);
//! # Ok(()) }
//! ```

pub mod cancel;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod sizes;

pub use cancel::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::config::{Algorithm, PackingConfig, PackingConfigBuilder, SizeSolver};
    pub use crate::error::{AtlasPackerError, Result};
    pub use crate::model::{PackStats, Placement, Rect, Size};
    pub use crate::{
        InputImage, LayoutOutput, PackOutput, pack_images, pack_images_with_cancel, pack_layout,
        pack_layout_with_cancel,
    };
}
