use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::cancel::CancelToken;
use crate::compositing::compose_atlas;
use crate::config::{Algorithm, MAX_IMAGES, PackingConfig, SizeSolver};
use crate::error::{AtlasPackerError, Result};
use crate::model::{PackStats, Placement, Size};
use crate::packer::{PlacementStrategy, maxrects::MaxRectsPacker, shelf::ShelfPacker, sorted_indices};
use crate::sizes;

/// In-memory image to pack: a unique key plus its decoded RGBA pixels.
#[derive(Debug)]
pub struct InputImage {
    pub key: String,
    pub image: RgbaImage,
}

/// Result of a successful pack. All-or-nothing: every input image has exactly
/// one entry in `placements`, and the engine keeps no reference to any of it
/// after returning.
#[derive(Debug)]
pub struct PackOutput {
    pub atlas_size: Size,
    pub placements: BTreeMap<String, Placement>,
    pub atlas: RgbaImage,
    pub stats: PackStats,
}

/// Layout-only result: placements and stats without a composed pixel buffer.
#[derive(Debug)]
pub struct LayoutOutput {
    pub atlas_size: Size,
    pub placements: BTreeMap<String, Placement>,
    pub stats: PackStats,
}

/// Packs `inputs` into a single atlas and composes the pixel buffer.
///
/// Deterministic for a given `(inputs, cfg)`: the engine holds no state
/// between calls. Sorting happens on internal indices, so the order of
/// `inputs` is left intact.
pub fn pack_images(inputs: &[InputImage], cfg: &PackingConfig) -> Result<PackOutput> {
    pack_images_with_cancel(inputs, cfg, &CancelToken::new())
}

/// Like [`pack_images`], polling `cancel` between placement attempts. A
/// cancelled token aborts with `Cancelled` and no partial results.
#[instrument(skip_all)]
pub fn pack_images_with_cancel(
    inputs: &[InputImage],
    cfg: &PackingConfig,
    cancel: &CancelToken,
) -> Result<PackOutput> {
    let start = Instant::now();
    let cfg = cfg.normalized()?;

    let sizes = validate_inputs(
        inputs.iter().map(|i| {
            let (w, h) = i.image.dimensions();
            (i.key.as_str(), w, h)
        }),
        &cfg,
    )?;

    let (atlas_size, positions) = solve_layout(&sizes, &cfg, cancel)?;
    let atlas = compose_atlas(inputs, &positions, atlas_size);

    let total_image_area: i64 = sizes.iter().map(Size::area).sum();
    let placements = placement_map(inputs.iter().map(|i| i.key.clone()), &sizes, &positions);
    let stats = PackStats::new(total_image_area, atlas_size, start.elapsed());
    debug!(w = atlas_size.w, h = atlas_size.h, "{}", stats.summary());

    Ok(PackOutput {
        atlas_size,
        placements,
        atlas,
        stats,
    })
}

/// Packs bare sizes without compositing pixel data. Inputs are
/// `(key, width, height)`.
#[instrument(skip_all)]
pub fn pack_layout<K: Into<String>>(
    items: Vec<(K, u32, u32)>,
    cfg: &PackingConfig,
) -> Result<LayoutOutput> {
    pack_layout_with_cancel(items, cfg, &CancelToken::new())
}

pub fn pack_layout_with_cancel<K: Into<String>>(
    items: Vec<(K, u32, u32)>,
    cfg: &PackingConfig,
    cancel: &CancelToken,
) -> Result<LayoutOutput> {
    let start = Instant::now();
    let cfg = cfg.normalized()?;

    let mut keys: Vec<String> = Vec::with_capacity(items.len());
    let mut dims: Vec<(u32, u32)> = Vec::with_capacity(items.len());
    for (k, w, h) in items {
        keys.push(k.into());
        dims.push((w, h));
    }
    let sizes = validate_inputs(
        keys.iter()
            .zip(&dims)
            .map(|(k, &(w, h))| (k.as_str(), w, h)),
        &cfg,
    )?;

    let (atlas_size, positions) = solve_layout(&sizes, &cfg, cancel)?;

    let total_image_area: i64 = sizes.iter().map(Size::area).sum();
    let placements = placement_map(keys.into_iter(), &sizes, &positions);
    let stats = PackStats::new(total_image_area, atlas_size, start.elapsed());

    Ok(LayoutOutput {
        atlas_size,
        placements,
        stats,
    })
}

/// Rejects empty input, inputs over the cap, duplicate keys, degenerate
/// dimensions, and images that can never fit the configured maximums
/// (the latter up front so it holds for every solver).
fn validate_inputs<'a>(
    items: impl Iterator<Item = (&'a str, u32, u32)>,
    cfg: &PackingConfig,
) -> Result<Vec<Size>> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sizes: Vec<Size> = Vec::new();

    for (key, w, h) in items {
        if !seen.insert(key) {
            return Err(AtlasPackerError::InvalidInput(format!(
                "duplicate image key: {key:?}"
            )));
        }
        if w == 0 || h == 0 {
            return Err(AtlasPackerError::InvalidInput(format!(
                "image {key:?} has zero dimension ({w}x{h})"
            )));
        }
        if w > cfg.max_width as u32 || h > cfg.max_height as u32 {
            return Err(AtlasPackerError::MaxDimensionsExceeded {
                max_width: cfg.max_width,
                max_height: cfg.max_height,
            });
        }
        sizes.push(Size::new(w as i32, h as i32));
    }

    if sizes.is_empty() {
        return Err(AtlasPackerError::Empty);
    }
    if sizes.len() > MAX_IMAGES {
        return Err(AtlasPackerError::TooManyImages {
            count: sizes.len(),
            cap: MAX_IMAGES,
        });
    }
    Ok(sizes)
}

/// The candidate-size search: Seed -> Attempt <-> Grow -> Done | Failed.
///
/// Every growth path strictly shrinks the remaining candidate budget (the
/// heap drains, or the growing dimension marches toward the maximum), so the
/// loop always terminates. A per-candidate placement failure is internal
/// signal to grow; only the terminal failures here surface to the caller.
fn solve_layout(
    sizes: &[Size],
    cfg: &PackingConfig,
    cancel: &CancelToken,
) -> Result<(Size, Vec<(i32, i32)>)> {
    let total_area: i64 = sizes.iter().map(Size::area).sum();
    let order = sorted_indices(sizes);
    let mut strategy: Box<dyn PlacementStrategy> = match cfg.algorithm {
        Algorithm::Shelf => Box::new(ShelfPacker),
        Algorithm::MaxRects => Box::new(MaxRectsPacker::new()),
    };

    let mut heap = sizes::SizeHeap::new();
    let mut current = match cfg.size_solver {
        SizeSolver::Fixed => Size::new(cfg.fixed_width, cfg.fixed_height),
        SizeSolver::Fast => {
            let seed = sizes::fast_seed(total_area, cfg);
            if seed.w > cfg.max_width || seed.h > cfg.max_height {
                return Err(AtlasPackerError::MaxDimensionsExceeded {
                    max_width: cfg.max_width,
                    max_height: cfg.max_height,
                });
            }
            seed
        }
        SizeSolver::BestFit => {
            heap = sizes::best_fit_candidates(sizes, cfg, total_area);
            heap.pop().ok_or(AtlasPackerError::SizeSpaceExhausted)?
        }
    };

    loop {
        if cancel.is_cancelled() {
            return Err(AtlasPackerError::Cancelled);
        }
        if let Some(positions) = strategy.attempt(sizes, &order, current, cfg.padding) {
            return Ok((current, positions));
        }
        debug!(w = current.w, h = current.h, "candidate rejected, growing");

        current = match cfg.size_solver {
            SizeSolver::Fixed => return Err(AtlasPackerError::SizeSpaceExhausted),
            SizeSolver::Fast => {
                sizes::fast_grow(current, cfg).ok_or(AtlasPackerError::MaxDimensionsExceeded {
                    max_width: cfg.max_width,
                    max_height: cfg.max_height,
                })?
            }
            SizeSolver::BestFit => {
                // A candidate rejected at this width may pass one pixel wider;
                // re-queue the widened size before popping the next smallest.
                if !cfg.force_square && !cfg.power_of_two && current.w < cfg.max_width {
                    heap.push(Size::new(current.w + 1, current.h));
                }
                heap.pop().ok_or(AtlasPackerError::SizeSpaceExhausted)?
            }
        };
    }
}

fn placement_map(
    keys: impl Iterator<Item = String>,
    sizes: &[Size],
    positions: &[(i32, i32)],
) -> BTreeMap<String, Placement> {
    keys.zip(sizes.iter().zip(positions))
        .map(|(key, (size, &(x, y)))| {
            (
                key,
                Placement {
                    x,
                    y,
                    width: size.w,
                    height: size.h,
                },
            )
        })
        .collect()
}
