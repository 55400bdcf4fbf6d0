//! Candidate atlas sizes: the search space the orchestrator walks through.
//!
//! `Fixed` yields a single candidate, `Fast` a single seed the orchestrator
//! grows in place, and `BestFit` an explicit enumeration kept in a min-heap by
//! area so the orchestrator can pop the smallest remaining candidate (and push
//! widened retries back) without re-sorting.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::PackingConfig;
use crate::model::Size;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fast-solver growth step per failed attempt (non-power-of-two mode).
pub const FAST_GROWTH_STEP: i32 = 64;

#[derive(PartialEq, Eq)]
struct ByArea(Size);

impl Ord for ByArea {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .area()
            .cmp(&other.0.area())
            .then(self.0.w.cmp(&other.0.w))
            .then(self.0.h.cmp(&other.0.h))
    }
}

impl PartialOrd for ByArea {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of candidate sizes ordered by area.
#[derive(Default)]
pub struct SizeHeap {
    heap: BinaryHeap<Reverse<ByArea>>,
}

impl SizeHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, size: Size) {
        self.heap.push(Reverse(ByArea(size)));
    }

    /// Removes and returns the smallest-area candidate.
    pub fn pop(&mut self) -> Option<Size> {
        self.heap.pop().map(|Reverse(ByArea(s))| s)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

fn grow_dim(v: i32, power_of_two: bool) -> i32 {
    if power_of_two { v * 2 } else { v + 1 }
}

fn next_pow2(v: i32) -> i32 {
    let mut p = 1;
    while p < v {
        p *= 2;
    }
    p
}

/// Seed size for the `Fast` solver: starting from 16x16, grow the shorter side
/// until the area covers the summed image area. The seed may exceed the
/// configured maximums; the orchestrator turns that into a terminal failure.
pub fn fast_seed(total_area: i64, cfg: &PackingConfig) -> Size {
    let mut s = Size::new(16, 16);
    while s.area() < total_area {
        if s.w <= s.h {
            s.w = grow_dim(s.w, cfg.power_of_two);
        } else {
            s.h = grow_dim(s.h, cfg.power_of_two);
        }
        if cfg.force_square {
            let side = s.w.max(s.h);
            s = Size::new(side, side);
        }
    }
    s
}

/// Grows the `Fast` solver's current candidate after a failed attempt:
/// alternate the shorter dimension by a 64px step, or double it in
/// power-of-two mode. Returns `None` once growth would breach the maximums.
pub fn fast_grow(current: Size, cfg: &PackingConfig) -> Option<Size> {
    let mut next = current;
    if next.w <= next.h {
        next.w = if cfg.power_of_two { next.w * 2 } else { next.w + FAST_GROWTH_STEP };
    } else {
        next.h = if cfg.power_of_two { next.h * 2 } else { next.h + FAST_GROWTH_STEP };
    }
    if cfg.force_square {
        let side = next.w.max(next.h);
        next = Size::new(side, side);
    }
    if next.w > cfg.max_width || next.h > cfg.max_height {
        None
    } else {
        Some(next)
    }
}

/// Enumerates every legal `BestFit` candidate into a min-heap by area.
///
/// For each height from the tallest image up to `min(sum of heights,
/// max_height)`, the sole candidate is the minimal width that is at least the
/// widest image and covers the total area. With `force_square` only square
/// sizes qualify; with `power_of_two` heights and widths are restricted to
/// powers of two. Heights admitting no legal width contribute nothing; an
/// empty heap means the size space is exhausted before any attempt.
pub fn best_fit_candidates(items: &[Size], cfg: &PackingConfig, total_area: i64) -> SizeHeap {
    let min_width = items.iter().map(|s| s.w).max().unwrap_or(0);
    let min_height = items.iter().map(|s| s.h).max().unwrap_or(0);
    let sum_heights: i32 = items.iter().map(|s| s.h).sum();

    let mut heap = SizeHeap::new();

    if cfg.force_square {
        let min_side = min_width.max(min_height);
        let max_side = cfg.max_width.min(cfg.max_height);
        let mut side = if cfg.power_of_two { next_pow2(min_side) } else { min_side };
        while side <= max_side {
            let cand = Size::new(side, side);
            if cand.area() >= total_area {
                heap.push(cand);
            }
            side = grow_dim(side, cfg.power_of_two);
        }
        return heap;
    }

    let heights: Vec<i32> = if cfg.power_of_two {
        let mut hs = Vec::new();
        let mut h = next_pow2(min_height);
        while h <= cfg.max_height {
            hs.push(h);
            h *= 2;
        }
        hs
    } else {
        (min_height..=sum_heights.min(cfg.max_height)).collect()
    };

    let width_for = |h: i32| -> Option<Size> {
        let w = if cfg.power_of_two {
            let mut w = 1i32;
            while w < min_width || (w as i64) * (h as i64) < total_area {
                w *= 2;
                if w > cfg.max_width {
                    return None;
                }
            }
            w
        } else {
            let needed = ((total_area + h as i64 - 1) / h as i64) as i32;
            needed.max(min_width)
        };
        (w <= cfg.max_width).then_some(Size::new(w, h))
    };

    #[cfg(feature = "parallel")]
    let candidates: Vec<Option<Size>> = heights.par_iter().map(|&h| width_for(h)).collect();
    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Option<Size>> = heights.iter().map(|&h| width_for(h)).collect();

    for cand in candidates.into_iter().flatten() {
        heap.push(cand);
    }
    heap
}
