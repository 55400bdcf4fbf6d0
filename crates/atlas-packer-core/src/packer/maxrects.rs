use super::PlacementStrategy;
use crate::model::{Rect, Size};

/// MaxRects packer with the best-short-side-fit heuristic.
///
/// Tracks the maximal free rectangular regions of the canvas. Each rectangle
/// is placed into the free region whose shorter leftover dimension is
/// smallest, which favors regions that leave a regular-shaped remainder and
/// keeps fragmentation down. After a placement, every free region within the
/// padding gap of it is split into up to four strips around the inflated
/// placement, and fully-enclosed regions are pruned.
pub struct MaxRectsPacker {
    free: Vec<Rect>,
}

impl MaxRectsPacker {
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Index of the free rect with the minimal short-side leftover, if any
    /// accommodates `size`. Ties keep the earliest candidate.
    fn find_best(&self, size: Size) -> Option<usize> {
        let mut best: Option<(i32, usize)> = None;
        for (i, fr) in self.free.iter().enumerate() {
            let leftover_w = fr.w - size.w;
            let leftover_h = fr.h - size.h;
            if leftover_w < 0 || leftover_h < 0 {
                continue;
            }
            let short_side = leftover_w.min(leftover_h);
            if best.is_none_or(|(score, _)| short_side < score) {
                best = Some((short_side, i));
            }
        }
        best.map(|(_, i)| i)
    }

    fn push_free(&mut self, rect: Rect) {
        if rect.w > 0 && rect.h > 0 {
            self.free.push(rect);
        }
    }

    /// Splits every free rect within `padding` of `placed` into the strips
    /// surrounding the placement inflated by `padding`. Splitting against the
    /// inflated rect also insets free rects that merely border the placement,
    /// so the gap holds for all later arrivals.
    fn split_around(&mut self, placed: &Rect, padding: i32) {
        let guard = Rect::new(
            placed.x - padding,
            placed.y - padding,
            placed.w + 2 * padding,
            placed.h + 2 * padding,
        );
        let mut strips: Vec<Rect> = Vec::new();
        let mut i = 0;
        while i < self.free.len() {
            if !self.free[i].intersects(&guard) {
                i += 1;
                continue;
            }
            let fr = self.free.swap_remove(i);

            // top strip
            if guard.y > fr.y {
                strips.push(Rect::new(fr.x, fr.y, fr.w, guard.y - fr.y));
            }
            // bottom strip
            if fr.bottom() > guard.bottom() {
                strips.push(Rect::new(
                    fr.x,
                    guard.bottom(),
                    fr.w,
                    fr.bottom() - guard.bottom(),
                ));
            }
            // left strip
            if guard.x > fr.x {
                strips.push(Rect::new(fr.x, fr.y, guard.x - fr.x, fr.h));
            }
            // right strip
            if fr.right() > guard.right() {
                strips.push(Rect::new(
                    guard.right(),
                    fr.y,
                    fr.right() - guard.right(),
                    fr.h,
                ));
            }
        }
        for strip in strips {
            self.push_free(strip);
        }
    }

    /// Drops any free rect fully enclosed within another, keeping the list
    /// from growing unboundedly as splits accumulate.
    fn prune(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut removed_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.swap_remove(i);
                    removed_i = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.swap_remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed_i {
                i += 1;
            }
        }
    }

    #[cfg(test)]
    fn free_list_len(&self) -> usize {
        self.free.len()
    }
}

impl Default for MaxRectsPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementStrategy for MaxRectsPacker {
    fn attempt(
        &mut self,
        sizes: &[Size],
        order: &[usize],
        bounds: Size,
        padding: i32,
    ) -> Option<Vec<(i32, i32)>> {
        self.free.clear();
        self.free.push(Rect::new(0, 0, bounds.w, bounds.h));

        let mut placements = vec![(0, 0); sizes.len()];
        for &idx in order {
            let size = sizes[idx];
            let best = self.find_best(size)?;
            let placed = Rect::new(self.free[best].x, self.free[best].y, size.w, size.h);
            placements[idx] = (placed.x, placed.y);

            self.split_around(&placed, padding);
            self.prune();
        }
        Some(placements)
    }
}
