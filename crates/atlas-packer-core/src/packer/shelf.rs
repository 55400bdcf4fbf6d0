use super::PlacementStrategy;
use crate::model::Size;

/// First-fit-decreasing-height shelf packer.
///
/// Rectangles are laid out left-to-right along a shelf whose height is the
/// height of its first (tallest remaining) rectangle; when a rectangle no
/// longer fits the row, the pen wraps to a new shelf below. O(n) placement
/// after the height sort.
pub struct ShelfPacker;

impl PlacementStrategy for ShelfPacker {
    fn attempt(
        &mut self,
        sizes: &[Size],
        order: &[usize],
        bounds: Size,
        padding: i32,
    ) -> Option<Vec<(i32, i32)>> {
        let mut placements = vec![(0, 0); sizes.len()];
        let Some(&first) = order.first() else {
            return Some(placements);
        };

        let mut pen_x = 0;
        let mut pen_y = 0;
        let mut shelf_height = sizes[first].h;

        for &idx in order {
            let size = sizes[idx];
            if size.w > bounds.w {
                return None;
            }
            if pen_x + size.w > bounds.w {
                pen_x = 0;
                pen_y += shelf_height + padding;
                shelf_height = size.h;
            }
            if pen_y + size.h > bounds.h {
                return None;
            }
            placements[idx] = (pen_x, pen_y);
            pen_x += size.w + padding;
        }

        Some(placements)
    }
}
