use crate::model::Size;

pub mod maxrects;
pub mod shelf;

/// A placement strategy seats every rectangle into a candidate canvas, or
/// reports that the canvas is too small.
///
/// `attempt` visits `sizes` in the order given by `order` (indices into
/// `sizes`) and returns the top-left corner per input index on success, so the
/// caller's collection is never reordered. `None` means some rectangle could
/// not be seated at this candidate size; the orchestrator treats that as a
/// signal to grow, never as a caller-visible error. Implementations must keep
/// at least `padding` pixels between any two placed rectangles and must keep
/// every placed rectangle inside `bounds`.
pub trait PlacementStrategy {
    fn attempt(
        &mut self,
        sizes: &[Size],
        order: &[usize],
        bounds: Size,
        padding: i32,
    ) -> Option<Vec<(i32, i32)>>;
}

/// Indices into `sizes` sorted by descending height (ties: descending width,
/// then input order). Sorting indices rather than the input keeps the caller's
/// collection intact and the result deterministic.
pub fn sorted_indices(sizes: &[Size]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..sizes.len()).collect();
    indices.sort_by(|&a, &b| {
        sizes[b]
            .h
            .cmp(&sizes[a].h)
            .then(sizes[b].w.cmp(&sizes[a].w))
            .then(a.cmp(&b))
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_indices_is_height_desc_and_stable() {
        let sizes = vec![
            Size::new(10, 20),
            Size::new(10, 40),
            Size::new(30, 20),
            Size::new(10, 20),
        ];
        assert_eq!(sorted_indices(&sizes), vec![1, 2, 0, 3]);
    }
}
