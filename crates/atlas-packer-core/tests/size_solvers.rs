use atlas_packer_core::prelude::*;

fn is_pow2(v: i32) -> bool {
    v > 0 && (v & (v - 1)) == 0
}

#[test]
fn best_fit_finds_the_tight_single_row() {
    // Two 64x64 images: the minimal-area candidates are 64x128 and 128x64,
    // and either fills completely.
    for algorithm in [Algorithm::Shelf, Algorithm::MaxRects] {
        let cfg = PackingConfig::builder()
            .algorithm(algorithm)
            .size_solver(SizeSolver::BestFit)
            .build();
        let out = pack_layout(vec![("a", 64, 64), ("b", 64, 64)], &cfg).expect("pack");
        assert_eq!(out.atlas_size.area(), 2 * 64 * 64, "algorithm {algorithm:?}");
        assert!((out.stats.packing_efficiency - 100.0).abs() < 1e-9);
    }
}

#[test]
fn best_fit_power_of_two_atlas_has_pow2_dimensions() {
    let cfg = PackingConfig::builder()
        .size_solver(SizeSolver::BestFit)
        .power_of_two(true)
        .build();
    let out = pack_layout(vec![("a", 60, 60), ("b", 60, 60), ("c", 60, 60)], &cfg).expect("pack");
    assert!(is_pow2(out.atlas_size.w), "width {}", out.atlas_size.w);
    assert!(is_pow2(out.atlas_size.h), "height {}", out.atlas_size.h);
}

#[test]
fn best_fit_force_square_atlas_is_square() {
    let cfg = PackingConfig::builder()
        .algorithm(Algorithm::MaxRects)
        .size_solver(SizeSolver::BestFit)
        .force_square(true)
        .build();
    let out = pack_layout(vec![("a", 50, 50), ("b", 50, 50), ("c", 50, 50)], &cfg).expect("pack");
    assert_eq!(out.atlas_size.w, out.atlas_size.h);
    assert!(out.atlas_size.area() >= 3 * 50 * 50);
}

#[test]
fn fast_power_of_two_seed_is_the_smallest_covering_square() {
    let cfg = PackingConfig::builder()
        .size_solver(SizeSolver::Fast)
        .power_of_two(true)
        .build();
    let out = pack_layout(vec![("a", 64, 64), ("b", 64, 64), ("c", 64, 64)], &cfg).expect("pack");
    assert_eq!(out.atlas_size, Size::new(128, 128));
}

#[test]
fn fast_force_square_stays_square_through_growth() {
    let cfg = PackingConfig::builder()
        .size_solver(SizeSolver::Fast)
        .force_square(true)
        .build();
    let out = pack_layout(vec![("a", 100, 30), ("b", 30, 100), ("c", 80, 80)], &cfg).expect("pack");
    assert_eq!(out.atlas_size.w, out.atlas_size.h);
}

/// Same inputs, same config, same result: the engine holds no state between
/// calls and sorts on internal indices only.
#[test]
fn fixed_solver_is_deterministic() {
    let cfg = PackingConfig::builder()
        .algorithm(Algorithm::MaxRects)
        .size_solver(SizeSolver::Fixed)
        .fixed_dimensions(200, 200)
        .padding(2)
        .build();
    let items = || vec![("a", 80, 80), ("b", 60, 90), ("c", 90, 60), ("d", 40, 40)];

    let first = pack_layout(items(), &cfg).expect("pack");
    let second = pack_layout(items(), &cfg).expect("pack");
    assert_eq!(first.atlas_size, second.atlas_size);
    assert_eq!(first.placements, second.placements);
}

#[test]
fn fixed_solver_failure_is_deterministic_too() {
    let cfg = PackingConfig::builder()
        .size_solver(SizeSolver::Fixed)
        .fixed_dimensions(100, 100)
        .build();
    for _ in 0..2 {
        let err = pack_layout(vec![("a", 80, 80), ("b", 80, 80)], &cfg).unwrap_err();
        assert!(matches!(err, AtlasPackerError::SizeSpaceExhausted));
    }
}

/// BestFit never returns a larger atlas than Fast for the same inputs; that
/// is the whole point of paying for the candidate enumeration.
#[test]
fn best_fit_is_no_worse_than_fast() {
    let items = || {
        vec![
            ("a", 120, 30),
            ("b", 70, 90),
            ("c", 50, 50),
            ("d", 90, 20),
            ("e", 33, 71),
        ]
    };
    for algorithm in [Algorithm::Shelf, Algorithm::MaxRects] {
        let fast = pack_layout(
            items(),
            &PackingConfig::builder()
                .algorithm(algorithm)
                .size_solver(SizeSolver::Fast)
                .build(),
        )
        .expect("fast pack");
        let best = pack_layout(
            items(),
            &PackingConfig::builder()
                .algorithm(algorithm)
                .size_solver(SizeSolver::BestFit)
                .build(),
        )
        .expect("bestfit pack");
        assert!(
            best.atlas_size.area() <= fast.atlas_size.area(),
            "algorithm {algorithm:?}: bestfit {:?} vs fast {:?}",
            best.atlas_size,
            fast.atlas_size
        );
    }
}

#[test]
fn stats_are_internally_consistent() {
    let cfg = PackingConfig::builder()
        .size_solver(SizeSolver::BestFit)
        .build();
    let out = pack_layout(vec![("a", 30, 40), ("b", 50, 20), ("c", 10, 10)], &cfg).expect("pack");
    let s = out.stats;
    assert_eq!(s.total_image_area, 30 * 40 + 50 * 20 + 10 * 10);
    assert_eq!(s.atlas_area, out.atlas_size.area());
    assert_eq!(s.unused_area, s.atlas_area - s.total_image_area);
    let expected = 100.0 * s.total_image_area as f64 / s.atlas_area as f64;
    assert!((s.packing_efficiency - expected).abs() < 1e-9);
    assert!(s.packing_efficiency <= 100.0 + 1e-9);
}
