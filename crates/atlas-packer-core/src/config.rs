use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Hard ceiling on atlas dimensions in either axis.
pub const MAX_DIMENSION: i32 = 4096;
/// Maximum pixel gap enforceable between placed images.
pub const MAX_PADDING: i32 = 32;
/// Cap on the number of input images accepted by a single pack call.
pub const MAX_IMAGES: usize = 512;

/// Rectangle placement algorithms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-fit-decreasing-height shelves. Fast, lower density.
    Shelf,
    /// MaxRects with best-short-side-fit. Denser, O(n²) worst case.
    MaxRects,
}

impl FromStr for Algorithm {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shelf" => Ok(Self::Shelf),
            "maxrects" => Ok(Self::MaxRects),
            _ => Err(()),
        }
    }
}

/// Strategies for choosing the atlas dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeSolver {
    /// Exactly `fixed_width` x `fixed_height`; no growth on failure.
    Fixed,
    /// One candidate seeded near the summed image area, grown in place on failure.
    Fast,
    /// Exhaustive per-height enumeration of minimal widths, tried in ascending
    /// area order. Slowest, tightest fit.
    BestFit,
}

impl FromStr for SizeSolver {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "fast" => Ok(Self::Fast),
            "bestfit" | "best_fit" => Ok(Self::BestFit),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackingConfig {
    /// Placement algorithm.
    pub algorithm: Algorithm,
    /// Atlas size search strategy.
    pub size_solver: SizeSolver,
    /// Maximum atlas width in pixels (clamped to [1, 4096]).
    pub max_width: i32,
    /// Maximum atlas height in pixels (clamped to [1, 4096]).
    pub max_height: i32,
    /// Atlas width when `size_solver` is `Fixed`; ignored otherwise.
    pub fixed_width: i32,
    /// Atlas height when `size_solver` is `Fixed`; ignored otherwise.
    pub fixed_height: i32,
    /// Require a square atlas. Meaningful only for the searching solvers.
    pub force_square: bool,
    /// Require power-of-two atlas dimensions. Meaningful only for the
    /// searching solvers.
    pub power_of_two: bool,
    /// Minimum pixel gap between any two placed images (clamped to [0, 32]).
    pub padding: i32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Shelf,
            size_solver: SizeSolver::Fast,
            max_width: MAX_DIMENSION,
            max_height: MAX_DIMENSION,
            fixed_width: 1024,
            fixed_height: 1024,
            force_square: false,
            power_of_two: false,
            padding: 0,
        }
    }
}

impl PackingConfig {
    /// Create a fluent builder for `PackingConfig`.
    pub fn builder() -> PackingConfigBuilder {
        PackingConfigBuilder::new()
    }

    /// Validates and normalizes the configuration for one pack call.
    ///
    /// Out-of-range `padding` and `max_width`/`max_height` are clamped with a
    /// warning rather than rejected; `force_square`/`power_of_two` under the
    /// `Fixed` solver are warned about and ignored. Returns an error only for
    /// configurations with no sensible interpretation (non-positive fixed
    /// dimensions, fixed size above the maximums).
    pub fn normalized(&self) -> crate::error::Result<PackingConfig> {
        use crate::error::AtlasPackerError;

        let mut cfg = self.clone();

        if cfg.max_width <= 0 || cfg.max_height <= 0 {
            return Err(AtlasPackerError::InvalidConfig(format!(
                "max dimensions must be positive, got {}x{}",
                cfg.max_width, cfg.max_height
            )));
        }
        if cfg.max_width > MAX_DIMENSION || cfg.max_height > MAX_DIMENSION {
            warn!(
                max_width = cfg.max_width,
                max_height = cfg.max_height,
                "max dimensions clamped to {}", MAX_DIMENSION
            );
            cfg.max_width = cfg.max_width.min(MAX_DIMENSION);
            cfg.max_height = cfg.max_height.min(MAX_DIMENSION);
        }

        if !(0..=MAX_PADDING).contains(&cfg.padding) {
            warn!(padding = cfg.padding, "padding clamped to [0, {}]", MAX_PADDING);
            cfg.padding = cfg.padding.clamp(0, MAX_PADDING);
        }

        if cfg.size_solver == SizeSolver::Fixed {
            if cfg.fixed_width <= 0 || cfg.fixed_height <= 0 {
                return Err(AtlasPackerError::InvalidConfig(format!(
                    "fixed dimensions must be positive, got {}x{}",
                    cfg.fixed_width, cfg.fixed_height
                )));
            }
            if cfg.fixed_width > cfg.max_width || cfg.fixed_height > cfg.max_height {
                return Err(AtlasPackerError::InvalidConfig(format!(
                    "fixed dimensions {}x{} exceed max dimensions {}x{}",
                    cfg.fixed_width, cfg.fixed_height, cfg.max_width, cfg.max_height
                )));
            }
            if cfg.force_square || cfg.power_of_two {
                warn!("force_square/power_of_two have no effect with the Fixed solver");
            }
        }

        Ok(cfg)
    }
}

/// Builder for `PackingConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackingConfigBuilder {
    cfg: PackingConfig,
}

impl PackingConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackingConfig::default(),
        }
    }
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.cfg.algorithm = v;
        self
    }
    pub fn size_solver(mut self, v: SizeSolver) -> Self {
        self.cfg.size_solver = v;
        self
    }
    pub fn max_dimensions(mut self, w: i32, h: i32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn fixed_dimensions(mut self, w: i32, h: i32) -> Self {
        self.cfg.fixed_width = w;
        self.cfg.fixed_height = h;
        self
    }
    pub fn force_square(mut self, v: bool) -> Self {
        self.cfg.force_square = v;
        self
    }
    pub fn power_of_two(mut self, v: bool) -> Self {
        self.cfg.power_of_two = v;
        self
    }
    pub fn padding(mut self, v: i32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn build(self) -> PackingConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_padding_and_max_dims() {
        let cfg = PackingConfig {
            padding: 100,
            max_width: 10_000,
            max_height: 10_000,
            ..Default::default()
        };
        let cfg = cfg.normalized().unwrap();
        assert_eq!(cfg.padding, MAX_PADDING);
        assert_eq!(cfg.max_width, MAX_DIMENSION);
        assert_eq!(cfg.max_height, MAX_DIMENSION);
    }

    #[test]
    fn normalized_rejects_bad_fixed_dims() {
        let cfg = PackingConfig {
            size_solver: SizeSolver::Fixed,
            fixed_width: 0,
            ..Default::default()
        };
        assert!(cfg.normalized().is_err());

        let cfg = PackingConfig {
            size_solver: SizeSolver::Fixed,
            fixed_width: 8192,
            fixed_height: 64,
            ..Default::default()
        };
        assert!(cfg.normalized().is_err());
    }

    #[test]
    fn enums_parse_from_str() {
        assert_eq!("maxrects".parse::<Algorithm>(), Ok(Algorithm::MaxRects));
        assert_eq!("best_fit".parse::<SizeSolver>(), Ok(SizeSolver::BestFit));
        assert!("skyline".parse::<Algorithm>().is_err());
    }
}
