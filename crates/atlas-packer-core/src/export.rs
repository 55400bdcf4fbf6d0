use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::error::{AtlasPackerError, Result};
use crate::model::Placement;

/// Sidecar metadata shape: `{ "<image_id>": {"x", "y", "width", "height"} }`,
/// keyed by image id, one entry per packed image. This mirrors the JSON file
/// downstream sprite loaders consume next to the atlas image.
pub fn placements_json(placements: &BTreeMap<String, Placement>) -> Value {
    json!(placements)
}

/// Pretty-printed sidecar document.
pub fn placements_json_pretty(placements: &BTreeMap<String, Placement>) -> Result<String> {
    serde_json::to_string_pretty(&placements_json(placements))
        .map_err(|e| AtlasPackerError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_shape_is_flat_by_key() {
        let mut placements = BTreeMap::new();
        placements.insert(
            "hero".to_string(),
            Placement {
                x: 4,
                y: 8,
                width: 16,
                height: 32,
            },
        );
        let v = placements_json(&placements);
        assert_eq!(v["hero"]["x"], 4);
        assert_eq!(v["hero"]["y"], 8);
        assert_eq!(v["hero"]["width"], 16);
        assert_eq!(v["hero"]["height"], 32);
    }
}
