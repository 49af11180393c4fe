//! Terrain → tileset frame assignments.
//!
//! Frame names follow the atlas convention `<kind>_<variant>`. One variant
//! per kind for now; the registry tolerates gaps, so kinds can be mapped
//! incrementally as art lands.

use crate::shared::*;

pub fn populate_tile_frames(registry: &mut TileFrameRegistry) {
    let assignments = [
        (TerrainId::WATER, "water_0"),
        (TerrainId(1), "stone_0"),
        (TerrainId(2), "terrain_0"),
        (TerrainId(3), "sand_0"),
        (TerrainId(4), "grass_0"),
        (TerrainId(5), "snow_0"),
    ];

    for (id, frame) in assignments {
        registry.frames.insert(id, frame.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_generated_terrain_kind_has_a_frame() {
        let mut registry = TileFrameRegistry::default();
        populate_tile_frames(&mut registry);

        for id in 0..TERRAIN_KINDS {
            assert!(
                registry.get(TerrainId(id)).is_some(),
                "terrain {id} has no frame"
            );
        }
    }

    #[test]
    fn water_maps_to_the_water_frame() {
        let mut registry = TileFrameRegistry::default();
        populate_tile_frames(&mut registry);
        assert_eq!(registry.get(TerrainId::WATER), Some("water_0"));
    }
}
