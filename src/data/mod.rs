//! Data layer — populates the tile frame registry at startup.
//!
//! Runs in OnEnter(GameState::Loading), fills the TileFrameRegistry from
//! the tileset assignments in the submodule, then transitions the game into
//! GameState::Playing. No other domain needs to seed the registry; world
//! spawning can safely read it once GameState has advanced past Loading.

mod tiles;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut frame_registry: ResMut<TileFrameRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    tiles::populate_tile_frames(&mut frame_registry);
    info!("  Tile frames loaded: {}", frame_registry.frames.len());

    next_state.set(GameState::Playing);
}
