//! Seed persistence, so relaunching the game brings back the same island.
//!
//! Native builds keep a small JSON file next to the executable; browser
//! builds use localStorage. Persistence is never fatal: any failure is
//! logged and the game rolls a fresh random island instead.

use bevy::prelude::*;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

const SEED_VERSION: u32 = 1;

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WorldSeed(0))
            .add_systems(PreStartup, load_world_seed)
            .add_systems(Update, persist_world_seed.run_if(resource_changed::<WorldSeed>));
    }
}

/// On-disk / in-storage shape of the persisted seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SeedFile {
    version: u32,
    seed: u64,
}

fn load_world_seed(mut seed: ResMut<WorldSeed>) {
    seed.0 = match read_seed() {
        Ok(Some(saved)) => {
            info!("[Save] resuming island seed {saved}");
            saved
        }
        Ok(None) => thread_rng().gen(),
        Err(err) => {
            warn!("[Save] could not read last seed ({err}); rolling a new island");
            thread_rng().gen()
        }
    };
}

fn persist_world_seed(seed: Res<WorldSeed>) {
    if let Err(err) = write_seed(seed.0) {
        warn!("[Save] could not persist seed {}: {err}", seed.0);
    }
}

fn encode(seed: u64) -> Result<String, String> {
    serde_json::to_string_pretty(&SeedFile {
        version: SEED_VERSION,
        seed,
    })
    .map_err(|e| format!("Serialization failed: {}", e))
}

fn decode(json: &str) -> Result<Option<u64>, String> {
    let file: SeedFile =
        serde_json::from_str(json).map_err(|e| format!("Deserialization failed: {}", e))?;
    if file.version != SEED_VERSION {
        warn!(
            "Saved seed has version {} but current version is {}. Ignoring it.",
            file.version, SEED_VERSION
        );
        return Ok(None);
    }
    Ok(Some(file.seed))
}

// ═══════════════════════════════════════════════════════════════════════
// NATIVE BACKEND
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn saves_directory() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        exe_dir.join("saves")
    }

    fn seed_path() -> PathBuf {
        saves_directory().join("world_seed.json")
    }

    pub fn read_seed() -> Result<Option<u64>, String> {
        let path = seed_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
        decode(&json)
    }

    pub fn write_seed(seed: u64) -> Result<(), String> {
        let dir = saves_directory();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|e| format!("Could not create saves directory: {}", e))?;
        }

        let json = encode(seed)?;
        let path = seed_path();
        // Write to a temp file first, then rename for atomicity
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)
            .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// BROWSER BACKEND
// ═══════════════════════════════════════════════════════════════════════

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    const STORAGE_KEY: &str = "isleholm_world_seed";

    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .ok_or_else(|| "no window".to_string())?
            .local_storage()
            .map_err(|_| "localStorage unavailable".to_string())?
            .ok_or_else(|| "localStorage disabled".to_string())
    }

    pub fn read_seed() -> Result<Option<u64>, String> {
        let raw = storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| "localStorage read failed".to_string())?;
        match raw {
            Some(json) => decode(&json),
            None => Ok(None),
        }
    }

    pub fn write_seed(seed: u64) -> Result<(), String> {
        let json = encode(seed)?;
        storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|_| "localStorage write failed".to_string())
    }
}

use backend::{read_seed, write_seed};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_survives_an_encode_decode_cycle() {
        let json = encode(0xDEAD_BEEF_u64).unwrap();
        assert_eq!(decode(&json).unwrap(), Some(0xDEAD_BEEF_u64));
    }

    #[test]
    fn unknown_versions_are_ignored_not_errors() {
        let json = r#"{ "version": 999, "seed": 42 }"#;
        assert_eq!(decode(json).unwrap(), None);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode("not json at all").is_err());
        assert!(decode(r#"{ "seed": "forty-two" }"#).is_err());
    }
}
