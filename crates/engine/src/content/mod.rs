mod database;
mod hashing;
mod loader;
mod types;

pub use database::World;
pub use hashing::hash_world_source;
pub use loader::{
    builtin_world, load_world_file, load_world_str, parse_world_json, WorldError,
    BUILTIN_WORLD_JSON,
};
pub use types::{
    names_match, Award, Elevation, GameObject, HeightMap, HeightVariation, ItemGrant, Npc,
    ObjectRole, Room, RoomId, ScriptedReaction, WorldDef, LEGACY_UNWALKABLE_SENTINEL,
};
