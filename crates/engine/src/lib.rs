pub mod app;
pub mod command;
pub mod config;
pub mod content;
pub mod sim;

pub use app::{
    Direction, DirectionalIntent, FrameView, GameHost, GameSession, Narrator, RecordingHost,
    RevealHandle, RevealTask,
};
pub use command::{CommandInterpreter, CommandParseError, ParsedCommand, VerbRegistry};
pub use config::EngineConfig;
pub use content::{
    builtin_world, load_world_file, load_world_str, parse_world_json, Elevation, GameObject,
    HeightMap, Npc, ObjectRole, Room, RoomId, ScriptedReaction, World, WorldDef, WorldError,
};
pub use sim::{
    Facing, GameEvent, GameFlags, GameState, Inventory, InventoryItem, PlayerState, Rect, Score,
    TransitionError, Vec2,
};
