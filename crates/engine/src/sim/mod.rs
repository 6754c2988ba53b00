mod inventory;
mod player;
mod spatial;
mod state;
mod transition;

pub use inventory::{unlocked_flag, visited_flag, GameFlags, Inventory, InventoryItem, Score};
pub use player::{Facing, PlayerState};
pub use spatial::{
    collides, ground_under, height_at, is_near, is_walkable, sample_points, Rect, Vec2,
};
pub use state::{GameEvent, GameState};
pub use transition::{
    change_room, check_exits, colliding_exit, spawn_point, TransitionError, TransitionReport,
};
