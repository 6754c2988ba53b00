use std::collections::BTreeMap;

use crate::sim::Vec2;

use super::loader::{validate_world_def, WorldError};
use super::types::{Room, RoomId, ScriptedReaction, WorldDef};

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    start_room: RoomId,
    start_position: Vec2,
    rooms: BTreeMap<RoomId, Room>,
    reactions: Vec<ScriptedReaction>,
}

impl World {
    pub fn from_def(def: WorldDef) -> Result<Self, WorldError> {
        validate_world_def(&def)?;
        Ok(Self {
            start_room: def.start_room,
            start_position: def.start_position,
            rooms: def.rooms,
            reactions: def.reactions,
        })
    }

    pub fn start_room(&self) -> &RoomId {
        &self.start_room
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn reactions(&self) -> &[ScriptedReaction] {
        &self.reactions
    }
}
