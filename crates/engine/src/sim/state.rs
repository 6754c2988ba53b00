use tracing::info;

use crate::config::EngineConfig;
use crate::content::{Room, World};

use super::inventory::{GameFlags, Inventory, Score};
use super::player::PlayerState;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Narration(String),
    RoomChanged { room: String, name: String },
    ScoreChanged(u32),
    GameOver(String),
    Restored,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub player: PlayerState,
    pub inventory: Inventory,
    pub flags: GameFlags,
    pub score: Score,
    game_over: Option<String>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(world: World, config: &EngineConfig) -> Self {
        let mut player = PlayerState::new(
            world.start_room().clone(),
            world.start_position(),
            config,
        );
        let height_map = world
            .room(world.start_room())
            .and_then(|room| room.height_map.as_ref());
        player.place_at(world.start_position(), height_map, config);

        Self {
            world,
            player,
            inventory: Inventory::default(),
            flags: GameFlags::default(),
            score: Score::default(),
            game_over: None,
            events: Vec::new(),
        }
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(&self.player.current_room)
    }

    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.world.room_mut(&self.player.current_room)
    }

    pub fn narrate(&mut self, text: impl Into<String>) {
        self.events.push(GameEvent::Narration(text.into()));
    }

    pub fn award_points(&mut self, points: u32, reason: &str) {
        let total = self.score.add(points);
        info!(points, total, reason, "points_awarded");
        self.narrate(format!("You just earned {points} points {reason}!"));
        self.events.push(GameEvent::ScoreChanged(total));
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    /// Enters the terminal state. A second trigger keeps the first reason.
    pub fn trigger_game_over(&mut self, reason: impl Into<String>) {
        if self.game_over.is_some() {
            return;
        }
        let reason = reason.into();
        info!(reason = %reason, "game_over");
        self.game_over = Some(reason.clone());
        self.events.push(GameEvent::GameOver(reason));
    }

    pub fn restore(&mut self, config: &EngineConfig) {
        self.game_over = None;
        let start_room = self.world.start_room().clone();
        let start_position = self.world.start_position();
        self.player.current_room = start_room;
        self.player.facing = Default::default();
        let height_map = self.current_room().and_then(|room| room.height_map.clone());
        self.player
            .place_at(start_position, height_map.as_ref(), config);

        self.events.push(GameEvent::Restored);
        if let Some(room) = self.current_room() {
            let changed = GameEvent::RoomChanged {
                room: self.player.current_room.to_string(),
                name: room.name.clone(),
            };
            let description = room.description.clone();
            self.events.push(changed);
            self.narrate(description);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn drain_events_into(&mut self, out: &mut Vec<GameEvent>) {
        out.append(&mut self.events);
    }
}
