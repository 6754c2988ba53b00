use tracing::{debug, info, warn};

use crate::command::CommandInterpreter;
use crate::config::EngineConfig;
use crate::content::{load_world_str, RoomId, World, WorldDef, WorldError};
use crate::sim::{check_exits, GameEvent, GameState, PlayerState};

use super::host::{FrameView, GameHost};
use super::input::{Direction, DirectionalIntent};
use super::narration::Narrator;

/// Every entry point takes `&mut self`, so a command is always applied to
/// completion (including any room change it causes) before the host can
/// submit the next one or tick again.
pub struct GameSession<H: GameHost> {
    config: EngineConfig,
    host: H,
    interpreter: CommandInterpreter,
    narrator: Narrator,
    intent: DirectionalIntent,
    pristine_world: Option<World>,
    state: Option<GameState>,
    pending_events: Vec<GameEvent>,
    warned_idle_tick: bool,
}

impl<H: GameHost> GameSession<H> {
    pub fn new(config: EngineConfig, host: H) -> Self {
        let narrator = Narrator::new(config.narration_ms_per_char);
        Self {
            config,
            host,
            interpreter: CommandInterpreter::new(),
            narrator,
            intent: DirectionalIntent::default(),
            pristine_world: None,
            state: None,
            pending_events: Vec::new(),
            warned_idle_tick: false,
        }
    }

    pub fn load_world(&mut self, def: WorldDef) -> Result<(), WorldError> {
        let world = World::from_def(def)?;
        self.install_world(world);
        Ok(())
    }

    pub fn load_world_json(&mut self, raw: &str) -> Result<(), WorldError> {
        let world = load_world_str(raw)?;
        self.install_world(world);
        Ok(())
    }

    pub fn install_world(&mut self, world: World) {
        info!(
            room_count = world.room_count(),
            start_room = %world.start_room(),
            "world_installed"
        );
        self.pristine_world = Some(world.clone());
        self.narrator.clear();
        self.intent.clear();
        self.warned_idle_tick = false;

        let mut state = GameState::new(world, &self.config);
        announce_current_room(&mut state);
        self.state = Some(state);
        self.flush_events();
    }

    pub fn set_directional_intent(&mut self, direction: Direction, pressed: bool) {
        self.intent.set(direction, pressed);
    }

    pub fn tick(&mut self, timestamp_ms: f64) {
        self.narrator.advance(timestamp_ms);

        let Some(state) = self.state.as_mut() else {
            if !self.warned_idle_tick {
                warn!("tick_without_world");
                self.warned_idle_tick = true;
            }
            return;
        };

        if state.is_game_over() {
            if !self.warned_idle_tick {
                warn!(reason = state.game_over_reason().unwrap_or_default(), "tick_during_game_over");
                self.warned_idle_tick = true;
            }
        } else {
            let height_map = state
                .world
                .room(&state.player.current_room)
                .and_then(|room| room.height_map.as_ref());
            state.player.step(&self.intent, height_map, &self.config);

            // Refusals are logged where they happen; the player stays put.
            if let Ok(Some(report)) = check_exits(state, &self.config) {
                debug!(from = %report.from, to = %report.to, "exit_crossed");
            }
        }

        self.flush_events();
        self.emit_frame(timestamp_ms);
    }

    pub fn submit_command(&mut self, text: &str) {
        let Some(state) = self.state.as_mut() else {
            warn!(command = text, "command_without_world");
            return;
        };
        debug!(command = text, "command_submitted");
        self.interpreter.execute(text, state, &self.config);
        self.flush_events();
    }

    pub fn trigger_game_over(&mut self, reason: &str) {
        let Some(state) = self.state.as_mut() else {
            warn!(reason, "game_over_without_world");
            return;
        };
        state.trigger_game_over(reason);
        self.intent.clear();
        self.flush_events();
    }

    pub fn restore(&mut self) {
        let Some(state) = self.state.as_mut() else {
            warn!("restore_without_world");
            return;
        };
        state.restore(&self.config);
        self.intent.clear();
        self.warned_idle_tick = false;
        self.flush_events();
    }

    pub fn restart(&mut self) {
        let Some(world) = self.pristine_world.clone() else {
            warn!("restart_without_world");
            return;
        };
        info!(start_room = %world.start_room(), "session_restart");
        let mut state = GameState::new(world, &self.config);
        let score = state.score.value();
        state.push_event(GameEvent::ScoreChanged(score));
        state.restore(&self.config);
        self.state = Some(state);
        self.narrator.clear();
        self.intent.clear();
        self.warned_idle_tick = false;
        self.flush_events();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.state.as_ref().map(|state| &state.player)
    }

    pub fn current_room_id(&self) -> Option<&RoomId> {
        self.player().map(|player| &player.current_room)
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |state| state.score.value())
    }

    pub fn is_game_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_game_over)
    }

    fn flush_events(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.drain_events_into(&mut self.pending_events);

        for event in self.pending_events.drain(..) {
            match event {
                GameEvent::Narration(text) => {
                    self.narrator.start(text.as_str());
                    self.host.on_narration(&text);
                }
                GameEvent::RoomChanged { name, .. } => self.host.on_room_changed(&name),
                GameEvent::ScoreChanged(value) => self.host.on_score_changed(value),
                GameEvent::GameOver(reason) => self.host.on_game_over(&reason),
                GameEvent::Restored => self.host.on_restore(),
            }
        }
    }

    fn emit_frame(&mut self, timestamp_ms: f64) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let Some(room) = state.current_room() else {
            return;
        };
        let frame = FrameView {
            timestamp_ms,
            room_id: &state.player.current_room,
            room,
            player: &state.player,
            narration: self.narrator.visible_text(),
            score: state.score.value(),
            max_score: self.config.max_score,
            is_game_over: state.is_game_over(),
        };
        self.host.on_frame(&frame);
    }
}

fn announce_current_room(state: &mut GameState) {
    let Some(room) = state.current_room() else {
        return;
    };
    let event = GameEvent::RoomChanged {
        room: state.player.current_room.to_string(),
        name: room.name.clone(),
    };
    let description = room.description.clone();
    state.push_event(event);
    state.narrate(description);
}
