use thiserror::Error;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::content::{Room, RoomId};

use super::inventory::visited_flag;
use super::spatial::{collides, Vec2};
use super::state::{GameEvent, GameState};

const FIRST_VISIT_REASON: &str = "for discovering a new area";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("attempted to change to invalid room: {room}")]
    UnknownRoom { room: RoomId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionReport {
    pub from: RoomId,
    pub to: RoomId,
    pub spawn: Vec2,
    pub first_visit: bool,
}

pub fn colliding_exit(state: &GameState) -> Option<RoomId> {
    let room = state.current_room()?;
    let player_box = state.player.bounds();
    room.objects
        .iter()
        .filter_map(|object| {
            let destination = object.role.exit_destination()?;
            collides(&player_box, &object.bounds).then_some(destination)
        })
        .next()
        .cloned()
}

pub fn check_exits(
    state: &mut GameState,
    config: &EngineConfig,
) -> Result<Option<TransitionReport>, TransitionError> {
    let Some(destination) = colliding_exit(state) else {
        return Ok(None);
    };
    change_room(state, &destination, config).map(Some)
}

pub fn change_room(
    state: &mut GameState,
    destination: &RoomId,
    config: &EngineConfig,
) -> Result<TransitionReport, TransitionError> {
    let Some(room) = state.world.room(destination) else {
        warn!(room = %destination, from = %state.player.current_room, "room_change_refused");
        return Err(TransitionError::UnknownRoom {
            room: destination.clone(),
        });
    };

    let from = std::mem::replace(&mut state.player.current_room, destination.clone());
    let spawn = spawn_point(room, &from, state.player.position, config);
    let height_map = room.height_map.clone();
    let name = room.name.clone();
    let description = room.description.clone();

    state.player.place_at(spawn, height_map.as_ref(), config);
    let spawn = state.player.position;

    state.push_event(GameEvent::RoomChanged {
        room: destination.to_string(),
        name,
    });
    state.narrate(description);

    let first_visit = state.flags.set(visited_flag(destination.as_str()));
    if first_visit {
        state.award_points(config.first_visit_bonus, FIRST_VISIT_REASON);
    }

    info!(
        from = %from,
        to = %destination,
        x = spawn.x,
        y = spawn.y,
        first_visit,
        "room_changed"
    );

    Ok(TransitionReport {
        from,
        to: destination.clone(),
        spawn,
        first_visit,
    })
}

/// A fixed `spawn` wins. Otherwise the player lands opposite the exit leading
/// back to `origin` (or the first exit), per axis; a centered axis keeps `current`.
pub fn spawn_point(room: &Room, origin: &RoomId, current: Vec2, config: &EngineConfig) -> Vec2 {
    if let Some(spawn) = room.spawn {
        return spawn;
    }

    let back_link = room
        .objects
        .iter()
        .find(|object| object.role.destination() == Some(origin))
        .or_else(|| {
            room.objects
                .iter()
                .find(|object| object.role.exit_destination().is_some())
        });
    let Some(exit) = back_link else {
        return current;
    };

    let center = config.surface_center();
    let margin = config.spawn_edge_margin;
    let mut spawn = current;

    if exit.bounds.y < center.y {
        spawn.y = config.surface_height - config.player_height - margin;
    } else if exit.bounds.y > center.y {
        spawn.y = margin;
    }

    if exit.bounds.x < center.x {
        spawn.x = config.surface_width - config.player_width - margin;
    } else if exit.bounds.x > center.x {
        spawn.x = margin;
    }

    spawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{builtin_world, load_world_str};

    fn builtin_state() -> GameState {
        GameState::new(
            builtin_world().expect("builtin world"),
            &EngineConfig::default(),
        )
    }

    fn drain(state: &mut GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        state.drain_events_into(&mut events);
        events
    }

    #[test]
    fn no_collision_means_no_transition() {
        let config = EngineConfig::default();
        let mut state = builtin_state();
        assert_eq!(check_exits(&mut state, &config), Ok(None));
        assert_eq!(state.player.current_room, RoomId::new("forest"));
    }

    #[test]
    fn touching_exit_edge_does_not_trigger() {
        let config = EngineConfig::default();
        let mut state = builtin_state();
        state.player.position = Vec2 { x: 170.0, y: 160.0 };
        assert_eq!(check_exits(&mut state, &config), Ok(None));
    }

    #[test]
    fn round_trip_between_forest_and_cottage() {
        let config = EngineConfig::default();
        let mut state = builtin_state();

        state.player.position = Vec2 { x: 170.0, y: 165.0 };
        let report = check_exits(&mut state, &config)
            .expect("transition")
            .expect("fired");
        assert_eq!(report.to, RoomId::new("cottage"));
        assert!(report.first_visit);
        assert_eq!(state.player.position, Vec2 { x: 170.0, y: 130.0 });

        state.player.position = Vec2 { x: 170.0, y: 5.0 };
        let report = check_exits(&mut state, &config)
            .expect("transition")
            .expect("fired");
        assert_eq!(report.to, RoomId::new("forest"));
        assert_eq!(state.player.position, Vec2 { x: 170.0, y: 40.0 });

        let min = config.playable_min();
        let max = config.playable_max();
        let position = state.player.position;
        assert!(position.x >= min.x && position.x <= max.x);
        assert!(position.y >= min.y && position.y <= max.y);
    }

    #[test]
    fn transition_narrates_room_then_first_visit_bonus_once() {
        let config = EngineConfig::default();
        let mut state = builtin_state();
        let cottage = RoomId::new("cottage");

        change_room(&mut state, &cottage, &config).expect("enter cottage");
        let events = drain(&mut state);
        assert_eq!(
            events,
            vec![
                GameEvent::RoomChanged {
                    room: "cottage".to_string(),
                    name: "Cottage".to_string(),
                },
                GameEvent::Narration(
                    "A small cottage with a wooden door. The path leads back to the forest."
                        .to_string()
                ),
                GameEvent::Narration(
                    "You just earned 5 points for discovering a new area!".to_string()
                ),
                GameEvent::ScoreChanged(5),
            ]
        );
        assert!(state.flags.get("visited_cottage"));

        change_room(&mut state, &RoomId::new("forest"), &config).expect("back to forest");
        assert_eq!(state.score.value(), 10);
        let report = change_room(&mut state, &cottage, &config).expect("cottage again");
        assert!(!report.first_visit);
        assert_eq!(state.score.value(), 10);
    }

    #[test]
    fn unknown_destination_is_refused_without_changes() {
        let config = EngineConfig::default();
        let mut state = builtin_state();
        let before = state.player.clone();

        let error = change_room(&mut state, &RoomId::new("cellar"), &config)
            .expect_err("unknown room");

        assert_eq!(
            error.to_string(),
            "attempted to change to invalid room: cellar"
        );
        assert_eq!(state.player, before);
        assert_eq!(state.pending_event_count(), 0);
    }

    #[test]
    fn fixed_spawn_overrides_geometry() {
        let config = EngineConfig::default();
        let mut state = builtin_state();
        state.player.position = Vec2 { x: 10.0, y: 10.0 };

        let report = change_room(&mut state, &RoomId::new("cottage_interior"), &config)
            .expect("enter interior");

        assert_eq!(report.spawn, Vec2 { x: 160.0, y: 160.0 });
    }

    #[test]
    fn only_first_overlapping_exit_fires() {
        let config = EngineConfig::default();
        let world = load_world_str(
            r#"{
                "start_room": "hub",
                "start_position": {"x": 100, "y": 100},
                "rooms": {
                    "hub": {"name": "Hub", "description": "Crossroads.", "objects": [
                        {"name": "east", "x": 90, "y": 90, "width": 40, "height": 40,
                         "description": "East.", "kind": "exit", "leads_to": "east"},
                        {"name": "west", "x": 90, "y": 90, "width": 40, "height": 40,
                         "description": "West.", "kind": "exit", "leads_to": "west"}
                    ]},
                    "east": {"name": "East", "description": "East room."},
                    "west": {"name": "West", "description": "West room."}
                }
            }"#,
        )
        .expect("world");
        let mut state = GameState::new(world, &config);

        let report = check_exits(&mut state, &config)
            .expect("transition")
            .expect("fired");

        assert_eq!(report.to, RoomId::new("east"));
        assert_eq!(state.score.value(), 5);
    }

    #[test]
    fn spawn_uses_exit_leading_back_to_origin() {
        let config = EngineConfig::default();
        let room: Room = serde_json::from_str(
            r#"{"name": "Yard", "description": "A yard.", "objects": [
                {"name": "gate", "x": 300, "y": 100, "width": 10, "height": 40,
                 "description": "Gate.", "kind": "exit", "leads_to": "road"},
                {"name": "arch", "x": 10, "y": 20, "width": 30, "height": 10,
                 "description": "Arch.", "kind": "exit", "leads_to": "hall"}
            ]}"#,
        )
        .expect("room");
        let current = Vec2 { x: 77.0, y: 88.0 };

        assert_eq!(
            spawn_point(&room, &RoomId::new("hall"), current, &config),
            Vec2 { x: 264.0, y: 130.0 }
        );
        assert_eq!(
            spawn_point(&room, &RoomId::new("road"), current, &config),
            Vec2 { x: 40.0, y: 88.0 }
        );
        assert_eq!(
            spawn_point(&room, &RoomId::new("elsewhere"), current, &config),
            Vec2 { x: 40.0, y: 88.0 }
        );
    }
}
