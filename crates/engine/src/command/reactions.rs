use tracing::info;

use crate::config::EngineConfig;
use crate::content::{names_match, ScriptedReaction};
use crate::sim::{GameState, InventoryItem};

pub fn find_reaction<'a>(
    state: &'a GameState,
    item: &str,
    config: &EngineConfig,
) -> Option<&'a ScriptedReaction> {
    let room = state.current_room()?;
    state.world.reactions().iter().find(|reaction| {
        if !names_match(&reaction.item, item) || reaction.room != state.player.current_room {
            return false;
        }
        match &reaction.near_npc {
            None => true,
            Some(npc_name) => room
                .find_npc(npc_name)
                .is_some_and(|npc| state.player.is_near(&npc.bounds, config.near_distance)),
        }
    })
}

pub fn apply_reaction(state: &mut GameState, reaction: &ScriptedReaction) {
    info!(
        item = %reaction.item,
        room = %reaction.room,
        "scripted_reaction"
    );

    if reaction.consumes_item {
        state.inventory.remove(&reaction.item);
    }
    state.narrate(reaction.narration.clone());
    if let Some(grant) = &reaction.grants {
        state.inventory.add(InventoryItem::from_grant(grant));
    }
    if let Some(award) = &reaction.award {
        state.award_points(award.points, &award.reason);
    }
    if let Some(reason) = &reaction.ends_game {
        state.trigger_game_over(reason.clone());
    }
}

pub fn try_react(state: &mut GameState, item: &str, config: &EngineConfig) -> bool {
    let Some(reaction) = find_reaction(state, item, config).cloned() else {
        return false;
    };
    apply_reaction(state, &reaction);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{builtin_world, load_world_str};
    use crate::sim::{GameEvent, Vec2};

    fn forest_state_with_pendant() -> GameState {
        let mut state = GameState::new(
            builtin_world().expect("builtin world"),
            &EngineConfig::default(),
        );
        state.inventory.add(InventoryItem {
            name: "pendant".to_string(),
            description: "A golden pendant.".to_string(),
            can_take: true,
            tags: Vec::new(),
        });
        state
    }

    #[test]
    fn reaction_requires_npc_proximity() {
        let config = EngineConfig::default();
        let mut state = forest_state_with_pendant();
        state.player.position = Vec2 { x: 20.0, y: 20.0 };
        assert!(find_reaction(&state, "pendant", &config).is_none());

        state.player.position = Vec2 { x: 250.0, y: 130.0 };
        assert!(find_reaction(&state, "PENDANT", &config).is_some());
    }

    #[test]
    fn reaction_is_scoped_to_its_room() {
        let config = EngineConfig::default();
        let mut state = forest_state_with_pendant();
        state.player.current_room = crate::content::RoomId::new("cottage");
        state.player.position = Vec2 { x: 250.0, y: 130.0 };
        assert!(find_reaction(&state, "pendant", &config).is_none());
    }

    #[test]
    fn pendant_reaction_swaps_item_and_awards_points() {
        let config = EngineConfig::default();
        let mut state = forest_state_with_pendant();
        state.player.position = Vec2 { x: 250.0, y: 130.0 };

        assert!(try_react(&mut state, "pendant", &config));

        assert!(!state.inventory.has("pendant"));
        let key = state.inventory.find("magic key").expect("magic key granted");
        assert!(key.has_tag("magic"));
        assert_eq!(state.score.value(), 10);

        let mut events = Vec::new();
        state.drain_events_into(&mut events);
        assert!(matches!(&events[0], GameEvent::Narration(text) if text.starts_with("The old man takes the pendant.")));
        assert_eq!(
            events[1],
            GameEvent::Narration("You just earned 10 points for returning the pendant!".to_string())
        );
    }

    #[test]
    fn reaction_can_keep_item_and_end_the_game() {
        let config = EngineConfig::default();
        let world = load_world_str(
            r#"{
                "start_room": "bridge",
                "start_position": {"x": 100, "y": 100},
                "rooms": {"bridge": {"name": "Bridge", "description": "A rickety bridge."}},
                "reactions": [{"item": "anvil", "room": "bridge",
                    "narration": "The bridge gives way.", "consumes_item": false,
                    "ends_game": "You fell into the river."}]
            }"#,
        )
        .expect("world");
        let mut state = GameState::new(world, &config);
        state.inventory.add(InventoryItem {
            name: "anvil".to_string(),
            description: "Heavy.".to_string(),
            can_take: true,
            tags: Vec::new(),
        });

        assert!(try_react(&mut state, "anvil", &config));

        assert!(state.inventory.has("anvil"));
        assert_eq!(state.game_over_reason(), Some("You fell into the river."));
    }
}
