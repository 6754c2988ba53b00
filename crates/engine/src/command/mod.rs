mod reactions;
mod registry;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::content::{names_match, GameObject, ObjectRole};
use crate::sim::{change_room, unlocked_flag, GameState, InventoryItem};

pub use reactions::{apply_reaction, find_reaction, try_react};
pub use registry::{CommandParseError, ParsedCommand, VerbRegistry, VerbSpec};

pub const EMPTY_COMMAND_REPLY: &str = "Please enter a command.";
pub const UNKNOWN_COMMAND_REPLY: &str = "I don't understand that command.";
pub const NOT_HERE_REPLY: &str = "You don't see that here.";
pub const GAME_OVER_REPLY: &str = "The game is over. Restore to keep playing.";

pub struct CommandInterpreter {
    registry: VerbRegistry,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::with_registry(VerbRegistry::with_builtin_verbs())
    }

    pub fn with_registry(registry: VerbRegistry) -> Self {
        Self { registry }
    }

    pub fn execute(&self, line: &str, state: &mut GameState, config: &EngineConfig) {
        if state.is_game_over() {
            state.narrate(GAME_OVER_REPLY);
            return;
        }

        let line = line.trim().to_lowercase();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = tokens.split_first() else {
            state.narrate(EMPTY_COMMAND_REPLY);
            return;
        };

        let Some(spec) = self.registry.lookup(verb) else {
            debug!(verb = %verb, "unknown_verb");
            state.narrate(UNKNOWN_COMMAND_REPLY);
            return;
        };

        match spec.parse(args) {
            Ok(command) => {
                debug!(command = ?command, "command_parsed");
                self.apply(command, state, config);
            }
            Err(error) => state.narrate(error.prompt()),
        }
    }

    fn apply(&self, command: ParsedCommand, state: &mut GameState, config: &EngineConfig) {
        match command {
            ParsedCommand::Look { target: None } => look_around(state),
            ParsedCommand::Look {
                target: Some(target),
            } => look_at(state, &target),
            ParsedCommand::Take { item } => take(state, &item),
            ParsedCommand::Use { item } => use_item(state, &item, config),
            ParsedCommand::Open { target } => {
                if names_match(&target, "door") {
                    use_door(state, config);
                } else {
                    state.narrate(format!("You can't open the {target}."));
                }
            }
            ParsedCommand::Enter { target } => {
                let is_structure = state
                    .current_room()
                    .and_then(|room| room.structure.as_deref())
                    .is_some_and(|structure| names_match(structure, &target));
                if names_match(&target, "door") || is_structure {
                    use_door(state, config);
                } else {
                    state.narrate(format!("You can't enter the {target}."));
                }
            }
            ParsedCommand::TalkTo { npc } => talk_to(state, &npc, config),
            ParsedCommand::Inventory => show_inventory(state),
            ParsedCommand::Help => state.narrate(self.registry.help_summary()),
        }
    }
}

fn look_around(state: &mut GameState) {
    let description = state
        .current_room()
        .map(|room| room.description.clone())
        .unwrap_or_default();
    state.narrate(description);
}

fn look_at(state: &mut GameState, target: &str) {
    let room = state.current_room();
    let description = room
        .and_then(|room| room.find_object(target))
        .map(|object| object.description.clone())
        .or_else(|| {
            room.and_then(|room| room.find_npc(target))
                .map(|npc| npc.description.clone())
        })
        .or_else(|| {
            state
                .inventory
                .find(target)
                .map(|item| item.description.clone())
        });

    match description {
        Some(description) => state.narrate(description),
        None => state.narrate(NOT_HERE_REPLY),
    }
}

fn take(state: &mut GameState, name: &str) {
    let Some(room) = state.current_room_mut() else {
        state.narrate(NOT_HERE_REPLY);
        return;
    };

    let Some(object) = room.find_object(name) else {
        state.narrate(NOT_HERE_REPLY);
        return;
    };
    if !object.role.is_takeable() {
        let refusal = format!("You can't take the {}.", object.name);
        state.narrate(refusal);
        return;
    }

    let Some(object) = room.remove_object(name) else {
        state.narrate(NOT_HERE_REPLY);
        return;
    };
    let item = InventoryItem::from_object(&object);
    debug!(item = %item.name, room = %state.player.current_room, "item_taken");
    state.narrate(format!("You take the {}.", item.name));
    state.inventory.add(item);
}

fn use_item(state: &mut GameState, name: &str, config: &EngineConfig) {
    if names_match(name, "door") {
        use_door(state, config);
        return;
    }
    if !state.inventory.has(name) {
        state.narrate(format!("You don't have a {name}."));
        return;
    }
    if reactions::try_react(state, name, config) {
        return;
    }
    state.narrate(format!("You used the {name}, but nothing happens."));
}

fn talk_to(state: &mut GameState, name: &str, config: &EngineConfig) {
    let Some(npc) = state.current_room().and_then(|room| room.find_npc(name)) else {
        state.narrate(format!("You don't see {name} here."));
        return;
    };

    let reply = if state.player.is_near(&npc.bounds, config.near_distance) {
        format!("{} says: \"{}\"", npc.name, npc.dialogue)
    } else {
        format!("You need to get closer to {}.", npc.name)
    };
    state.narrate(reply);
}

fn show_inventory(state: &mut GameState) {
    if state.inventory.is_empty() {
        state.narrate("Your inventory is empty.");
        return;
    }
    let names: Vec<&str> = state
        .inventory
        .items()
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    let listing = format!("Inventory: {}", names.join(", "));
    state.narrate(listing);
}

fn use_door(state: &mut GameState, config: &EngineConfig) {
    let Some(door) = state.current_room().and_then(|room| room.find_door()).cloned() else {
        state.narrate("There is no door here.");
        return;
    };

    if !state
        .player
        .is_near(&door.bounds, config.door_near_distance)
    {
        state.narrate("You need to get closer to the door.");
        return;
    }

    if !unlock_if_needed(state, &door) {
        return;
    }

    let Some(destination) = door.role.destination().cloned() else {
        state.narrate(format!("The {} won't open.", door.name));
        return;
    };
    if let Err(error) = change_room(state, &destination, config) {
        warn!(error = %error, door = %door.name, "door_transition_failed");
        state.narrate(format!("The {} won't open.", door.name));
    }
}

fn unlock_if_needed(state: &mut GameState, door: &GameObject) -> bool {
    let ObjectRole::Door {
        requires: Some(required),
        ..
    } = &door.role
    else {
        return true;
    };

    let flag = unlocked_flag(state.player.current_room.as_str(), &door.name);
    if state.flags.get(&flag) {
        return true;
    }
    if !state.inventory.has(required) {
        state.narrate(format!("The {} is locked.", door.name));
        return false;
    }

    state.flags.set(flag);
    state.narrate(format!("You unlock the {} with the {required}.", door.name));
    true
}
