use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::database::World;
use super::hashing::hash_world_source;
use super::types::{RoomId, WorldDef};

pub const BUILTIN_WORLD_JSON: &str = include_str!("../../../../assets/base/world.json");

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read world file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse world json: {message}")]
    Parse { message: String },
    #[error("parse world json at {path}: {message}")]
    ParseAt { path: String, message: String },
    #[error("world defines no rooms")]
    NoRooms,
    #[error("start room '{room}' does not exist")]
    UnknownStartRoom { room: RoomId },
    #[error("object '{object}' in room '{room}' leads to unknown room '{target}'")]
    DanglingExit {
        room: RoomId,
        object: String,
        target: RoomId,
    },
    #[error("invalid bounds for '{entity}' in room '{room}': {reason}")]
    InvalidBounds {
        room: RoomId,
        entity: String,
        reason: String,
    },
    #[error("scripted reaction for item '{item}' names unknown room '{room}'")]
    UnknownReactionRoom { item: String, room: RoomId },
    #[error("scripted reaction for item '{item}' in room '{room}' expects unknown npc '{npc}'")]
    UnknownReactionNpc {
        item: String,
        room: RoomId,
        npc: String,
    },
}

pub fn parse_world_json(raw: &str) -> Result<WorldDef, WorldError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, WorldDef>(&mut deserializer) {
        Ok(def) => Ok(def),
        Err(error) => {
            let path = error.path().to_string();
            let message = error.into_inner().to_string();
            if path.is_empty() || path == "." {
                Err(WorldError::Parse { message })
            } else {
                Err(WorldError::ParseAt { path, message })
            }
        }
    }
}

pub fn load_world_str(raw: &str) -> Result<World, WorldError> {
    let world = World::from_def(parse_world_json(raw)?)?;
    info!(
        room_count = world.room_count(),
        start_room = %world.start_room(),
        content_hash = %hash_world_source(raw),
        "world_loaded"
    );
    Ok(world)
}

pub fn load_world_file(path: &Path) -> Result<World, WorldError> {
    let raw = fs::read_to_string(path).map_err(|source| WorldError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    load_world_str(&raw)
}

pub fn builtin_world() -> Result<World, WorldError> {
    load_world_str(BUILTIN_WORLD_JSON)
}

pub(crate) fn validate_world_def(def: &WorldDef) -> Result<(), WorldError> {
    if def.rooms.is_empty() {
        return Err(WorldError::NoRooms);
    }
    if !def.rooms.contains_key(&def.start_room) {
        return Err(WorldError::UnknownStartRoom {
            room: def.start_room.clone(),
        });
    }

    for (room_id, room) in &def.rooms {
        let boxes = room
            .objects
            .iter()
            .map(|object| (&object.name, &object.bounds))
            .chain(room.npcs.iter().map(|npc| (&npc.name, &npc.bounds)));
        for (name, bounds) in boxes {
            if bounds.width < 0.0 || bounds.height < 0.0 {
                return Err(WorldError::InvalidBounds {
                    room: room_id.clone(),
                    entity: name.clone(),
                    reason: format!(
                        "expected non-negative size, got {}x{}",
                        bounds.width, bounds.height
                    ),
                });
            }
        }

        for object in &room.objects {
            let Some(target) = object.role.destination() else {
                continue;
            };
            if !def.rooms.contains_key(target) {
                return Err(WorldError::DanglingExit {
                    room: room_id.clone(),
                    object: object.name.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    for reaction in &def.reactions {
        let Some(room) = def.rooms.get(&reaction.room) else {
            return Err(WorldError::UnknownReactionRoom {
                item: reaction.item.clone(),
                room: reaction.room.clone(),
            });
        };
        if let Some(npc) = &reaction.near_npc {
            if room.find_npc(npc).is_none() {
                return Err(WorldError::UnknownReactionNpc {
                    item: reaction.item.clone(),
                    room: reaction.room.clone(),
                    npc: npc.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const TWO_ROOMS: &str = r#"{
        "start_room": "hall",
        "start_position": {"x": 10, "y": 10},
        "rooms": {
            "hall": {
                "name": "Hall",
                "description": "A hall.",
                "objects": [
                    {"name": "arch", "x": 0, "y": 0, "width": 10, "height": 10,
                     "description": "An arch.", "kind": "exit", "leads_to": "yard"}
                ]
            },
            "yard": {"name": "Yard", "description": "A yard."}
        }
    }"#;

    #[test]
    fn builtin_world_loads_and_validates() {
        let world = builtin_world().expect("builtin world");
        assert_eq!(world.start_room(), &RoomId::new("forest"));
        assert!(world.room(&RoomId::new("cottage")).is_some());
        assert!(world.room(&RoomId::new("cottage_interior")).is_some());
        assert_eq!(world.reactions().len(), 1);
    }

    #[test]
    fn valid_world_parses() {
        let world = load_world_str(TWO_ROOMS).expect("world");
        assert_eq!(world.room_count(), 2);
    }

    #[test]
    fn dangling_exit_is_rejected() {
        let raw = TWO_ROOMS.replace("\"leads_to\": \"yard\"", "\"leads_to\": \"cellar\"");
        let error = load_world_str(&raw).expect_err("dangling exit");
        assert!(matches!(
            error,
            WorldError::DanglingExit { ref target, .. } if target.as_str() == "cellar"
        ));
    }

    #[test]
    fn unknown_start_room_is_rejected() {
        let raw = TWO_ROOMS.replace("\"start_room\": \"hall\"", "\"start_room\": \"attic\"");
        assert!(matches!(
            load_world_str(&raw),
            Err(WorldError::UnknownStartRoom { .. })
        ));
    }

    #[test]
    fn parse_errors_report_json_path() {
        let raw = TWO_ROOMS.replace("\"name\": \"Yard\", ", "");
        let error = load_world_str(&raw).expect_err("missing name");
        let message = error.to_string();
        assert!(matches!(error, WorldError::ParseAt { .. }), "{message}");
        assert!(message.contains("rooms"), "{message}");
        assert!(message.contains("missing field `name`"), "{message}");
    }

    #[test]
    fn reaction_must_name_existing_room_and_npc() {
        let with_reaction = TWO_ROOMS.replace(
            "\"rooms\": {",
            r#""reactions": [{"item": "coin", "room": "yard", "near_npc": "guard",
                "narration": "The guard nods."}],
              "rooms": {"#,
        );
        assert!(matches!(
            load_world_str(&with_reaction),
            Err(WorldError::UnknownReactionNpc { ref npc, .. }) if npc == "guard"
        ));

        let wrong_room = with_reaction.replace("\"room\": \"yard\"", "\"room\": \"moat\"");
        assert!(matches!(
            load_world_str(&wrong_room),
            Err(WorldError::UnknownReactionRoom { .. })
        ));
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let raw = TWO_ROOMS.replace("\"width\": 10", "\"width\": -1");
        assert!(matches!(
            load_world_str(&raw),
            Err(WorldError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn world_file_round_trips_through_disk() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("world.json");
        fs::write(&path, TWO_ROOMS).expect("write world");

        let world = load_world_file(&path).expect("load");
        assert!(world.room(&RoomId::new("yard")).is_some());

        let missing = temp.path().join("missing.json");
        assert!(matches!(
            load_world_file(&missing),
            Err(WorldError::ReadFile { .. })
        ));
    }
}
