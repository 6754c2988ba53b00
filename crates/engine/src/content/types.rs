use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::sim::{Rect, Vec2};

pub const LEGACY_UNWALKABLE_SENTINEL: f32 = -999.0;

pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawElevation")]
pub enum Elevation {
    Level(f32),
    Unwalkable,
}

impl Elevation {
    pub fn level(self) -> Option<f32> {
        match self {
            Self::Level(level) => Some(level),
            Self::Unwalkable => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawElevation {
    Level(f32),
    Keyword(String),
}

impl TryFrom<RawElevation> for Elevation {
    type Error = String;

    fn try_from(raw: RawElevation) -> Result<Self, Self::Error> {
        match raw {
            RawElevation::Level(level) if level == LEGACY_UNWALKABLE_SENTINEL => {
                Ok(Self::Unwalkable)
            }
            RawElevation::Level(level) if !level.is_finite() => {
                Err(format!("elevation must be finite, got {level}"))
            }
            RawElevation::Level(level) => Ok(Self::Level(level)),
            RawElevation::Keyword(keyword) if keyword.eq_ignore_ascii_case("unwalkable") => {
                Ok(Self::Unwalkable)
            }
            RawElevation::Keyword(keyword) => Err(format!(
                "unknown elevation '{keyword}' (expected a number or \"unwalkable\")"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeightVariation {
    #[serde(flatten)]
    pub area: Rect,
    pub elevation: Elevation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeightMap {
    #[serde(default)]
    pub base: f32,
    #[serde(default)]
    pub variations: Vec<HeightVariation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectRole {
    Scenery,
    Item {
        #[serde(default)]
        tags: Vec<String>,
    },
    Exit {
        leads_to: RoomId,
    },
    Door {
        #[serde(default)]
        leads_to: Option<RoomId>,
        #[serde(default)]
        requires: Option<String>,
    },
}

impl ObjectRole {
    pub fn is_takeable(&self) -> bool {
        matches!(self, Self::Item { .. })
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Self::Door { .. })
    }

    pub fn exit_destination(&self) -> Option<&RoomId> {
        match self {
            Self::Exit { leads_to } => Some(leads_to),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<&RoomId> {
        match self {
            Self::Exit { leads_to } => Some(leads_to),
            Self::Door { leads_to, .. } => leads_to.as_ref(),
            Self::Scenery | Self::Item { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameObject {
    pub name: String,
    #[serde(flatten)]
    pub bounds: Rect,
    pub description: String,
    #[serde(flatten)]
    pub role: ObjectRole,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Npc {
    pub name: String,
    #[serde(flatten)]
    pub bounds: Rect,
    pub description: String,
    pub dialogue: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub objects: Vec<GameObject>,
    #[serde(default)]
    pub npcs: Vec<Npc>,
    #[serde(default)]
    pub height_map: Option<HeightMap>,
    #[serde(default)]
    pub spawn: Option<Vec2>,
    #[serde(default)]
    pub structure: Option<String>,
}

impl Room {
    pub fn find_object(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|object| names_match(&object.name, name))
    }

    pub fn find_npc(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|npc| names_match(&npc.name, name))
    }

    pub fn find_door(&self) -> Option<&GameObject> {
        self.objects.iter().find(|object| {
            object.role.is_door()
                || (object.role.exit_destination().is_some() && names_match(&object.name, "door"))
        })
    }

    pub fn remove_object(&mut self, name: &str) -> Option<GameObject> {
        let index = self
            .objects
            .iter()
            .position(|object| names_match(&object.name, name))?;
        Some(self.objects.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemGrant {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Award {
    pub points: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedReaction {
    pub item: String,
    pub room: RoomId,
    #[serde(default)]
    pub near_npc: Option<String>,
    pub narration: String,
    #[serde(default = "default_consumes_item")]
    pub consumes_item: bool,
    #[serde(default)]
    pub grants: Option<ItemGrant>,
    #[serde(default)]
    pub award: Option<Award>,
    #[serde(default)]
    pub ends_game: Option<String>,
}

fn default_consumes_item() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldDef {
    pub start_room: RoomId,
    pub start_position: Vec2,
    pub rooms: BTreeMap<RoomId, Room>,
    #[serde(default)]
    pub reactions: Vec<ScriptedReaction>,
}
