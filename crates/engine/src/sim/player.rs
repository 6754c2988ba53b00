use crate::app::DirectionalIntent;
use crate::config::EngineConfig;
use crate::content::{HeightMap, RoomId};

use super::spatial::{ground_under, is_near, is_walkable, Rect, Vec2};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn from_delta(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if delta.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub elevation: f32,
    pub vertical_velocity: f32,
    pub ground_elevation: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub facing: Facing,
    pub current_room: RoomId,
}

impl PlayerState {
    pub fn new(current_room: RoomId, position: Vec2, config: &EngineConfig) -> Self {
        Self {
            position,
            elevation: 0.0,
            vertical_velocity: 0.0,
            ground_elevation: 0.0,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
            facing: Facing::default(),
            current_room,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, self.width, self.height)
    }

    pub fn is_near(&self, target: &Rect, max_distance: f32) -> bool {
        is_near(self.position, target.origin(), max_distance)
    }

    pub fn step(
        &mut self,
        intent: &DirectionalIntent,
        height_map: Option<&HeightMap>,
        config: &EngineConfig,
    ) {
        let delta = intent.delta(self.speed);
        let candidate = self.bounds().translated(delta);

        if is_walkable(
            &candidate,
            height_map,
            self.elevation,
            config.max_step_height,
            config.height_sample_inset,
        ) {
            self.position = candidate.origin();
            self.ground_elevation = ground_level(&candidate, height_map, config);
        }

        self.vertical_velocity -= config.gravity;
        self.elevation += self.vertical_velocity;
        if self.elevation <= self.ground_elevation {
            self.elevation = self.ground_elevation;
            self.vertical_velocity = 0.0;
        }

        if !delta.is_zero() {
            self.facing = Facing::from_delta(delta);
        }

        self.clamp_to_surface(config);
    }

    pub fn place_at(
        &mut self,
        position: Vec2,
        height_map: Option<&HeightMap>,
        config: &EngineConfig,
    ) {
        self.position = position;
        self.clamp_to_surface(config);
        self.ground_elevation = ground_level(&self.bounds(), height_map, config);
        self.elevation = self.ground_elevation;
        self.vertical_velocity = 0.0;
    }

    pub fn clamp_to_surface(&mut self, config: &EngineConfig) {
        let min = config.playable_min();
        let max = config.playable_max();
        self.position.x = self.position.x.clamp(min.x, max.x);
        self.position.y = self.position.y.clamp(min.y, max.y);
    }
}

fn ground_level(bounds: &Rect, height_map: Option<&HeightMap>, config: &EngineConfig) -> f32 {
    height_map
        .and_then(|map| ground_under(bounds, map, config.height_sample_inset).level())
        .or_else(|| height_map.map(|map| map.base))
        .unwrap_or(0.0)
}
