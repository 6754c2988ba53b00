use crate::sim::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub surface_width: f32,
    pub surface_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub gravity: f32,
    pub max_step_height: f32,
    pub collision_buffer: f32,
    pub height_sample_inset: f32,
    pub near_distance: f32,
    pub door_near_distance: f32,
    pub spawn_edge_margin: f32,
    pub first_visit_bonus: u32,
    pub max_score: u32,
    pub narration_ms_per_char: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            surface_width: 320.0,
            surface_height: 200.0,
            player_width: 16.0,
            player_height: 30.0,
            player_speed: 2.0,
            gravity: 0.5,
            max_step_height: 2.0,
            collision_buffer: 5.0,
            height_sample_inset: 2.0,
            near_distance: 50.0,
            door_near_distance: 70.0,
            spawn_edge_margin: 40.0,
            first_visit_bonus: 5,
            max_score: 100,
            narration_ms_per_char: 30.0,
        }
    }
}

impl EngineConfig {
    pub fn surface_center(&self) -> Vec2 {
        Vec2 {
            x: self.surface_width / 2.0,
            y: self.surface_height / 2.0,
        }
    }

    pub fn playable_min(&self) -> Vec2 {
        Vec2 {
            x: self.collision_buffer,
            y: self.collision_buffer,
        }
    }

    pub fn playable_max(&self) -> Vec2 {
        Vec2 {
            x: (self.surface_width - self.player_width - self.collision_buffer)
                .max(self.collision_buffer),
            y: (self.surface_height - self.player_height - self.collision_buffer)
                .max(self.collision_buffer),
        }
    }
}
