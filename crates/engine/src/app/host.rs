use crate::content::{Room, RoomId};
use crate::sim::PlayerState;

#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub timestamp_ms: f64,
    pub room_id: &'a RoomId,
    pub room: &'a Room,
    pub player: &'a PlayerState,
    pub narration: &'a str,
    pub score: u32,
    pub max_score: u32,
    pub is_game_over: bool,
}

pub trait GameHost {
    fn on_narration(&mut self, text: &str);
    fn on_room_changed(&mut self, _room_name: &str) {}
    fn on_score_changed(&mut self, _value: u32) {}
    fn on_frame(&mut self, _frame: &FrameView<'_>) {}
    fn on_game_over(&mut self, _reason: &str) {}
    fn on_restore(&mut self) {}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingHost {
    pub narration: Vec<String>,
    pub rooms: Vec<String>,
    pub scores: Vec<u32>,
    pub game_overs: Vec<String>,
    pub restores: usize,
    pub frames: usize,
}

impl RecordingHost {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl GameHost for RecordingHost {
    fn on_narration(&mut self, text: &str) {
        self.narration.push(text.to_string());
    }

    fn on_room_changed(&mut self, room_name: &str) {
        self.rooms.push(room_name.to_string());
    }

    fn on_score_changed(&mut self, value: u32) {
        self.scores.push(value);
    }

    fn on_frame(&mut self, _frame: &FrameView<'_>) {
        self.frames += 1;
    }

    fn on_game_over(&mut self, reason: &str) {
        self.game_overs.push(reason.to_string());
    }

    fn on_restore(&mut self) {
        self.restores += 1;
    }
}
