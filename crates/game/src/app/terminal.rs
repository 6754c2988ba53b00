use std::io::Write;

use engine::{FrameView, GameHost, Vec2};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameSummary {
    pub(crate) room_id: String,
    pub(crate) room_name: String,
    pub(crate) position: Vec2,
    pub(crate) elevation: f32,
    pub(crate) facing: &'static str,
    pub(crate) score: u32,
    pub(crate) max_score: u32,
}

pub(crate) struct TerminalHost<W: Write> {
    out: W,
    last_frame: Option<FrameSummary>,
    write_failed: bool,
}

impl<W: Write> TerminalHost<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            last_frame: None,
            write_failed: false,
        }
    }

    pub(crate) fn last_frame(&self) -> Option<&FrameSummary> {
        self.last_frame.as_ref()
    }

    pub(crate) fn print_line(&mut self, line: &str) {
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(error) = result {
            if !self.write_failed {
                warn!(error = %error, "terminal_write_failed");
                self.write_failed = true;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> GameHost for TerminalHost<W> {
    fn on_narration(&mut self, text: &str) {
        self.print_line(text);
    }

    fn on_room_changed(&mut self, room_name: &str) {
        self.print_line(&format!("== {room_name} =="));
    }

    fn on_score_changed(&mut self, value: u32) {
        self.print_line(&format!("[score: {value}]"));
    }

    fn on_frame(&mut self, frame: &FrameView<'_>) {
        self.last_frame = Some(FrameSummary {
            room_id: frame.room_id.to_string(),
            room_name: frame.room.name.clone(),
            position: frame.player.position,
            elevation: frame.player.elevation,
            facing: frame.player.facing.as_token(),
            score: frame.score,
            max_score: frame.max_score,
        });
    }

    fn on_game_over(&mut self, reason: &str) {
        self.print_line(&format!("*** GAME OVER: {reason} ***"));
        self.print_line("Type :restore to return to the start, or :restart to begin again.");
    }

    fn on_restore(&mut self) {
        self.print_line("[restored]");
    }
}

#[cfg(test)]
mod tests {
    use engine::{builtin_world, Direction, EngineConfig, GameSession};

    use super::*;

    fn printed(session: &GameSession<TerminalHost<Vec<u8>>>) -> String {
        String::from_utf8(session.host().output().clone()).expect("utf8")
    }

    #[test]
    fn narration_and_room_changes_are_printed() {
        let mut session = GameSession::new(EngineConfig::default(), TerminalHost::new(Vec::new()));
        session.install_world(builtin_world().expect("world"));
        session.submit_command("xyzzy");

        assert_eq!(
            printed(&session),
            "== Forest Entrance ==\n\
             You are at the entrance to a dark forest. There is a path leading south.\n\
             I don't understand that command.\n"
        );
    }

    #[test]
    fn frames_are_summarized_not_printed() {
        let mut session = GameSession::new(EngineConfig::default(), TerminalHost::new(Vec::new()));
        session.install_world(builtin_world().expect("world"));
        let before = printed(&session);

        session.set_directional_intent(Direction::Left, true);
        session.tick(16.0);

        assert_eq!(printed(&session), before);
        let frame = session.host().last_frame().expect("frame");
        assert_eq!(frame.room_id, "forest");
        assert_eq!(frame.position, Vec2 { x: 158.0, y: 150.0 });
        assert_eq!(frame.facing, "left");
    }

    #[test]
    fn game_over_prints_banner() {
        let mut host = TerminalHost::new(Vec::new());
        host.on_game_over("The bridge collapsed.");
        let text = String::from_utf8(host.output().clone()).expect("utf8");
        assert!(text.starts_with("*** GAME OVER: The bridge collapsed. ***\n"));
    }
}
