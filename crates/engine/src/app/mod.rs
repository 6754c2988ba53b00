mod host;
mod input;
mod narration;
mod session;

pub use host::{FrameView, GameHost, RecordingHost};
pub use input::{Direction, DirectionalIntent};
pub use narration::{Narrator, RevealHandle, RevealTask, MAX_TRANSCRIPT_LINES};
pub use session::GameSession;
