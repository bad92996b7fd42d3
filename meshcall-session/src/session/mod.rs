mod room_session;
mod session_command;
mod session_event;

pub use room_session::{RoomSession, SessionHandle};
pub use session_command::SessionCommand;
pub use session_event::SessionEvent;
