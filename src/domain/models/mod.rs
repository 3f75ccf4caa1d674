mod author;
mod conversation;
pub mod data_uri;
mod event;
mod message;
mod slash_commands;
mod storage;
mod textarea;
mod theme;

pub use author::*;
pub use conversation::*;
pub use event::*;
pub use message::*;
pub use slash_commands::*;
pub use storage::*;
pub use textarea::*;
pub use theme::*;
