mod app_state;
mod bubble;
mod bubble_list;
mod chat_list;
mod chat_store;
pub mod events;
mod responder;
mod scroll;
mod uploads;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat_list::*;
pub use chat_store::*;
pub use responder::*;
pub use scroll::*;
pub use uploads::*;
