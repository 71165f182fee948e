//! Conversation state management

pub mod machine;
pub mod session;
pub mod store;

pub use machine::{Action, Reply};
pub use session::{Session, Stage, NAME_KEY};
pub use store::SessionStore;
