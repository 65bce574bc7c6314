//! Conversation state and the query-to-visualization coordinator.
//!
//! The store owns the ordered message list; the session wires the store,
//! gateway, binder, and history archive into the per-turn state machine:
//! submit a question, edit the generated SQL, run it, watch the current
//! chart/table slot update while the previous one is archived.

pub mod session;
pub mod store;

pub use session::{CurrentView, FailureHook, RunToken, Session, TurnState};
pub use store::ConversationStore;
