// In-memory session state: one profile plus its derived generation results
// and the per-operation status board. Nothing is persisted.

pub mod handlers;
pub mod status;
pub mod store;

pub use store::{Session, SessionStore};
