pub mod memory;
pub mod mongo;
pub mod state;
pub mod store;

pub use state::AppState;
pub use store::{Collection, DocumentStore};
