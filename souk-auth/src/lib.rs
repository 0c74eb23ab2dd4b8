mod error;
mod session;
mod token_storage;

pub use crate::error::AuthError;
pub use crate::session::{Session, SessionStore};
pub use crate::token_storage::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStorage};
