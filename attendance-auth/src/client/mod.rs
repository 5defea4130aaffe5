mod config;
mod token_storage;

pub use config::Settings;
pub use token_storage::{FileTokenStore, MemoryTokenStore, Token, TokenStore};
