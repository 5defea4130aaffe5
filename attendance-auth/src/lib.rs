// Token storage and client configuration for the attendance dashboard
mod client;
mod error;

pub use client::{FileTokenStore, MemoryTokenStore, Settings, Token, TokenStore};
pub use error::AuthError;
