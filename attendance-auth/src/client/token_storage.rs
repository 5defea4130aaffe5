use crate::error::AuthError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Bearer credential (JWT) proving an authenticated session
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single slot holding at most one token. An empty slot means logged out.
pub trait TokenStore: Send + Sync {
    fn get_token(&self) -> Result<Option<Token>, AuthError>;

    fn set_token(&self, token: &Token) -> Result<(), AuthError>;

    /// Clearing an empty slot is a no-op
    fn clear_token(&self) -> Result<(), AuthError>;

    fn is_logged_in(&self) -> bool {
        match self.get_token() {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read token, treating as logged out: {}", e);
                false
            }
        }
    }
}

/// The key names a file directly inside the cache directory
pub(crate) fn check_token_key(token_key: &str) -> Result<(), String> {
    if token_key.trim().is_empty() {
        return Err("token_key must not be empty".to_string());
    }
    if token_key.contains(['/', '\\']) || token_key == "." || token_key == ".." {
        return Err(format!("token_key '{}' must be a plain file name", token_key));
    }
    Ok(())
}

/// Token slot persisted as a plain file in the user cache directory
pub struct FileTokenStore {
    token_path: PathBuf,
}

impl FileTokenStore {
    pub fn new(token_key: &str) -> Result<Self, AuthError> {
        let cache_dir = Self::get_cache_dir()?;
        Self::in_dir(cache_dir, token_key)
    }

    pub fn in_dir(dir: impl AsRef<Path>, token_key: &str) -> Result<Self, AuthError> {
        check_token_key(token_key).map_err(AuthError::Configuration)?;
        let dir = dir.as_ref();

        // Create cache directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            token_path: dir.join(token_key),
        })
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("attendance");
        Ok(cache_dir)
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Result<Option<Token>, AuthError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        Ok(Some(Token::new(raw)))
    }

    fn set_token(&self, token: &Token) -> Result<(), AuthError> {
        fs::write(&self.token_path, token.as_str())
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        tracing::debug!("Stored token at {}", self.token_path.display());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)
                .map_err(|e| AuthError::TokenStorage(format!("Failed to delete token: {}", e)))?;
            tracing::debug!("Cleared token at {}", self.token_path.display());
        }
        Ok(())
    }
}

/// In-process token slot, nothing is persisted
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<Token>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Result<Option<Token>, AuthError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| AuthError::TokenStorage("Token slot lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn set_token(&self, token: &Token) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AuthError::TokenStorage("Token slot lock poisoned".to_string()))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| AuthError::TokenStorage("Token slot lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
