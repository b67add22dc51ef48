// Bearer token helpers: saving the token between runs and peeking at the
// JWT claims so the UI can tell when it expires.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TOKEN_FILE: &str = ".gradient_token";
const PREVIEW_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token file {0} is empty")]
    Empty(PathBuf),
    #[error("cannot access token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Location of the saved token in the user's home directory.
pub fn token_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(TOKEN_FILE)
}

/// Persist the token so the next session can reuse it.
pub fn write_token(path: &Path, token: &str) -> Result<(), TokenError> {
    std::fs::write(path, token.trim()).map_err(|source| TokenError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a saved token. Surrounding whitespace is ignored.
pub fn read_token(path: &Path) -> Result<String, TokenError> {
    let data = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let token = data.trim();
    if token.is_empty() {
        return Err(TokenError::Empty(path.to_path_buf()));
    }
    Ok(token.to_string())
}

/// First characters of the token, safe to print.
pub fn preview(token: &str) -> String {
    let head: String = token.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// What can be read from a JWT without verifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub expires_at: Option<DateTime<Local>>,
}

impl TokenInfo {
    /// Decode the payload segment of a JWT. Returns `None` for anything
    /// that is not a three-part token with a JSON payload.
    pub fn inspect(token: &str) -> Option<Self> {
        let mut parts = token.trim().split('.');
        let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claims: Claims = serde_json::from_slice(&bytes).ok()?;
        let expires_at = claims
            .exp
            .and_then(|secs| Local.timestamp_opt(secs, 0).single());
        Some(TokenInfo { expires_at })
    }

    pub fn is_expired_at(&self, now: DateTime<Local>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}
