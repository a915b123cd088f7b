//! Card identification from a free-text query

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Longest accepted query, in characters
pub const MAX_QUERY_LEN: usize = 200;
/// Longest display name before truncation
const MAX_DISPLAY_LEN: usize = 80;

/// Tokens that mark a sports card
const SPORTS_TOKENS: [&str; 7] = ["psa", "topps", "panini", "rookie", "nba", "nfl", "mlb"];

/// Card family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sports,
    /// Trading card game
    #[default]
    Tcg,
}

/// Stable identity of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdentity {
    /// 16 hex chars derived from the normalized query
    pub card_key: String,
    pub display_name: String,
    pub category: Category,
    pub year: Option<u16>,
    pub set_name: Option<String>,
    pub card_number: Option<String>,
    pub variant: Option<String>,
}

pub(crate) fn sha256_prefix(input: &str) -> [u8; 8] {
    let digest = Sha256::digest(input.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    prefix
}

/// First 16 hex chars of SHA-256 over the trimmed, lowercased query
pub fn stable_card_key(query: &str) -> String {
    sha256_prefix(&query.trim().to_lowercase())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Validate a query and derive a [`CardIdentity`] from it
pub fn identify(query: &str) -> Result<CardIdentity> {
    let q = query.trim();
    let len = q.chars().count();
    if len == 0 || len > MAX_QUERY_LEN {
        return Err(ValuationError::invalid(format!(
            "query must be 1..={MAX_QUERY_LEN} characters, got {len}"
        )));
    }

    let lower = q.to_lowercase();
    let category = if SPORTS_TOKENS.iter().any(|t| lower.contains(t)) {
        Category::Sports
    } else {
        Category::Tcg
    };

    let display_name = if len <= MAX_DISPLAY_LEN {
        q.to_string()
    } else {
        let head: String = q.chars().take(MAX_DISPLAY_LEN - 3).collect();
        format!("{head}...")
    };

    Ok(CardIdentity {
        card_key: stable_card_key(q),
        display_name,
        category,
        year: None,
        set_name: None,
        card_number: None,
        variant: None,
    })
}
