//! Validated player model shared by route handlers and the session client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything crossing the upstream boundary is decoded against these types.
//! A shape mismatch is a hard serde failure at the boundary — untyped or
//! coerced data never propagates inward.

use serde::{Deserialize, Serialize};

// =============================================================================
// CHARACTER
// =============================================================================

/// Closed set of playable characters. Any other tag on the wire is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Character {
    Mario,
    Luigi,
    Peach,
    Yoshi,
    Toad,
    Bowser,
    DonkeyKong,
    Wario,
}

// =============================================================================
// SKIN
// =============================================================================

/// Cosmetic kart skin. Zero or one per player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub id: i64,
    #[serde(deserialize_with = "non_empty_string")]
    pub name: String,
    pub character: Character,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(serde::de::Error::custom("skin name must not be empty"));
    }
    Ok(value)
}

// =============================================================================
// EMAIL
// =============================================================================

/// Email address validated (and normalized) on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and normalize an address: trimmed, lowercased, exactly one `@`
    /// with non-empty local and domain parts.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() || !normalized.contains('@') {
            return None;
        }
        let parts = normalized.split('@').collect::<Vec<_>>();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or_else(|| format!("invalid email address: {raw:?}"))
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// USER
// =============================================================================

/// Identity record returned by the upstream service.
///
/// `display_name` and `skin` are nullable but required keys: a payload
/// missing either field does not validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Email,
    pub display_name: Option<String>,
    pub skin: Option<Skin>,
}

impl User {
    /// Whether the player has selected a skin.
    #[must_use]
    pub fn has_skin(&self) -> bool {
        self.skin.is_some()
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
