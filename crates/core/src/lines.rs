//! The `StoryLines` value object: the copy that goes onto one story image.
//!
//! Field length limits are enforced at every boundary crossing — API
//! response parsing, user-submitted edits, and the fallback copywriter all
//! go through [`StoryLines::validate`] (or truncate below the limits
//! before construction).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum headline length in characters.
pub const MAX_HEADLINE: usize = 90;
/// Maximum subheadline length in characters.
pub const MAX_SUBHEADLINE: usize = 120;
/// Maximum length of each bullet in characters.
pub const MAX_BULLET: usize = 60;
/// Maximum call-to-action length in characters.
pub const MAX_CTA: usize = 45;
/// Maximum footnote length in characters.
pub const MAX_FOOTNOTE: usize = 70;
/// Maximum price line length in characters.
pub const MAX_PRICE_LINE: usize = 40;
/// Maximum deadline line length in characters.
pub const MAX_DEADLINE_LINE: usize = 40;

/// Number of bullets on every story.
pub const BULLET_COUNT: usize = 3;

/// Copy lines for a single story variant.
///
/// Serialized as camelCase JSON both in the database (`lines_json`) and on
/// the wire, matching the shape the text-generation service is asked to
/// produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryLines {
    pub headline: String,
    pub subheadline: String,
    pub bullets: [String; BULLET_COUNT],
    pub cta: String,
    pub footnote: String,
    pub price_line: String,
    pub deadline_line: String,
}

impl StoryLines {
    /// Check that every field is non-empty and within its length bound.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_field("headline", &self.headline, MAX_HEADLINE)?;
        check_field("subheadline", &self.subheadline, MAX_SUBHEADLINE)?;
        for (i, bullet) in self.bullets.iter().enumerate() {
            check_field(BULLET_NAMES[i], bullet, MAX_BULLET)?;
        }
        check_field("cta", &self.cta, MAX_CTA)?;
        check_field("footnote", &self.footnote, MAX_FOOTNOTE)?;
        check_field("priceLine", &self.price_line, MAX_PRICE_LINE)?;
        check_field("deadlineLine", &self.deadline_line, MAX_DEADLINE_LINE)?;
        Ok(())
    }

    /// Parse an untrusted JSON value into validated lines.
    ///
    /// Returns `None` on shape or limit violations; callers that take
    /// external model output drop such elements instead of failing.
    pub fn parse_untrusted(value: &serde_json::Value) -> Option<Self> {
        let lines: Self = serde_json::from_value(value.clone()).ok()?;
        lines.validate().ok()?;
        Some(lines)
    }
}

/// Stable field names for bullet validation errors.
const BULLET_NAMES: [&str; BULLET_COUNT] = ["bullets[0]", "bullets[1]", "bullets[2]"];

fn check_field(name: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{name} is {len} characters, limit is {max}"
        )));
    }
    Ok(())
}

/// Truncate a string to at most `max` characters.
///
/// Operates on `char` boundaries so multi-byte text (the copy is usually
/// Russian) is never split mid-character.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
