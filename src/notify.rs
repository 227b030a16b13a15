//! Violation alert construction.
//!
//! Pure mapping from a confirmed violation to the webhook message that
//! reports it. Nothing here performs I/O or touches shared state.

use regex::Regex;
use std::sync::LazyLock;
use stashwarn_webhook::{Embed, WebhookMessage, clamp_color};

use crate::config::NotificationConfig;
use crate::state::PlayerInfo;

/// Owner field text for stashes that belong to nobody.
pub const SERVER_PLACED: &str = "Server Placed";

pub const FIELD_OWNER: &str = "Owner";
pub const FIELD_SUSPECT: &str = "Suspect";
pub const FIELD_VIOLATIONS: &str = "Violations";
pub const FIELD_LOCATION: &str = "Location";

/// Game chat rich-text tags a player can embed in their display name.
static RICH_TEXT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:b|i|u|s|color|size|material|quad|sub|sup|mark|alpha|font|align|noparse|voffset|pos|indent|cspace|mspace|line-height|lowercase|uppercase|smallcaps)(?:=[^>]*)?>",
    )
    .expect("rich text pattern is valid")
});

/// Strip rich-text markup from a display name.
pub fn escape_rich_text(name: &str) -> String {
    RICH_TEXT_TAG.replace_all(name, "").into_owned()
}

fn describe(player: &PlayerInfo) -> String {
    format!("{} - {}", escape_rich_text(&player.display_name), player.id)
}

/// Build the alert for a confirmed violation.
///
/// `owner` is `None` for decoy stashes. `violations` is the suspect's count
/// after this violation was recorded.
pub fn build_notification(
    config: &NotificationConfig,
    owner: Option<&PlayerInfo>,
    suspect: &PlayerInfo,
    violations: u32,
    location: &str,
) -> WebhookMessage {
    let suspect_name = escape_rich_text(&suspect.display_name);
    let owner_text = owner.map_or_else(|| SERVER_PLACED.to_string(), describe);

    let embed = Embed::new(config.title.as_str())
        .with_color(clamp_color(config.color))
        .with_image(config.image.as_str())
        .with_description(config.description.replace("{0}", &suspect_name))
        .with_field(FIELD_OWNER, owner_text)
        .with_field(FIELD_SUSPECT, describe(suspect))
        .with_field(FIELD_VIOLATIONS, violations.to_string())
        .with_field(FIELD_LOCATION, location);

    WebhookMessage::new(config.username.as_str())
        .with_avatar(config.avatar.as_str())
        .with_content("")
        .with_embed(embed)
}
