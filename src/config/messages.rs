//! Player-facing chat replies.
//!
//! `{0}` in a template is replaced by the reply's single argument.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub no_permission: String,
    pub toggled_on: String,
    pub toggled_off: String,
    pub toggle_failed: String,
    pub decoy_placed: String,
    pub item_granted: String,
    pub grant_failed: String,
    pub usage: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            no_permission: "You do not have permission to use this command.".to_string(),
            toggled_on: "Decoy stashes enabled: stashes you place will be turned into traps."
                .to_string(),
            toggled_off: "Decoy stashes disabled.".to_string(),
            toggle_failed: "Could not save your setting, try again later.".to_string(),
            decoy_placed: "Decoy stash placed with {0} item stacks.".to_string(),
            item_granted: "You received {0} stash(es).".to_string(),
            grant_failed: "Could not give you a stash right now.".to_string(),
            usage: "Usage: /stash [amount]".to_string(),
        }
    }
}

/// Fill the `{0}` slot of a reply template.
pub fn format_reply(template: &str, arg: impl std::fmt::Display) -> String {
    template.replace("{0}", &arg.to_string())
}
