//! Direct NPC commands that bypass generation entirely.

use super::types::{ActionDescriptor, CommandOutcome};

/// Error reported for a command that is not in [`COMMANDS`].
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Static command table.
pub const COMMANDS: &[(&str, ActionDescriptor)] = &[
    ("follow", describe("follow", "Start following the player")),
    ("stop", describe("stop", "Stop moving")),
    ("dance", animate("emote", "Dance")),
    ("wave", animate("emote", "Wave")),
    ("jump", animate("emote", "Jump")),
    ("wander", describe("wander", "Start wandering")),
];

const fn describe(action: &'static str, description: &'static str) -> ActionDescriptor {
    ActionDescriptor {
        action,
        description: Some(description),
        animation: None,
    }
}

const fn animate(action: &'static str, animation: &'static str) -> ActionDescriptor {
    ActionDescriptor {
        action,
        description: None,
        animation: Some(animation),
    }
}

/// Look up a command by name (case-insensitive).
pub fn lookup(command: &str) -> Option<ActionDescriptor> {
    let command = command.to_lowercase();
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, descriptor)| *descriptor)
}

/// Resolve a command into the outcome reported to the client.
pub fn process(command: &str) -> CommandOutcome {
    match lookup(command) {
        Some(descriptor) => CommandOutcome {
            success: true,
            descriptor: Some(descriptor),
            error: None,
        },
        None => CommandOutcome {
            success: false,
            descriptor: None,
            error: Some(UNKNOWN_COMMAND.to_string()),
        },
    }
}
