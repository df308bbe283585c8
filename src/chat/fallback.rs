//! Canned replies used when the generation backend is unavailable.
//!
//! The intent is chosen deterministically from keywords in the player's
//! message; the template within that intent is chosen with a caller-supplied
//! random source, so tests can seed it.

use rand::seq::SliceRandom;
use rand::RngCore;

/// Placeholder replaced with the player's name.
pub const PLAYER_PLACEHOLDER: &str = "{player}";

/// Coarse category of a player message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Follow,
    Stop,
    Dance,
    Default,
}

/// Intent keywords in match order. A message matching none is [`Intent::Default`].
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hi", "hello", "hey", "greetings"]),
    (Intent::Follow, &["follow", "come with", "come here"]),
    (Intent::Stop, &["stop", "stay", "wait", "halt"]),
    (Intent::Dance, &["dance", "emote", "jump"]),
];

const GREETING: &[&str] = &[
    "Hello {player}!",
    "Hey {player}! Nice to see you!",
    "Hi there, {player}!",
];
const FOLLOW: &[&str] = &[
    "Sure, I'll follow you! [ACTION:FOLLOW]",
    "Coming with you {player}! [ACTION:FOLLOW]",
];
const STOP: &[&str] = &[
    "Okay, stopping here! [ACTION:STOP]",
    "I'll wait right here! [ACTION:STOP]",
];
const DANCE: &[&str] = &["*dances* [ACTION:EMOTE]", "Check out my moves! [ACTION:EMOTE]"];
const DEFAULT: &[&str] = &["That's interesting!", "Tell me more!", "I'm listening!", "Cool!"];

/// Classify a player message by keyword (case-insensitive substring match).
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Default)
}

/// Static intent → template table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTable;

impl FallbackTable {
    /// Templates for an intent, in declaration order. Never empty.
    pub fn templates(&self, intent: Intent) -> &'static [&'static str] {
        match intent {
            Intent::Greeting => GREETING,
            Intent::Follow => FOLLOW,
            Intent::Stop => STOP,
            Intent::Dance => DANCE,
            Intent::Default => DEFAULT,
        }
    }

    /// Pick one template for `intent` using `rng`.
    pub fn pick(&self, intent: Intent, rng: &mut dyn RngCore) -> &'static str {
        let templates = self.templates(intent);
        templates.choose(rng).copied().unwrap_or(DEFAULT[0])
    }

    /// Build a complete fallback reply for `message` from `player_name`.
    ///
    /// The reply may still contain an action tag.
    pub fn respond(&self, message: &str, player_name: &str, rng: &mut dyn RngCore) -> String {
        let template = self.pick(classify(message), rng);
        template.replace(PLAYER_PLACEHOLDER, player_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classify_intents() {
        assert_eq!(classify("Hello Nova"), Intent::Greeting);
        assert_eq!(classify("please FOLLOW me"), Intent::Follow);
        assert_eq!(classify("come here now"), Intent::Follow);
        assert_eq!(classify("halt"), Intent::Stop);
        assert_eq!(classify("can you dance"), Intent::Dance);
        assert_eq!(classify("what's your favorite color?"), Intent::Default);
    }

    #[test]
    fn test_classify_is_ordered() {
        // greeting is checked before follow
        assert_eq!(classify("hey, follow me"), Intent::Greeting);
        // follow is checked before stop
        assert_eq!(classify("follow me, then wait"), Intent::Follow);
    }

    #[test]
    fn test_pick_stays_within_intent() {
        let table = FallbackTable;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let template = table.pick(Intent::Stop, &mut rng);
            assert!(STOP.contains(&template));
        }
    }

    #[test]
    fn test_pick_is_deterministic_for_seed() {
        let table = FallbackTable;
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| table.pick(Intent::Default, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn test_respond_fills_player_name() {
        let table = FallbackTable;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let reply = table.respond("hello!", "Alice", &mut rng);
            assert!(reply.contains("Alice"), "{}", reply);
            assert!(!reply.contains(PLAYER_PLACEHOLDER));
        }
    }

    #[test]
    fn test_every_intent_has_templates() {
        let table = FallbackTable;
        for intent in [
            Intent::Greeting,
            Intent::Follow,
            Intent::Stop,
            Intent::Dance,
            Intent::Default,
        ] {
            assert!(!table.templates(intent).is_empty());
        }
    }
}
