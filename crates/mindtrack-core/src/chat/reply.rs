//! Canned replies for offline mode.
//!
//! [`REPLY_RULES`] is evaluated in order against the lower-cased input and the
//! first rule with a matching keyword wins. Keywords overlap across concerns
//! ("stressed and tired"), so the order is part of the contract.

/// A keyword rule and the reply it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyRule {
    /// Short name used in logs.
    pub name: &'static str,
    /// Substrings matched against the lower-cased input.
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl ReplyRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

pub const POSITIVE_REPLY: &str = "That's wonderful to hear! When you're in a positive mood, it's a great time to tackle challenging tasks. Would you like some suggestions for making the most of your productive state?";

pub const STRESS_REPLY: &str = "I'm sorry to hear you're feeling stressed. This can definitely impact your focus and learning. Would you like to try a quick 2-minute breathing exercise that can help reduce anxiety?";

pub const TIRED_REPLY: &str = "Feeling tired can make studying difficult. Consider taking a short 20-minute power nap or going for a brief walk outside. Studies show both can improve alertness. Would you like more energy-boosting tips?";

pub const MOTIVATED_REPLY: &str = "It's great that you're feeling motivated! This is a perfect time to work on your most challenging assignments or start projects you've been putting off. Would you like me to help you prioritize your tasks?";

pub const FALLBACK_REPLY: &str = "Thanks for sharing how you're feeling. Your emotional state can significantly impact your learning. Would you like some personalized suggestions based on your current mood?";

/// Ordered rule list. First match wins.
pub const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        name: "positive",
        keywords: &["happy", "good", "great"],
        reply: POSITIVE_REPLY,
    },
    ReplyRule {
        name: "stress",
        keywords: &["stress", "anxious", "worried"],
        reply: STRESS_REPLY,
    },
    ReplyRule {
        name: "tired",
        keywords: &["tired", "exhausted"],
        reply: TIRED_REPLY,
    },
    ReplyRule {
        name: "motivated",
        keywords: &["motivated"],
        reply: MOTIVATED_REPLY,
    },
];

/// Returns the first rule matching `input`, if any.
pub fn matching_rule(input: &str) -> Option<&'static ReplyRule> {
    let lowered = input.to_lowercase();
    REPLY_RULES.iter().find(|rule| rule.matches(&lowered))
}

/// Selects the canned reply for `input`, falling back to [`FALLBACK_REPLY`].
pub fn select_canned_reply(input: &str) -> &'static str {
    matching_rule(input).map_or(FALLBACK_REPLY, |rule| rule.reply)
}
