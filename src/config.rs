//! Ruleset configuration: toggles for table variants that sit outside the
//! core shape/yaku grammar (§4.4/§4.5) but still affect how a verdict is
//! read off the detected yaku.

use serde::{Deserialize, Serialize};

/// Table-variant toggles threaded through [`crate::context::WinContext`].
///
/// Construction mirrors `WinContext`'s own builder pattern. The default
/// matches the standard ruleset this crate implements everywhere else:
/// kuitan allowed, red fives scored purely as dora, and every yakuman
/// (including tanki suuankou, 9-sided chuuren, and four-winds) counted as
/// single yakuman rather than double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Whether tanyao (all-simples) may be declared on an open hand.
    /// This engine already scores tanyao identically open or closed
    /// (§4.4), so this flag is informational for callers that want to
    /// reject kuitan hands before they reach `evaluate` rather than a
    /// switch this crate itself branches on.
    pub kuitan_allowed: bool,
    /// Whether red fives contribute han directly instead of only being
    /// tallied as caller-supplied dora via `WinContext::with_aka`.
    pub aka_counts_as_han: bool,
    /// Whether hands that reach a yakuman's defining wait on the rarer side
    /// (four concealed triplets completed on a tanki wait, nine gates on
    /// the full nine-sided wait) score as double yakuman instead of single.
    pub allow_double_yakuman: bool,
}

impl Default for RulesetConfig {
    fn default() -> Self {
        RulesetConfig {
            kuitan_allowed: true,
            aka_counts_as_han: false,
            allow_double_yakuman: false,
        }
    }
}

impl RulesetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_kuitan(mut self) -> Self {
        self.kuitan_allowed = false;
        self
    }

    pub fn with_aka_as_han(mut self) -> Self {
        self.aka_counts_as_han = true;
        self
    }

    pub fn with_double_yakuman(mut self) -> Self {
        self.allow_double_yakuman = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_standard_ruleset() {
        let ruleset = RulesetConfig::default();
        assert!(ruleset.kuitan_allowed);
        assert!(!ruleset.aka_counts_as_han);
        assert!(!ruleset.allow_double_yakuman);
    }

    #[test]
    fn builder_toggles_compose() {
        let ruleset = RulesetConfig::new()
            .without_kuitan()
            .with_aka_as_han()
            .with_double_yakuman();
        assert!(!ruleset.kuitan_allowed);
        assert!(ruleset.aka_counts_as_han);
        assert!(ruleset.allow_double_yakuman);
    }
}
