//! Quorum rules for retaining a detection
//!
//! A detection is trusted only if enough contributing replicas reported it.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rule for deciding how many replicas must corroborate a detection
///
/// - `HalfRoundedUp`: at least half, rounding up (default)
/// - `Majority`: more than half
/// - `Unanimous`: every contributing replica
/// - `AtLeast(n)`: at least n replicas
/// - `Percentage(p)`: at least p% of replicas, rounding up
///
/// # Example
///
/// ```
/// use score_domain::QuorumRule;
///
/// let rule = QuorumRule::HalfRoundedUp;
/// assert_eq!(rule.min_support(3), 2);
/// assert!(rule.is_satisfied(2, 3));
/// assert!(!rule.is_satisfied(1, 3));
/// assert_eq!(rule.min_support(4), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuorumRule {
    /// ceil(n / 2)
    #[default]
    HalfRoundedUp,

    /// n / 2 + 1
    Majority,

    /// All contributing replicas
    Unanimous,

    /// At least n replicas
    AtLeast(usize),

    /// At least this percentage (0-100)
    Percentage(u8),
}

impl QuorumRule {
    /// Minimum occurrence count for a detection to be retained among
    /// `contributing` replicas. Never below 1.
    pub fn min_support(&self, contributing: usize) -> usize {
        let needed = match self {
            QuorumRule::HalfRoundedUp => contributing.div_ceil(2),
            QuorumRule::Majority => contributing / 2 + 1,
            QuorumRule::Unanimous => contributing,
            QuorumRule::AtLeast(n) => *n,
            QuorumRule::Percentage(p) => (contributing * usize::from(*p)).div_ceil(100),
        };
        needed.max(1)
    }

    /// Check if `count` corroborations out of `contributing` satisfy the rule
    pub fn is_satisfied(&self, count: usize, contributing: usize) -> bool {
        if contributing == 0 {
            return false;
        }
        count >= self.min_support(contributing)
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            QuorumRule::HalfRoundedUp => "half (at least half, rounded up)".to_string(),
            QuorumRule::Majority => "majority (more than half)".to_string(),
            QuorumRule::Unanimous => "unanimous (every replica)".to_string(),
            QuorumRule::AtLeast(n) => format!("at least {} replicas", n),
            QuorumRule::Percentage(p) => format!("at least {}% of replicas", p),
        }
    }

    /// Canonical config spelling, parseable by `FromStr`
    pub fn as_config_str(&self) -> String {
        match self {
            QuorumRule::HalfRoundedUp => "half".to_string(),
            QuorumRule::Majority => "majority".to_string(),
            QuorumRule::Unanimous => "unanimous".to_string(),
            QuorumRule::AtLeast(n) => format!("atleast:{}", n),
            QuorumRule::Percentage(p) => format!("{}%", p),
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidQuorumRule(s.to_string());
        match s.trim().to_lowercase().as_str() {
            "half" | "default" => Ok(QuorumRule::HalfRoundedUp),
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n = s
                    .split(':')
                    .nth(1)
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(invalid)?;
                Ok(QuorumRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str.parse().map_err(|_| invalid())?;
                if p > 100 {
                    return Err(invalid());
                }
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for QuorumRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_config_str())
    }
}

impl<'de> Deserialize<'de> for QuorumRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
