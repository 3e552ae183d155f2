//! Heuristic results that record whether the full path ran.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a heuristic took its fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DegradeReason {
    /// The language oracle cannot supply tags, stop words, or entities
    CapabilityUnavailable,
    /// The language oracle failed on this input
    OracleFailed(String),
    /// Part of the input was recovered locally (e.g. a remote chunk kept as-is)
    InputRecovered(String),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::CapabilityUnavailable => f.write_str("basic mode (no full language model)"),
            DegradeReason::OracleFailed(msg) => write!(f, "language model failed: {}", msg),
            DegradeReason::InputRecovered(msg) => write!(f, "recovered: {}", msg),
        }
    }
}

/// Which path produced a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Full-capability path
    #[default]
    Full,
    /// Fallback path
    Degraded(DegradeReason),
}

/// A heuristic's value together with the mode it ran in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    /// The produced value
    pub value: T,
    /// How it was produced
    pub mode: Mode,
}

impl<T> Outcome<T> {
    /// A value from the full path.
    pub fn full(value: T) -> Self {
        Self {
            value,
            mode: Mode::Full,
        }
    }

    /// A value from a fallback path.
    pub fn degraded(value: T, reason: DegradeReason) -> Self {
        Self {
            value,
            mode: Mode::Degraded(reason),
        }
    }

    /// Check if the fallback path ran.
    pub fn is_degraded(&self) -> bool {
        matches!(self.mode, Mode::Degraded(_))
    }

    /// The degrade reason, if any.
    pub fn reason(&self) -> Option<&DegradeReason> {
        match &self.mode {
            Mode::Degraded(reason) => Some(reason),
            Mode::Full => None,
        }
    }

    /// Transform the value, keeping the mode.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            mode: self.mode,
        }
    }

    /// Keep this outcome's value but record `other`'s degradation if this
    /// one ran in full.
    pub fn merge_mode(mut self, other: &Mode) -> Self {
        if let (Mode::Full, Mode::Degraded(_)) = (&self.mode, other) {
            self.mode = other.clone();
        }
        self
    }

    /// Discard the mode.
    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_modes() {
        let full = Outcome::full(3);
        assert!(!full.is_degraded());
        assert_eq!(full.reason(), None);

        let degraded = Outcome::degraded(3, DegradeReason::CapabilityUnavailable);
        assert!(degraded.is_degraded());
        assert_eq!(degraded.map(|n| n * 2).value, 6);
    }

    #[test]
    fn test_merge_mode() {
        let merged = Outcome::full("x").merge_mode(&Mode::Degraded(DegradeReason::InputRecovered(
            "chunk 1".to_string(),
        )));
        assert!(merged.is_degraded());

        let kept = Outcome::degraded("x", DegradeReason::CapabilityUnavailable)
            .merge_mode(&Mode::Degraded(DegradeReason::OracleFailed("boom".to_string())));
        assert_eq!(kept.reason(), Some(&DegradeReason::CapabilityUnavailable));
    }

    #[test]
    fn test_reason_display() {
        let reason = DegradeReason::OracleFailed("too long".to_string());
        assert_eq!(reason.to_string(), "language model failed: too long");
    }
}
