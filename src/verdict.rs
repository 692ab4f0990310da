//! Mapping the model's scalar probability to a human-readable classification.

use serde::Serialize;
use std::fmt;

/// Fixed decision threshold on P(fake).
pub const FAKE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "Real",
            Label::Fake => "Fake",
        }
    }
}

/// Classification result: the raw model probability plus the derived label and
/// confidence in that label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Verdict {
    pub label: Label,
    pub probability: f32,
    pub confidence: f32,
}

impl Verdict {
    /// `p` is the model's P(fake). Above the threshold the video is labelled
    /// fake with confidence `p`; otherwise real with confidence `1 - p`.
    pub fn from_probability(p: f32) -> Self {
        if p > FAKE_THRESHOLD {
            Verdict {
                label: Label::Fake,
                probability: p,
                confidence: p,
            }
        } else {
            Verdict {
                label: Label::Real,
                probability: p,
                confidence: 1.0 - p,
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with confidence {:.2}", self.label.as_str(), self.confidence)
    }
}
