//! Transient values passed in and out of the interview orchestrator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm_client::{ChatMessage, Role};

/// Kind of interview being practised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Behavioral,
    Mixed,
}

impl InterviewType {
    #[cfg(test)]
    pub const ALL: [InterviewType; 3] = [Self::Technical, Self::Behavioral, Self::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::Mixed => "mixed",
        }
    }

    /// Human-readable description used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Technical => "technical programming and software engineering",
            Self::Behavioral => "behavioral and situational (teamwork, leadership, communication)",
            Self::Mixed => "a mix of technical and behavioral",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[cfg(test)]
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner level (fundamental concepts)",
            Self::Intermediate => "intermediate level (practical application and problem solving)",
            Self::Advanced => "advanced level (complex scenarios, architecture and trade-offs)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged message of an interview dialogue, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        ChatMessage::new(turn.role, turn.content.clone())
    }
}

/// Scored evaluation of a full set of answers.
///
/// `overall_score` is always within 0–100, including on fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Question text → feedback text.
    pub feedback: BTreeMap<String, String>,
    pub overall_score: u8,
    pub overall_feedback: String,
}

/// Which fallback tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Strict parse of the model's reply.
    Model,
    /// Recovered from the model's reply by line heuristics.
    Heuristic,
    /// Built-in static content.
    Fallback,
}

/// A value together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub source: Provenance,
}

impl<T> Generated<T> {
    pub fn new(value: T, source: Provenance) -> Self {
        Self { value, source }
    }
}
