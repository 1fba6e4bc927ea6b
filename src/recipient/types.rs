use serde::{Deserialize, Serialize};
use std::fmt;

/// A saved person the user tracks gifts and commitments for.
///
/// Recipients are owned by the caller; the matcher only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: String,

    // Missing names deserialize as empty and are skipped during matching
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl Recipient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship: None,
            nickname: None,
        }
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

/// How a candidate was matched.
///
/// Variants are declared in priority order: when two tiers produce the same
/// score for a recipient, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    Exact,
    CaseInsensitive,
    Alias,
    Relationship,
    Prefix,
    FirstName,
    Substring,
    Fuzzy,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Exact => write!(f, "exact"),
            MatchType::CaseInsensitive => write!(f, "case-insensitive"),
            MatchType::Alias => write!(f, "alias"),
            MatchType::Relationship => write!(f, "relationship"),
            MatchType::Prefix => write!(f, "prefix"),
            MatchType::FirstName => write!(f, "first-name"),
            MatchType::Substring => write!(f, "substring"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A scored recipient produced while matching. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub recipient: Recipient,
    pub score: f64,
    pub match_type: MatchType,
    /// Edit distance between the normalized query and the string that
    /// produced `score`.
    pub distance: usize,
}

/// Typeahead entries share the candidate shape.
pub type Suggestion = MatchCandidate;

/// Outcome of resolving a free-text name against a recipient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchResult {
    #[serde(rename_all = "camelCase")]
    Matched {
        recipient: Recipient,
        score: f64,
        match_type: MatchType,
    },
    Ambiguous {
        candidates: Vec<MatchCandidate>,
    },
    None,
}

impl MatchResult {
    pub fn matched(&self) -> Option<&Recipient> {
        match self {
            MatchResult::Matched { recipient, .. } => Some(recipient),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        match self {
            MatchResult::Ambiguous { candidates } => candidates,
            _ => &[],
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MatchResult::None)
    }

    /// The user has to pick (or confirm) a recipient before anything is
    /// attributed to one.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, MatchResult::Ambiguous { .. })
    }

    /// Question to put to the user when the result can't be auto-resolved.
    pub fn confirmation_prompt(&self) -> Option<String> {
        let candidates = self.candidates();
        match candidates {
            [] => None,
            [only] => Some(format!("Did you mean {}?", only.recipient.name)),
            [first, second, ..] => Some(format!(
                "Did you mean {} or {}?",
                first.recipient.name, second.recipient.name
            )),
        }
    }
}

/// Diagnostic details about a match call, exposed outside production.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDebugInfo {
    pub search_term: String,
    pub normalized_term: String,
    pub is_relationship: bool,
    pub is_nickname: bool,
    pub recipients_checked: usize,
    pub execution_time_ms: f64,
    pub candidates: Vec<MatchCandidate>,
}
