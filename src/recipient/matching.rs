//! Resolving free-text names to saved recipients
//!
//! Every recipient is scored against the query by a fixed set of tiers
//! (exact, alias, relationship, prefix, first name, substring, fuzzy) and the
//! best tier is kept. `match_recipient` then only auto-resolves when the top
//! candidate is both confident and clearly ahead of the runner-up; anything
//! closer than that comes back as an ambiguous list for the user to pick
//! from. `suggest` skips that step and just ranks, for typeahead.
//!
//! Both operations are pure: same inputs, same output, no I/O.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, trace};

use super::error::{MatchError, MatchOutcome};
use super::nicknames::{are_aliases, is_nickname, normalize_relationship};
use super::normalizer::{
    char_len, edit_distance, first_name, is_multi_word, normalize_name, similarity_ratio,
};
use super::types::{MatchCandidate, MatchDebugInfo, MatchResult, MatchType, Recipient, Suggestion};
use super::TARGET_RECIPIENT;

// Resolution defaults
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;
pub const INCLUSION_THRESHOLD: f64 = 0.5;
pub const CONFIDENCE_MARGIN: f64 = 0.15;
pub const MAX_AMBIGUOUS_CANDIDATES: usize = 5;

// Tier scores
const EXACT_SCORE: f64 = 1.0;
const ALIAS_SCORE: f64 = 0.95;
const RELATIONSHIP_SCORE: f64 = 0.95;
const PREFIX_SCORE: f64 = 0.9;
const NICKNAME_PREFIX_SCORE: f64 = 0.85;
const FIRST_NAME_SCORE: f64 = 0.8;
const FIRST_NAME_ALIAS_SCORE: f64 = 0.75;
const SUBSTRING_BASE: f64 = 0.6;
const SUBSTRING_SPAN: f64 = 0.3;
const FUZZY_FLOOR: f64 = 0.5;

// Scores are sums and ratios of small decimals
const SCORE_EPSILON: f64 = 1e-9;

/// Thresholds that decide how scored candidates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Minimum score for a single candidate to be auto-resolved.
    pub high_confidence: f64,
    /// Candidates scoring below this never enter the candidate list.
    pub inclusion_floor: f64,
    /// How far the best candidate must lead the runner-up.
    pub margin: f64,
    /// Length cap of an ambiguous candidate list.
    pub max_candidates: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            high_confidence: HIGH_CONFIDENCE_THRESHOLD,
            inclusion_floor: INCLUSION_THRESHOLD,
            margin: CONFIDENCE_MARGIN,
            max_candidates: MAX_AMBIGUOUS_CANDIDATES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Match,
    Suggest,
}

/// Search term prepared once per call.
struct Query<'a> {
    raw: &'a str,
    normalized: String,
    relationship: Option<&'static str>,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str) -> Self {
        let normalized = normalize_name(raw);
        let relationship = normalize_relationship(&normalized);
        Self {
            raw: raw.trim(),
            normalized,
            relationship,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TierScore {
    score: f64,
    match_type: MatchType,
    distance: usize,
}

/// Keep the higher score; on a tie keep the higher priority tier.
fn offer(best: &mut Option<TierScore>, candidate: TierScore) {
    let replace = match best {
        None => true,
        Some(current) => {
            candidate.score > current.score + SCORE_EPSILON
                || ((candidate.score - current.score).abs() <= SCORE_EPSILON
                    && candidate.match_type < current.match_type)
        }
    };
    if replace {
        *best = Some(candidate);
    }
}

/// Candidate plus its normalized name, kept for the tie-break.
struct Ranked {
    normalized_name: String,
    candidate: MatchCandidate,
}

fn rank_order(a: &Ranked, b: &Ranked) -> Ordering {
    b.candidate
        .score
        .total_cmp(&a.candidate.score)
        .then_with(|| a.candidate.distance.cmp(&b.candidate.distance))
        .then_with(|| a.normalized_name.cmp(&b.normalized_name))
        .then_with(|| a.candidate.recipient.name.cmp(&b.candidate.recipient.name))
        .then_with(|| a.candidate.recipient.id.cmp(&b.candidate.recipient.id))
}

#[derive(Debug, Clone, Default)]
pub struct RecipientMatcher {
    config: MatcherConfig,
}

impl RecipientMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn with_high_confidence(mut self, threshold: f64) -> Self {
        self.config.high_confidence = threshold;
        self
    }

    pub fn with_inclusion_floor(mut self, threshold: f64) -> Self {
        self.config.inclusion_floor = threshold;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.config.margin = margin;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.config.max_candidates = max_candidates;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve `search_name` to one recipient, a ranked shortlist, or nothing.
    ///
    /// Fails only when the search name is empty once normalized.
    pub fn match_recipient(
        &self,
        search_name: &str,
        recipients: &[Recipient],
    ) -> MatchOutcome<MatchResult> {
        let query = Query::new(search_name);
        if query.normalized.is_empty() {
            return Err(MatchError::InvalidInput(
                "search name is empty".to_string(),
            ));
        }

        let candidates = self.rank(&query, recipients, Mode::Match);
        let Some(best) = candidates.first() else {
            debug!(
                target: TARGET_RECIPIENT,
                "No recipient matched '{}' ({} checked)", query.normalized, recipients.len()
            );
            return Ok(MatchResult::None);
        };

        let runner_up = candidates.get(1).map_or(0.0, |c| c.score);
        let confident = best.score + SCORE_EPSILON >= self.config.high_confidence;
        let clear_lead = best.score - runner_up + SCORE_EPSILON >= self.config.margin;

        if confident && clear_lead {
            debug!(
                target: TARGET_RECIPIENT,
                "Matched '{}' to '{}' via {} (score {:.3}, runner-up {:.3})",
                query.normalized, best.recipient.name, best.match_type, best.score, runner_up
            );
            return Ok(MatchResult::Matched {
                recipient: best.recipient.clone(),
                score: best.score,
                match_type: best.match_type,
            });
        }

        debug!(
            target: TARGET_RECIPIENT,
            "Ambiguous match for '{}': best {:.3}, runner-up {:.3}, {} candidates",
            query.normalized, best.score, runner_up, candidates.len()
        );
        let mut candidates = candidates;
        candidates.truncate(self.config.max_candidates);
        Ok(MatchResult::Ambiguous { candidates })
    }

    /// Rank recipients for typeahead. Empty queries yield no suggestions.
    pub fn suggest(&self, query: &str, recipients: &[Recipient], limit: usize) -> Vec<Suggestion> {
        let query = Query::new(query);
        if query.normalized.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut suggestions = self.rank(&query, recipients, Mode::Suggest);
        suggestions.truncate(limit);
        suggestions
    }

    /// Every candidate that clears the inclusion floor, best first.
    pub fn score_all(&self, search_name: &str, recipients: &[Recipient]) -> Vec<MatchCandidate> {
        let query = Query::new(search_name);
        if query.normalized.is_empty() {
            return Vec::new();
        }
        self.rank(&query, recipients, Mode::Match)
    }

    /// Diagnostics for a match call: how the term was read and what scored.
    pub fn explain(&self, search_name: &str, recipients: &[Recipient]) -> MatchDebugInfo {
        let started = Instant::now();
        let query = Query::new(search_name);
        let candidates = self.score_all(search_name, recipients);

        MatchDebugInfo {
            search_term: search_name.to_string(),
            is_relationship: query.relationship.is_some(),
            is_nickname: is_nickname(&query.normalized),
            normalized_term: query.normalized,
            recipients_checked: recipients.len(),
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            candidates,
        }
    }

    fn rank(&self, query: &Query<'_>, recipients: &[Recipient], mode: Mode) -> Vec<MatchCandidate> {
        let mut ranked: Vec<Ranked> = recipients
            .iter()
            .filter_map(|recipient| self.score_recipient(query, recipient, mode))
            .collect();
        ranked.sort_by(rank_order);
        ranked.into_iter().map(|r| r.candidate).collect()
    }

    fn score_recipient(&self, query: &Query<'_>, recipient: &Recipient, mode: Mode) -> Option<Ranked> {
        let name = normalize_name(&recipient.name);
        if name.is_empty() {
            trace!(
                target: TARGET_RECIPIENT,
                "Skipping recipient {} with no usable name", recipient.id
            );
            return None;
        }

        let q = query.normalized.as_str();
        let nickname = recipient
            .nickname
            .as_deref()
            .map(normalize_name)
            .filter(|n| !n.is_empty());
        let mut best: Option<TierScore> = None;

        if query.raw == recipient.name.trim() {
            offer(&mut best, TierScore { score: EXACT_SCORE, match_type: MatchType::Exact, distance: 0 });
        }
        if q == name {
            offer(
                &mut best,
                TierScore { score: EXACT_SCORE, match_type: MatchType::CaseInsensitive, distance: 0 },
            );
        }

        if are_aliases(q, &name) {
            offer(
                &mut best,
                TierScore {
                    score: ALIAS_SCORE,
                    match_type: MatchType::Alias,
                    distance: edit_distance(q, &name),
                },
            );
        }
        if nickname.as_deref() == Some(q) {
            offer(&mut best, TierScore { score: ALIAS_SCORE, match_type: MatchType::Alias, distance: 0 });
        }

        if let Some(wanted) = query.relationship {
            let saved = recipient.relationship.as_deref().map(normalize_name);
            if let Some(saved) = saved {
                if normalize_relationship(&saved) == Some(wanted) {
                    offer(
                        &mut best,
                        TierScore {
                            score: RELATIONSHIP_SCORE,
                            match_type: MatchType::Relationship,
                            distance: edit_distance(q, &saved),
                        },
                    );
                }
            }
        }

        if mode == Mode::Suggest {
            if name.starts_with(q) {
                offer(
                    &mut best,
                    TierScore {
                        score: PREFIX_SCORE,
                        match_type: MatchType::Prefix,
                        distance: char_len(&name) - char_len(q),
                    },
                );
            }
            if let Some(nick) = nickname.as_deref().filter(|n| n.starts_with(q)) {
                offer(
                    &mut best,
                    TierScore {
                        score: NICKNAME_PREFIX_SCORE,
                        match_type: MatchType::Prefix,
                        distance: char_len(nick) - char_len(q),
                    },
                );
            }
        }

        let first = is_multi_word(&name).then(|| first_name(&name));
        if let Some(first) = first {
            if first == q {
                offer(
                    &mut best,
                    TierScore { score: FIRST_NAME_SCORE, match_type: MatchType::FirstName, distance: 0 },
                );
            } else if are_aliases(q, first) {
                offer(
                    &mut best,
                    TierScore {
                        score: FIRST_NAME_ALIAS_SCORE,
                        match_type: MatchType::Alias,
                        distance: edit_distance(q, first),
                    },
                );
            }
        }

        if name.contains(q) || q.contains(name.as_str()) {
            let (q_len, name_len) = (char_len(q), char_len(&name));
            let ratio = q_len.min(name_len) as f64 / q_len.max(name_len) as f64;
            offer(
                &mut best,
                TierScore {
                    score: SUBSTRING_BASE + SUBSTRING_SPAN * ratio,
                    match_type: MatchType::Substring,
                    distance: edit_distance(q, &name),
                },
            );
        }

        let ratio = similarity_ratio(q, &name);
        if ratio >= FUZZY_FLOOR {
            offer(
                &mut best,
                TierScore { score: ratio, match_type: MatchType::Fuzzy, distance: edit_distance(q, &name) },
            );
        }

        // Partial names never outrank an exact first-name hit
        for part in first.into_iter().chain(nickname.as_deref()) {
            let ratio = similarity_ratio(q, part);
            if ratio >= FUZZY_FLOOR {
                offer(
                    &mut best,
                    TierScore {
                        score: ratio.min(FIRST_NAME_SCORE),
                        match_type: MatchType::Fuzzy,
                        distance: edit_distance(q, part),
                    },
                );
            }
        }

        let best = best?;
        if best.score + SCORE_EPSILON < self.config.inclusion_floor {
            trace!(
                target: TARGET_RECIPIENT,
                "Dropping '{}' for '{}': score {:.3} below floor", recipient.name, q, best.score
            );
            return None;
        }

        Some(Ranked {
            normalized_name: name,
            candidate: MatchCandidate {
                recipient: recipient.clone(),
                score: best.score,
                match_type: best.match_type,
                distance: best.distance,
            },
        })
    }
}

/// Resolve a name with the default thresholds.
pub fn match_recipient(search_name: &str, recipients: &[Recipient]) -> MatchOutcome<MatchResult> {
    RecipientMatcher::new().match_recipient(search_name, recipients)
}

/// Typeahead suggestions with the default thresholds.
pub fn suggest(query: &str, recipients: &[Recipient], limit: usize) -> Vec<Suggestion> {
    RecipientMatcher::new().suggest(query, recipients, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Vec<Recipient> {
        vec![
            Recipient::new("1", "Sarah Johnson").with_nickname("Sarah"),
            Recipient::new("2", "John Smith").with_nickname("Johnny"),
            Recipient::new("3", "Linda Martinez").with_relationship("Mother"),
            Recipient::new("4", "Robert Wilson")
                .with_nickname("Bob")
                .with_relationship("Father"),
            Recipient::new("5", "Elizabeth Brown")
                .with_nickname("Liz")
                .with_relationship("Sister"),
            Recipient::new("6", "Sara Garcia"),
        ]
    }

    fn names(candidates: &[MatchCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.recipient.name.as_str()).collect()
    }

    fn assert_score(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected score {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_empty_search_is_invalid_input() {
        let recipients = family();
        assert!(matches!(
            match_recipient("", &recipients),
            Err(MatchError::InvalidInput(_))
        ));
        assert!(matches!(
            match_recipient("   \t ", &recipients),
            Err(MatchError::InvalidInput(_))
        ));
        assert!(matches!(
            match_recipient("?!", &[]),
            Err(MatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_recipient_set() {
        assert_eq!(match_recipient("anyone", &[]).unwrap(), MatchResult::None);
        assert!(suggest("anyone", &[], 10).is_empty());
    }

    #[test]
    fn test_exact_and_case_insensitive_matches() {
        let recipients = vec![
            Recipient::new("1", "Sam"),
            Recipient::new("2", "Samantha"),
            Recipient::new("3", "Charlotte"),
        ];

        match match_recipient("Sam", &recipients).unwrap() {
            MatchResult::Matched { recipient, score, match_type } => {
                assert_eq!(recipient.id, "1");
                assert_score(score, 1.0);
                assert_eq!(match_type, MatchType::Exact);
            }
            other => panic!("expected a match, got {:?}", other),
        }

        match match_recipient("  CHARLOTTE ", &recipients).unwrap() {
            MatchResult::Matched { recipient, score, match_type } => {
                assert_eq!(recipient.id, "3");
                assert_score(score, 1.0);
                assert_eq!(match_type, MatchType::CaseInsensitive);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_diacritics_match_exactly() {
        let recipients = vec![Recipient::new("1", "José Álvarez"), Recipient::new("2", "Joseph")];
        let result = match_recipient("jose alvarez", &recipients).unwrap();
        assert_eq!(result.matched().map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn test_near_identical_names_are_ambiguous() {
        let recipients = vec![Recipient::new("1", "Jon Smith"), Recipient::new("2", "John Smith")];
        let result = match_recipient("Jonh Smith", &recipients).unwrap();
        match &result {
            MatchResult::Ambiguous { candidates } => {
                assert_eq!(candidates.len(), 2);
                assert!(candidates[0].score >= candidates[1].score);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert!(result.needs_confirmation());
    }

    #[test]
    fn test_duplicate_names_are_ambiguous() {
        let recipients = vec![Recipient::new("b", "Alex Kim"), Recipient::new("a", "Alex Kim")];
        let result = match_recipient("alex kim", &recipients).unwrap();
        let candidates = result.candidates();
        assert_eq!(candidates.len(), 2);
        // Identical names fall back to id order
        assert_eq!(candidates[0].recipient.id, "a");
        assert_eq!(candidates[1].recipient.id, "b");
    }

    #[test]
    fn test_nickname_alias_with_first_name_ranks_first() {
        let recipients = vec![Recipient::new("1", "Robert Smith"), Recipient::new("2", "Bob Jones")];
        let result = match_recipient("bob", &recipients).unwrap();
        match result {
            MatchResult::Ambiguous { candidates } => {
                assert_eq!(names(&candidates), vec!["Bob Jones", "Robert Smith"]);
                assert_eq!(candidates[0].match_type, MatchType::FirstName);
                assert_eq!(candidates[1].match_type, MatchType::Alias);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_on_full_name_matches() {
        let recipients = vec![Recipient::new("1", "Robert"), Recipient::new("2", "Charlotte")];
        match match_recipient("Bob", &recipients).unwrap() {
            MatchResult::Matched { recipient, score, match_type } => {
                assert_eq!(recipient.id, "1");
                assert_score(score, 0.95);
                assert_eq!(match_type, MatchType::Alias);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_saved_nickname_matches() {
        let recipients = family();
        let result = match_recipient("Johnny", &recipients).unwrap();
        assert_eq!(result.matched().map(|r| r.name.as_str()), Some("John Smith"));

        let result = match_recipient("Liz", &recipients).unwrap();
        assert_eq!(
            result.matched().map(|r| r.name.as_str()),
            Some("Elizabeth Brown")
        );
    }

    #[test]
    fn test_relationship_terms_match() {
        let recipients = family();
        for (term, expected) in [
            ("Mom", "Linda Martinez"),
            ("dad", "Robert Wilson"),
            ("Sister", "Elizabeth Brown"),
        ] {
            match match_recipient(term, &recipients).unwrap() {
                MatchResult::Matched { recipient, match_type, .. } => {
                    assert_eq!(recipient.name, expected, "term {}", term);
                    assert_eq!(match_type, MatchType::Relationship);
                }
                other => panic!("expected a match for {}, got {:?}", term, other),
            }
        }
    }

    #[test]
    fn test_typo_in_full_name_matches() {
        let recipients = family();
        let result = match_recipient("Sarah Johnsen", &recipients).unwrap();
        match result {
            MatchResult::Matched { recipient, match_type, score } => {
                assert_eq!(recipient.name, "Sarah Johnson");
                assert_eq!(match_type, MatchType::Fuzzy);
                assert_score(score, 12.0 / 13.0);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_typo_in_first_name_needs_confirmation() {
        let recipients = family();
        let result = match_recipient("Sarha", &recipients).unwrap();
        let candidates = result.candidates();
        assert!(!candidates.is_empty());
        assert!(candidates[0].score < HIGH_CONFIDENCE_THRESHOLD);
        assert!(names(candidates).contains(&"Sarah Johnson"));
    }

    #[test]
    fn test_unrelated_name_is_none() {
        let recipients = vec![Recipient::new("1", "Charlotte")];
        assert_eq!(match_recipient("xyz", &recipients).unwrap(), MatchResult::None);
    }

    #[test]
    fn test_substring_score_scales_with_length() {
        let recipients = vec![Recipient::new("1", "Samantha")];
        let result = match_recipient("sam", &recipients).unwrap();
        let candidates = result.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].match_type, MatchType::Substring);
        assert_score(candidates[0].score, 0.6 + 0.3 * 3.0 / 8.0);
    }

    #[test]
    fn test_margin_protects_against_near_names() {
        let recipients = vec![Recipient::new("1", "Sam"), Recipient::new("2", "Samantha")];
        let result = match_recipient("sam", &recipients).unwrap();
        assert_eq!(result.matched().map(|r| r.id.as_str()), Some("1"));

        // A stricter margin turns the same data ambiguous
        let strict = RecipientMatcher::new().with_margin(0.5);
        let result = strict.match_recipient("sam", &recipients).unwrap();
        assert_eq!(names(result.candidates()), vec!["Sam", "Samantha"]);
    }

    #[test]
    fn test_ambiguous_list_is_capped_and_sorted() {
        let recipients: Vec<Recipient> = ["Anna", "Anne", "Ann", "Anja", "Ana", "Hanna", "Annie"]
            .iter()
            .enumerate()
            .map(|(i, name)| Recipient::new(i.to_string(), *name))
            .collect();

        let result = match_recipient("Anni", &recipients).unwrap();
        let candidates = result.candidates();
        assert_eq!(candidates.len(), MAX_AMBIGUOUS_CANDIDATES);
        for pair in candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if (pair[0].score - pair[1].score).abs() < 1e-12 {
                assert!(pair[0].distance <= pair[1].distance);
            }
        }

        let capped = RecipientMatcher::new().with_max_candidates(2);
        let result = capped.match_recipient("Anni", &recipients).unwrap();
        assert_eq!(result.candidates().len(), 2);
    }

    #[test]
    fn test_malformed_recipients_are_skipped() {
        let recipients = vec![
            Recipient::new("1", ""),
            Recipient::new("2", "  ...  "),
            Recipient::new("3", "Emma"),
        ];
        let result = match_recipient("emma", &recipients).unwrap();
        assert_eq!(result.matched().map(|r| r.id.as_str()), Some("3"));
        assert_eq!(suggest("e", &recipients, 10).len(), 1);
    }

    #[test]
    fn test_match_is_deterministic() {
        let recipients = family();
        for term in ["sara", "bob", "mom", "jon", "liz"] {
            let first = serde_json::to_string(&match_recipient(term, &recipients).unwrap()).unwrap();
            let second = serde_json::to_string(&match_recipient(term, &recipients).unwrap()).unwrap();
            assert_eq!(first, second, "term {}", term);
        }
    }

    #[test]
    fn test_lead_of_exactly_the_margin_resolves() {
        // Alias on the full name (0.95) against a first-name hit (0.80)
        let recipients = vec![Recipient::new("1", "Robert"), Recipient::new("2", "Bob Jones")];
        let candidates = RecipientMatcher::new().score_all("bob", &recipients);
        assert_score(candidates[0].score, 0.95);
        assert_score(candidates[1].score, 0.8);
        assert_eq!(candidates[1].match_type, MatchType::FirstName);

        match match_recipient("bob", &recipients).unwrap() {
            MatchResult::Matched { recipient, match_type, .. } => {
                assert_eq!(recipient.id, "1");
                assert_eq!(match_type, MatchType::Alias);
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_relationship_is_ambiguous() {
        let recipients = vec![
            Recipient::new("1", "Linda Martinez").with_relationship("Mother"),
            Recipient::new("2", "Carol Wilson").with_relationship("Mom"),
            Recipient::new("3", "Robert Wilson").with_relationship("Father"),
        ];
        let result = match_recipient("mom", &recipients).unwrap();
        let candidates = result.candidates();
        assert_eq!(names(candidates), vec!["Carol Wilson", "Linda Martinez"]);
        assert!(candidates
            .iter()
            .all(|c| c.match_type == MatchType::Relationship));
        assert_eq!(
            result.confirmation_prompt().as_deref(),
            Some("Did you mean Carol Wilson or Linda Martinez?")
        );
    }

    #[test]
    fn test_suggest_is_deterministic() {
        let recipients = family();
        for term in ["sa", "bo", "li", "jo"] {
            assert_eq!(
                suggest(term, &recipients, 10),
                suggest(term, &recipients, 10),
                "term {}",
                term
            );
        }
    }

    #[test]
    fn test_match_does_not_use_prefix_tier() {
        let recipients = vec![Recipient::new("1", "Emma")];
        let candidates = RecipientMatcher::new().score_all("Em", &recipients);
        assert_eq!(candidates.len(), 1);
        assert_ne!(candidates[0].match_type, MatchType::Prefix);
    }

    #[test]
    fn test_suggest_prefix_tier() {
        let recipients = vec![Recipient::new("1", "Emma")];
        let suggestions = suggest("Em", &recipients, 5);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].recipient.name, "Emma");
        assert_eq!(suggestions[0].match_type, MatchType::Prefix);
        assert_score(suggestions[0].score, 0.9);
    }

    #[test]
    fn test_suggest_respects_limit_and_order() {
        let recipients = family();
        let suggestions = suggest("sa", &recipients, 10);
        assert!(!suggestions.is_empty());
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(names(&suggestions)[..2], ["Sara Garcia", "Sarah Johnson"]);

        let limited = suggest("sa", &recipients, 1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0], suggestions[0]);
    }

    #[test]
    fn test_suggest_empty_query_and_zero_limit() {
        let recipients = family();
        assert!(suggest("", &recipients, 10).is_empty());
        assert!(suggest("   ", &recipients, 10).is_empty());
        assert!(suggest("sa", &recipients, 0).is_empty());
    }

    #[test]
    fn test_suggest_skips_margin_rule() {
        let recipients = vec![Recipient::new("1", "Sam"), Recipient::new("2", "Samantha")];
        let suggestions = suggest("sam", &recipients, 5);
        assert_eq!(names(&suggestions), vec!["Sam", "Samantha"]);
        assert_score(suggestions[1].score, 0.9);
    }

    #[test]
    fn test_suggest_nickname_prefix() {
        let recipients = vec![Recipient::new("1", "Robert Wilson").with_nickname("Bobby")];
        let suggestions = suggest("bobb", &recipients, 5);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].match_type, MatchType::Prefix);
        assert_score(suggestions[0].score, 0.85);
    }

    #[test]
    fn test_explain_reports_query_details() {
        let recipients = family();
        let info = RecipientMatcher::new().explain("  Mom ", &recipients);
        assert_eq!(info.search_term, "  Mom ");
        assert_eq!(info.normalized_term, "mom");
        assert!(info.is_relationship);
        assert!(!info.is_nickname);
        assert_eq!(info.recipients_checked, recipients.len());
        assert_eq!(info.candidates[0].recipient.name, "Linda Martinez");

        let info = RecipientMatcher::new().explain("liz", &recipients);
        assert!(info.is_nickname);
    }

    #[test]
    fn test_custom_floor_drops_weak_candidates() {
        let recipients = vec![Recipient::new("1", "Samantha")];
        let strict = RecipientMatcher::new().with_inclusion_floor(0.8);
        assert_eq!(strict.match_recipient("sam", &recipients).unwrap(), MatchResult::None);
    }
}
