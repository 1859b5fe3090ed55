//! Decode `evaluation` facts into displayable records
//!
//! The scorer writes each evaluation into the knowledge base as
//! `evaluation(content, level, score, reasoning)`, where `reasoning` is a
//! semicolon-delimited string such as
//! `Source type: news (score: 0.6); Citations: true (3 found, score: 0.8)`.
//! The producer is fixed, so matching here is deliberately literal: segments
//! that match none of the patterns pass through untouched.
//!
//! Everything in this module is pure.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use credence_domain::{CredibilityLevel, KnowledgeFact};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"score: ([0-9.]+)").expect("score pattern is valid"));

static CITATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Citations: (YES|NO) \(([0-9]+) found, score: [0-9.]+\)")
        .expect("citations pattern is valid")
});

static SOURCE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Source type: ([a-z]+) \(score: ([0-9.]+)\)").expect("source pattern is valid")
});

static BARE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(score: [0-9.]+\)").expect("bare score pattern is valid"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("float pattern is valid")
});

/// One line of decoded reasoning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningPoint {
    /// Rewritten, human-readable text
    pub text: String,

    /// Percentage extracted from an embedded `score: <f>`, if any
    pub score: Option<i64>,
}

/// Colour band of a headline score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 70 and above
    High,
    /// 40 to 69
    Medium,
    /// Below 40
    Low,
}

impl ScoreBand {
    /// Band for a percentage
    pub fn from_percent(percent: i64) -> Self {
        if percent >= 70 {
            ScoreBand::High
        } else if percent >= 40 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// A decoded `evaluation` fact
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFact {
    /// Evaluated content (`arguments[0]`)
    pub content: String,

    /// Level as written (`arguments[1]`)
    pub level: String,

    /// Level, when it is one of the known values
    pub level_kind: Option<CredibilityLevel>,

    /// Headline score, rounded (`arguments[2]`)
    pub score_percent: Option<i64>,

    /// Decoded reasoning (`arguments[3]`)
    pub points: Vec<ReasoningPoint>,

    /// Evaluation time from the comment
    pub evaluated_at: Option<DateTime<Utc>>,

    /// Evaluation time as written in the comment
    pub evaluated_at_raw: Option<String>,
}

impl DisplayFact {
    /// Colour band of the headline score
    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score_percent.map(ScoreBand::from_percent)
    }
}

/// Drop every `evaluation` fact whose first argument was already seen on an
/// earlier kept `evaluation` fact.
///
/// The earliest occurrence wins and the relative order of the survivors is
/// unchanged. Facts with other predicates are always kept.
pub fn dedupe_evaluations(facts: &[KnowledgeFact]) -> Vec<&KnowledgeFact> {
    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let mut kept = Vec::with_capacity(facts.len());

    for fact in facts {
        if fact.is_evaluation() {
            let key = fact.arguments.first().map(String::as_str);
            if !seen.insert(key) {
                continue;
            }
        }
        kept.push(fact);
    }

    kept
}

/// Decode one fact
///
/// Returns `None` for facts that are not evaluations, and for evaluations
/// with fewer than four arguments.
pub fn decode(fact: &KnowledgeFact) -> Option<DisplayFact> {
    if !fact.is_evaluation() {
        return None;
    }

    let (content, level, score, reasoning) = match fact.arguments.as_slice() {
        [content, level, score, reasoning, ..] => (content, level, score, reasoning),
        other => {
            debug!(
                "Skipping evaluation fact with {} argument(s), expected 4",
                other.len()
            );
            return None;
        }
    };

    let evaluated_at_raw = fact
        .comment
        .as_deref()
        .and_then(|comment| comment.split(" at ").nth(1))
        .filter(|raw| !raw.is_empty())
        .map(str::to_string);

    Some(DisplayFact {
        content: content.clone(),
        level: level.clone(),
        level_kind: CredibilityLevel::parse(level),
        score_percent: parse_float_prefix(score)
            .filter(|value| value.is_finite())
            .map(|value| round_half_up(value) as i64),
        points: parse_reasoning(reasoning),
        evaluated_at: evaluated_at_raw.as_deref().and_then(parse_timestamp),
        evaluated_at_raw,
    })
}

/// Dedupe then decode a listing, skipping anything that is not an evaluation
pub fn decode_all(facts: &[KnowledgeFact]) -> Vec<DisplayFact> {
    dedupe_evaluations(facts)
        .into_iter()
        .filter_map(decode)
        .collect()
}

/// Split a reasoning string on `;` and rewrite each trimmed segment
pub fn parse_reasoning(reasoning: &str) -> Vec<ReasoningPoint> {
    reasoning
        .split(';')
        .map(|segment| decode_point(segment.trim()))
        .collect()
}

fn decode_point(segment: &str) -> ReasoningPoint {
    let score = SCORE
        .captures(segment)
        .and_then(|caps| parse_float_prefix(&caps[1]))
        .filter(|value| value.is_finite())
        .map(to_percent);

    let text = segment.replace(": true", ": YES").replace(": false", ": NO");

    let text = CITATIONS
        .replace_all(&text, |caps: &Captures| {
            format!("Citations: {} references found", &caps[2])
        })
        .into_owned();

    let text = SOURCE_TYPE
        .replace_all(&text, |caps: &Captures| {
            let percent = parse_float_prefix(&caps[2])
                .filter(|value| value.is_finite())
                .map(|value| to_percent(value).to_string())
                .unwrap_or_else(|| "NaN".to_string());
            format!("Source: {} ({}%)", capitalize(&caps[1]), percent)
        })
        .into_owned();

    // A zero percentage counts as "no score" here, so the parenthetical is dropped
    let replacement = match score {
        Some(percent) if percent != 0 => format!("({}%)", percent),
        _ => String::new(),
    };
    let text = BARE_SCORE
        .replace_all(&text, regex::NoExpand(&replacement))
        .into_owned();

    ReasoningPoint { text, score }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse the leading decimal number of `input`, ignoring trailing garbage
fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    FLOAT_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn to_percent(value: f64) -> i64 {
    round_half_up(value * 100.0) as i64
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn evaluation(content: &str, level: &str, score: &str, reasoning: &str) -> KnowledgeFact {
        KnowledgeFact::new(
            "evaluation",
            vec![
                content.to_string(),
                level.to_string(),
                score.to_string(),
                reasoning.to_string(),
            ],
        )
    }

    fn texts(points: &[ReasoningPoint]) -> Vec<&str> {
        points.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_representative_reasoning() {
        let points = parse_reasoning(
            "Source type: news (score: 0.6); Citations: true (3 found, score: 0.8); hasEmotionalLanguage: false",
        );

        assert_eq!(
            texts(&points),
            vec![
                "Source: News (60%)",
                "Citations: 3 references found",
                "hasEmotionalLanguage: NO",
            ]
        );
        assert_eq!(points[0].score, Some(60));
        assert_eq!(points[1].score, Some(80));
        assert_eq!(points[2].score, None);
    }

    #[test]
    fn test_citations_absent() {
        let points = parse_reasoning("Citations: false (0 found, score: 0.1)");
        assert_eq!(points[0].text, "Citations: 0 references found");
        assert_eq!(points[0].score, Some(10));
    }

    #[test]
    fn test_bare_score_rewritten_to_percentage() {
        let points = parse_reasoning("Language neutrality (score: 0.75)");
        assert_eq!(points[0].text, "Language neutrality (75%)");
        assert_eq!(points[0].score, Some(75));
    }

    #[test]
    fn test_zero_score_parenthetical_dropped() {
        let points = parse_reasoning("Contradictions found (score: 0.0)");
        assert_eq!(points[0].text, "Contradictions found ");
        assert_eq!(points[0].score, Some(0));
    }

    #[test]
    fn test_unmatched_segments_pass_through() {
        let points = parse_reasoning("  Author is a known expert ;Published recently");
        assert_eq!(
            texts(&points),
            vec!["Author is a known expert", "Published recently"]
        );
        assert!(points.iter().all(|p| p.score.is_none()));
    }

    #[test]
    fn test_boolean_rewrite_applies_everywhere() {
        let points = parse_reasoning("isAnonymous: true, knownExpert: false");
        assert_eq!(points[0].text, "isAnonymous: YES, knownExpert: NO");
    }

    #[test]
    fn test_source_type_with_uppercase_is_not_reformatted() {
        // The producer always writes lowercase types; anything else is left alone
        let points = parse_reasoning("Source type: News (score: 0.6)");
        assert_eq!(points[0].text, "Source type: News (60%)");
    }

    #[test]
    fn test_empty_reasoning_yields_single_empty_point() {
        let points = parse_reasoning("");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].text, "");
    }

    #[test]
    fn test_decode_full_fact() {
        let fact = evaluation(
            "The city council approved the new budget",
            "credible",
            "78.6",
            "Source type: official (score: 0.9); Citations: true (5 found, score: 1)",
        )
        .with_comment("Evaluation stored at 2024-03-01T09:30:00.000Z");

        let display = decode(&fact).unwrap();
        assert_eq!(display.content, "The city council approved the new budget");
        assert_eq!(display.level_kind, Some(CredibilityLevel::Credible));
        assert_eq!(display.score_percent, Some(79));
        assert_eq!(display.score_band(), Some(ScoreBand::High));
        assert_eq!(
            texts(&display.points),
            vec!["Source: Official (90%)", "Citations: 5 references found"]
        );

        let at = display.evaluated_at.unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2024, 3, 1));
        assert_eq!((at.hour(), at.minute()), (9, 30));
        assert_eq!(
            display.evaluated_at_raw.as_deref(),
            Some("2024-03-01T09:30:00.000Z")
        );
    }

    #[test]
    fn test_decode_headline_score_rounding() {
        let cases = [("42.5", Some(43)), ("42.49", Some(42)), ("7", Some(7)), ("61abc", Some(61)), ("n/a", None)];
        for (raw, expected) in cases {
            let display = decode(&evaluation("c", "doubtful", raw, "")).unwrap();
            assert_eq!(display.score_percent, expected, "score {:?}", raw);
        }
    }

    #[test]
    fn test_decode_timestamp_variants() {
        let with = |comment: &str| {
            decode(&evaluation("c", "suspect", "10", "").with_comment(comment)).unwrap()
        };

        assert!(with("Stored at 2024-02-10 08:00:00").evaluated_at.is_some());
        assert!(with("Stored at 2024-02-10").evaluated_at.is_some());

        let unparseable = with("Stored at noon");
        assert!(unparseable.evaluated_at.is_none());
        assert_eq!(unparseable.evaluated_at_raw.as_deref(), Some("noon"));

        let absent = with("Stored by the rule engine");
        assert!(absent.evaluated_at.is_none());
        assert!(absent.evaluated_at_raw.is_none());

        // Only the segment between the first and second separator is used
        let twice = with("Stored at 2024-02-10 at the office");
        assert_eq!(twice.evaluated_at_raw.as_deref(), Some("2024-02-10"));
    }

    #[test]
    fn test_unknown_level_kept_verbatim() {
        let display = decode(&evaluation("c", "mixed", "50", "")).unwrap();
        assert_eq!(display.level, "mixed");
        assert_eq!(display.level_kind, None);
    }

    #[test]
    fn test_non_evaluation_skipped() {
        let fact = KnowledgeFact::new("source_type", vec!["bbc.co.uk".into(), "news".into()]);
        assert!(decode(&fact).is_none());
    }

    #[test]
    fn test_short_evaluation_skipped() {
        let fact = KnowledgeFact::new("evaluation", vec!["content".into(), "credible".into()]);
        assert!(decode(&fact).is_none());
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let facts = vec![
            evaluation("same", "credible", "80", "first"),
            evaluation("other", "doubtful", "50", "x"),
            evaluation("same", "suspect", "10", "second"),
        ];

        let kept = dedupe_evaluations(&facts);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].arguments[3], "first");
        assert_eq!(kept[1].arguments[0], "other");
    }

    #[test]
    fn test_dedupe_ignores_other_predicates() {
        let facts = vec![
            KnowledgeFact::new("source_type", vec!["same".into()]),
            evaluation("same", "credible", "80", ""),
            KnowledgeFact::new("source_type", vec!["same".into()]),
        ];

        let kept = dedupe_evaluations(&facts);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_dedupe_treats_missing_content_as_equal() {
        let facts = vec![
            KnowledgeFact::new("evaluation", vec![]),
            KnowledgeFact::new("evaluation", vec![]),
        ];
        assert_eq!(dedupe_evaluations(&facts).len(), 1);
    }

    #[test]
    fn test_decode_all_is_deterministic() {
        let facts = vec![
            KnowledgeFact::new("source_type", vec!["x".into()]),
            evaluation("a", "credible", "90", "Source type: blog (score: 0.3)"),
            evaluation("a", "credible", "91", "ignored"),
            evaluation("b", "suspect", "5", "hasCitations: false"),
        ];

        let first = decode_all(&facts);
        let second = decode_all(&facts);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].points[0].text, "Source: Blog (30%)");
        assert_eq!(first[1].points[0].text, "hasCitations: NO");
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::from_percent(70), ScoreBand::High);
        assert_eq!(ScoreBand::from_percent(69), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_percent(40), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_percent(39), ScoreBand::Low);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("0.6"), Some(0.6));
        assert_eq!(parse_float_prefix("  12.5kg"), Some(12.5));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }
}
