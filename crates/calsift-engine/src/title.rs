//! Fuzzy title matching.
//!
//! Titles are compared with a partial-ratio score: the best similarity
//! of the shorter title against any equal-length window of the longer
//! one. "Lunch" scores 100 against "Lunch Break" because the shorter
//! string appears verbatim inside the longer.

use strsim::normalized_levenshtein;

/// Tunable matching policy for the duplicate filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    /// Minimum partial-ratio score (0-100) for two titles to be
    /// considered the same.
    pub fuzzy_threshold: u8,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self { fuzzy_threshold: 90 }
    }
}

/// Computes the partial-ratio similarity of two strings, 0-100.
///
/// Slides the shorter string over every equal-length character window
/// of the longer string and returns the best normalized Levenshtein
/// score found. Two empty strings score 100; one empty string against a
/// non-empty one scores 0.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "score is clamped to [0, 100] before the cast"
)]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (shorter, longer) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if shorter.is_empty() {
        return if longer.is_empty() { 100 } else { 0 };
    }

    let needle: String = shorter.iter().collect();
    let mut best = 0.0_f64;

    for window in longer.windows(shorter.len()) {
        let haystack: String = window.iter().collect();
        let score = normalized_levenshtein(&needle, &haystack);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Determines whether two event titles match under the given policy.
///
/// A missing title on either side means no match; absence of a title is
/// never treated as similarity.
#[must_use]
pub fn titles_match(a: Option<&str>, b: Option<&str>, policy: &MatchPolicy) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    partial_ratio(a, b) >= policy.fuzzy_threshold
}
