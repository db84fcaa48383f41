//! Fuzzy ranking of stop names for autocomplete.
//!
//! Scores are heuristic relevance numbers, not edit distances. A higher
//! score is a better match; zero means "don't suggest".

/// Score awarded to an exact (case-insensitive) match.
pub const EXACT_MATCH_SCORE: u32 = 1000;

const PREFIX_BONUS: i64 = 500;
const CONTAINS_BONUS: i64 = 300;
const WORD_PREFIX_BONUS: i64 = 200;
const WORD_CONTAINS_BONUS: i64 = 50;
const SEQUENCE_STEP: i64 = 10;
const FULL_SEQUENCE_BONUS: i64 = 100;
const LENGTH_PENALTY: i64 = 2;

/// Score how well `candidate` matches the partial `query`.
///
/// Both are compared lowercased; the query is also trimmed.
///
/// Scoring:
/// - Exact match: 1000, nothing else counted
/// - Candidate starts with query: +500
/// - Candidate contains query: +300
/// - Per word of the candidate: +200 if it starts with the query,
///   otherwise +50 if it contains it
/// - Characters matched in order: +10 × current run length each
/// - Whole query matched as a subsequence: +100
/// - Penalty: -2 per character the candidate is longer than the query
///
/// Never negative.
///
/// # Examples
///
/// ```
/// use bus_finder::suggest::score;
///
/// assert_eq!(score("gabtoli", "Gabtoli"), 1000);
/// assert!(score("gab", "Gabtoli") > score("gab", "Gabtoli Bus Stand"));
/// assert_eq!(score("gab", "Mohakhali"), 0);
/// ```
pub fn score(query: &str, candidate: &str) -> u32 {
    let query = query.trim().to_lowercase();
    let candidate = candidate.to_lowercase();
    score_normalized(&query, &candidate)
}

fn score_normalized(query: &str, candidate: &str) -> u32 {
    if candidate == query {
        return EXACT_MATCH_SCORE;
    }

    let mut score: i64 = 0;

    if candidate.starts_with(query) {
        score += PREFIX_BONUS;
    }

    if candidate.contains(query) {
        score += CONTAINS_BONUS;
    }

    for word in candidate.split(is_word_separator) {
        if word.starts_with(query) {
            score += WORD_PREFIX_BONUS;
        } else if word.contains(query) {
            score += WORD_CONTAINS_BONUS;
        }
    }

    let query_chars: Vec<char> = query.chars().collect();
    let mut matched = 0;
    let mut run: i64 = 0;
    for c in candidate.chars() {
        if matched == query_chars.len() {
            break;
        }
        if c == query_chars[matched] {
            run += 1;
            score += run * SEQUENCE_STEP;
            matched += 1;
        } else {
            run = 0;
        }
    }

    if matched == query_chars.len() {
        score += FULL_SEQUENCE_BONUS;
    }

    let extra = candidate.chars().count() as i64 - query_chars.len() as i64;
    if extra > 0 {
        score -= extra * LENGTH_PENALTY;
    }

    score.max(0) as u32
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | ',' | '.' | '/' | '(' | ')')
}

/// Rank `candidates` against a partial `query`.
///
/// Returns at most `limit` candidates with a positive score, best first.
/// Equal scores keep their input order. A blank query or an empty
/// candidate list gives no suggestions.
///
/// # Examples
///
/// ```
/// use bus_finder::suggest::suggest;
///
/// let stops = ["Gabtoli", "Gabtoli Bus Stand", "Mohakhali"];
/// assert_eq!(suggest("gab", &stops, 5), vec!["Gabtoli", "Gabtoli Bus Stand"]);
/// ```
pub fn suggest<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&str, u32)> = candidates
        .iter()
        .map(|c| {
            let c = c.as_ref();
            (c, score_normalized(&query, &c.to_lowercase()))
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    // Stable sort: ties keep input order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(limit)
        .map(|(c, _)| c.to_string())
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Never more than `limit` results, all with a positive score
        #[test]
        fn suggest_bounded_and_positive(
            query in "[a-z ]{0,6}",
            candidates in prop::collection::vec("[A-Za-z ()-]{0,20}", 0..30),
            limit in 0usize..8,
        ) {
            let results = suggest(&query, &candidates, limit);
            prop_assert!(results.len() <= limit);
            for r in &results {
                prop_assert!(score(&query, r) > 0);
            }
        }

        /// Results are ordered by descending score
        #[test]
        fn suggest_sorted_by_score(
            query in "[a-z]{1,4}",
            candidates in prop::collection::vec("[a-z ]{1,15}", 1..20),
        ) {
            let results = suggest(&query, &candidates, candidates.len());
            for pair in results.windows(2) {
                prop_assert!(score(&query, &pair[0]) >= score(&query, &pair[1]));
            }
        }
    }
}
