//! Locating a query within a route's stop sequence.

use super::normalize::normalize;

/// Find where `query` falls in `stops`.
///
/// Both sides are normalized. An exact match anywhere in the list wins;
/// otherwise the first stop that matches loosely (containment either way,
/// or every query word overlapping some stop word) is returned.
///
/// # Examples
///
/// ```
/// use bus_finder::stops::find_stop_index;
///
/// let stops = ["Gabtoli Bus Stand", "Gabtoli"];
/// assert_eq!(find_stop_index(&stops, "gabtoli"), Some(1));
/// assert_eq!(find_stop_index(&stops, "Bus Stand"), Some(0));
/// assert_eq!(find_stop_index(&stops, "Motijheel"), None);
/// ```
pub fn find_stop_index<S: AsRef<str>>(stops: &[S], query: &str) -> Option<usize> {
    find_normalized_index(stops, &normalize(query))
}

/// Like [`find_stop_index`], for a query that is already normalized.
pub fn find_normalized_index<S: AsRef<str>>(stops: &[S], query: &str) -> Option<usize> {
    let normalized: Vec<String> = stops.iter().map(|s| normalize(s.as_ref())).collect();
    locate(&normalized, query)
}

/// Match a normalized query against stops that are already normalized.
pub fn locate<S: AsRef<str>>(normalized: &[S], query: &str) -> Option<usize> {
    if let Some(idx) = normalized.iter().position(|stop| stop.as_ref() == query) {
        return Some(idx);
    }

    // A blank query only ever matches exactly.
    if query.is_empty() {
        return None;
    }

    normalized
        .iter()
        .position(|stop| matches_loosely(stop.as_ref(), query))
}

/// Containment or word-subset match between two normalized labels.
fn matches_loosely(stop: &str, query: &str) -> bool {
    if stop.is_empty() {
        return false;
    }

    if stop.contains(query) || query.contains(stop) {
        return true;
    }

    let stop_words: Vec<&str> = words(stop).collect();
    let mut query_words = words(query).peekable();
    if query_words.peek().is_none() {
        return false;
    }

    query_words.all(|qw| {
        stop_words
            .iter()
            .any(|sw| sw.contains(qw) || qw.contains(sw))
    })
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split([' ', '-', '/']).filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_beats_earlier_containment() {
        let stops = ["Gabtoli", "Gabtoli Bus Stand"];
        assert_eq!(find_stop_index(&stops, "gabtoli"), Some(0));

        let stops = ["Gabtoli Bus Stand", "Gabtoli"];
        assert_eq!(find_stop_index(&stops, "gabtoli"), Some(1));
    }

    #[test]
    fn containment_either_way() {
        let stops = ["Mohakhali", "Farmgate"];
        assert_eq!(find_stop_index(&stops, "farm"), Some(1));
        assert_eq!(find_stop_index(&stops, "Farmgate Police Box"), Some(1));
    }

    #[test]
    fn word_subset_match() {
        let stops = ["Shyamoli", "Mirpur-10 / Circle"];
        assert_eq!(find_stop_index(&stops, "circle mirpur"), Some(1));
        assert_eq!(find_stop_index(&stops, "circle uttara"), None);
    }

    #[test]
    fn first_loose_match_wins() {
        let stops = ["Mirpur 1", "Mirpur 10"];
        assert_eq!(find_stop_index(&stops, "mirpur"), Some(0));
    }

    #[test]
    fn query_is_normalized() {
        let stops = ["Kawran Bazar", "Mirpur-10"];
        assert_eq!(find_stop_index(&stops, "  MIRPUR–10 "), Some(1));
    }

    #[test]
    fn empty_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(find_stop_index(&empty, "gulistan"), None);

        let stops = ["Gulistan", "Farmgate"];
        assert_eq!(find_stop_index(&stops, ""), None);
        assert_eq!(find_stop_index(&stops, " . "), None);

        let defective = ["Gulistan", "()"];
        assert_eq!(find_stop_index(&defective, ""), Some(1));
    }

    #[test]
    fn separators_only_query_does_not_match_everything() {
        let stops = ["Gulistan", "Farmgate"];
        assert_eq!(find_stop_index(&stops, "- /"), None);
    }

    #[test]
    fn blank_stop_never_matches_loosely() {
        let stops = ["", "Gulistan"];
        assert_eq!(find_stop_index(&stops, "gulistan"), Some(1));
    }
}
