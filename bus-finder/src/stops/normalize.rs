//! Stop label normalization.

/// Canonicalize a stop label for comparison.
///
/// Trims, lowercases, maps en/em dashes to `-`, collapses doubled spaces
/// and strips `(`, `)`, `,` and `.`. Total and idempotent.
///
/// # Examples
///
/// ```
/// use bus_finder::stops::normalize;
///
/// assert_eq!(normalize("  Mirpur–10 (Circle). "), "mirpur-10 circle");
/// assert_eq!(normalize(&normalize("Farm  Gate")), normalize("Farm  Gate"));
/// ```
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match c {
            '–' | '—' => out.push('-'),
            '(' | ')' | ',' | '.' => {}
            ' ' if out.ends_with(' ') => {}
            _ => out.push(c),
        }
    }

    // Stripping punctuation can expose new outer whitespace ("x ." -> "x ").
    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Light cleanup used for displayed stop names.
///
/// Keeps case and punctuation; only trims, maps en-dashes to `-` and
/// collapses doubled spaces.
pub fn clean_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '–' => out.push('-'),
            ' ' if out.ends_with(' ') => {}
            _ => out.push(c),
        }
    }
    out
}
