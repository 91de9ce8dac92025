/// Minimum similarity for a "did you mean" suggestion.
pub const SUGGESTION_CUTOFF: f64 = 0.8;

/// Result of looking a requested fixture name up in the available list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// The normalised names are equal; holds the name as published.
    Exact(String),
    /// No exact match, but this published name is close enough to suggest.
    Suggestion(String),
    NoMatch,
}

/// Lowercase and drop spaces, underscores and hyphens.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Match `query` against the published names.
#[must_use]
pub fn match_name(query: &str, available: &[String]) -> NameMatch {
    let wanted = normalize_name(query);

    if let Some(exact) = available.iter().find(|name| normalize_name(name) == wanted) {
        return NameMatch::Exact(exact.clone());
    }

    available
        .iter()
        .map(|name| (similarity(&wanted, &normalize_name(name)), name))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .max_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map_or(NameMatch::NoMatch, |(_, name)| {
            NameMatch::Suggestion(name.clone())
        })
}

/// Similarity ratio in `[0, 1]`: twice the matched characters over the total length.
///
/// Matched characters are counted by repeatedly taking the longest common
/// block and recursing on both sides of it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block, earliest in `a` then earliest in `b`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let k = prev[j] + 1;
                row[j + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = row;
    }
    best
}
