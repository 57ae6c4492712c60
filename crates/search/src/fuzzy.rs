//! Typo-tolerant matching of a query against a text field.
//!
//! Checks run from cheapest and most certain to most lenient:
//! 1. exact substring (1.0, returns immediately)
//! 2. token prefix (0.95)
//! 3. per-token edit distance, tolerance scaled by query length (similarity × 0.8)
//! 4. whole-phrase edit distance for multi-word queries (similarity × 0.7)
//!
//! The constants are product behavior: changing any of them changes what
//! buyers see for a given query.

use catalog::Product;

/// Score for `query` appearing verbatim inside the text
pub const EXACT_SCORE: f32 = 1.0;
/// Score for a token that starts with `query`
pub const PREFIX_SCORE: f32 = 0.95;
/// Multiplier applied to per-token edit-distance similarity
pub const TYPO_FACTOR: f32 = 0.8;
/// Multiplier applied to whole-phrase edit-distance similarity
pub const PHRASE_FACTOR: f32 = 0.7;
/// Whole-phrase similarity must exceed this to count
pub const PHRASE_MIN_SIMILARITY: f32 = 0.6;

/// Extra characters of each token compared against the query
const TOKEN_WINDOW_SLACK: usize = 2;
/// Extra characters of the text compared against a multi-word query
const PHRASE_WINDOW_SLACK: usize = 5;

/// Calculate Levenshtein edit distance between two strings.
///
/// Compares `char`s by code point, with no normalization, so `é` and `e`
/// differ.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    // table[j][i]: distance between b[..j] and a[..i]
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (j, row) in table.iter_mut().enumerate() {
        row[0] = j;
    }
    for i in 0..=m {
        table[0][i] = i;
    }

    for j in 1..=n {
        for i in 1..=m {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            table[j][i] = (table[j - 1][i - 1] + cost)
                .min(table[j][i - 1] + 1)
                .min(table[j - 1][i] + 1);
        }
    }

    table[n][m]
}

/// Edits tolerated for a query of `query_len` characters
pub fn max_typos(query_len: usize) -> usize {
    if query_len >= 4 { 2 } else { 1 }
}

/// Score `query` against `text`, in `[0, 1]`.
///
/// `query` must already be trimmed and lower-cased; `text` is lower-cased
/// here. Never fails: inputs that match nothing score 0.0.
///
/// ```ignore
/// assert_eq!(search::score("hoodie", "Black Hoodie"), 1.0);
/// ```
pub fn score(query: &str, text: &str) -> f32 {
    let text = text.to_lowercase();

    if text.contains(query) {
        return EXACT_SCORE;
    }

    let query_len = query.chars().count();
    let mut best = 0.0_f32;

    for token in text.split_whitespace() {
        best = best.max(token_score(query, query_len, token));
    }

    if query.contains(' ') {
        best = best.max(phrase_score(query, query_len, &text));
    }

    best
}

/// Best of `score(query, brand name)` and `score(query, product name)`.
///
/// Unbranded products have an empty brand name, which scores 0.0.
pub fn best_field_score(query: &str, product: &Product) -> f32 {
    score(query, product.brand_name()).max(score(query, &product.name))
}

fn token_score(query: &str, query_len: usize, token: &str) -> f32 {
    if token.starts_with(query) {
        return PREFIX_SCORE;
    }
    if query_len < 2 {
        return 0.0;
    }

    let token_len = token.chars().count();
    let window = char_prefix(token, (query_len + TOKEN_WINDOW_SLACK).max(token_len));
    let distance = levenshtein_distance(query, window);
    let similarity = 1.0 - distance as f32 / query_len.max(token_len) as f32;

    if distance <= max_typos(query_len) {
        similarity * TYPO_FACTOR
    } else {
        0.0
    }
}

fn phrase_score(query: &str, query_len: usize, text: &str) -> f32 {
    let window = char_prefix(text, query_len + PHRASE_WINDOW_SLACK);
    let window_len = window.chars().count();
    let distance = levenshtein_distance(query, window);
    let similarity = 1.0 - distance as f32 / query_len.max(window_len) as f32;

    if similarity > PHRASE_MIN_SIMILARITY {
        similarity * PHRASE_FACTOR
    } else {
        0.0
    }
}

/// First `n` chars of `s`, cut on a char boundary
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte_index, _)) => &s[..byte_index],
        None => s,
    }
}
