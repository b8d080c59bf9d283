// File: src/fuzzy/normalizer.rs
use crate::core::types::UNSORTED_MARKER;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static STRIPPED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d()]").expect("static regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Lower-cases a name and strips everything that should not influence its
/// identity: the unsorted marker, digits and parentheses. The remaining words
/// are returned sorted so that "Whole Milk" and "milk whole" agree.
fn sorted_words(name: &str) -> Vec<String> {
    let lowered = name.to_lowercase().replace(UNSORTED_MARKER, "");
    let stripped = STRIPPED_CHARS.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");

    let mut words: Vec<String> = collapsed.trim().split(' ').map(str::to_string).collect();
    words.sort();
    words
}

/// Returns the lookup keys for an item name, most specific first.
///
/// The first key joins every sorted word with a comma (the "full key"); it is
/// followed by each word on its own. Repeated words are kept, so callers must
/// tolerate duplicate entries. The result is never empty: a name with no
/// words left after stripping yields `["", ""]`.
pub fn candidate_keys(name: &str) -> Vec<String> {
    let words = sorted_words(name);
    let mut keys = Vec::with_capacity(words.len() + 1);
    keys.push(words.join(","));
    keys.extend(words);
    debug!(item = name, ?keys, "lookup candidates");
    keys
}

/// The full key alone, used for exact-match decisions.
pub fn full_key(name: &str) -> String {
    sorted_words(name).join(",")
}

/// True when the name already carries the unsorted marker, in any casing.
pub fn has_unsorted_marker(name: &str) -> bool {
    name.to_lowercase().contains(UNSORTED_MARKER)
}
