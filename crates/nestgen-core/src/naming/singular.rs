//! Deterministic English singularization.
//!
//! Only the last word of an identifier is touched: the tail after the last
//! non-alphanumeric character (`-`, `_`, `.`, ...) or after the last
//! lower-to-upper case boundary. The rule set is fixed:
//!
//! 1. [`UNCOUNTABLE`] words are returned unchanged.
//! 2. [`IRREGULAR`] plurals map to their listed singular.
//! 3. `...ies` becomes `...y`.
//! 4. `...sses`, `...xes`, `...zzes`, `...ches`, `...shes` drop `es`.
//! 5. Words ending in `ss`, `us` or `is` are returned unchanged.
//! 6. A trailing `s` is dropped (and the result is looked up in
//!    [`IRREGULAR`] again, so `peoples` ends up as `person`).
//!
//! Every rule produces a word no rule applies to, which makes
//! [`singularize`] idempotent.

/// Words with no distinct singular form.
pub const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "media",
    "news",
    "series",
    "sheep",
    "species",
];

/// Irregular plural → singular pairs, matched case-insensitively.
pub const IRREGULAR: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("caches", "cache"),
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("menus", "menu"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("people", "person"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("vertices", "vertex"),
    ("women", "woman"),
];

const DROP_ES: &[&str] = &["sses", "xes", "zzes", "ches", "shes"];
const KEEP_AS_IS: &[&str] = &["ss", "us", "is"];

/// Singularize the last word of `name`, leaving everything before it intact.
///
/// ```
/// use nestgen_core::naming::singular::singularize;
///
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("_Users"), "_User");
/// assert_eq!(singularize("user-categories"), "user-category");
/// assert_eq!(singularize("People"), "Person");
/// ```
pub fn singularize(name: &str) -> String {
    let start = last_word_start(name);
    let (prefix, word) = name.split_at(start);
    format!("{prefix}{}", singularize_word(word))
}

/// Byte offset where the last word of `s` begins.
fn last_word_start(s: &str) -> usize {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    for k in (0..chars.len()).rev() {
        let (i, c) = chars[k];
        if !c.is_ascii_alphanumeric() {
            return i + c.len_utf8();
        }
        if c.is_ascii_uppercase() && k > 0 {
            let prev = chars[k - 1].1;
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() {
                return i;
            }
        }
    }
    0
}

fn singularize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some(singular) = irregular(&lower) {
        return match_case(word, singular);
    }
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if DROP_ES.iter().any(|suffix| lower.ends_with(suffix)) {
        return word[..word.len() - 2].to_string();
    }
    if KEEP_AS_IS.iter().any(|suffix| lower.ends_with(suffix)) {
        return word.to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') {
        let stripped = &word[..word.len() - 1];
        return match irregular(&stripped.to_ascii_lowercase()) {
            Some(singular) => match_case(stripped, singular),
            None => stripped.to_string(),
        };
    }
    word.to_string()
}

fn irregular(lower: &str) -> Option<&'static str> {
    IRREGULAR
        .iter()
        .find(|(plural, _)| *plural == lower)
        .map(|(_, singular)| *singular)
}

/// Carry the capitalization of `original`'s first letter over to `singular`.
fn match_case(original: &str, singular: &str) -> String {
    let capitalized = original
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase());
    if !capitalized {
        return singular.to_string();
    }
    let mut chars = singular.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
