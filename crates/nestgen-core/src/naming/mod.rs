pub mod singular;

use heck::ToPascalCase;
use serde::Serialize;

use crate::error::PlanError;

pub use singular::singularize;

/// Every identifier form derived from the raw resource name.
///
/// Leading underscores in the raw name survive in every form: `_users`
/// becomes `_Users` / `_User` / `_users` / `_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceName {
    /// The name exactly as supplied (surrounding whitespace trimmed).
    pub raw: String,
    /// Directory part of a `dir/name` input, e.g. `admin` for `admin/users`.
    pub directory: Option<String>,
    /// Class identifier, e.g. `Users`.
    pub classified: String,
    /// Per-item class identifier, e.g. `User`.
    pub singular_classified: String,
    /// Property-style identifier, e.g. `users`.
    pub camel: String,
    /// Per-item property-style identifier, e.g. `user`.
    pub singular_camel: String,
    /// Kebab-case file name fragment, e.g. `users`.
    pub file_stem: String,
    /// Per-item file name fragment, e.g. `user`.
    pub singular_stem: String,
}

/// Derive all name forms from a raw resource name.
///
/// A name of the form `dir/name` is split on its last separator; the forms
/// are built from the base name and the directory is kept aside.
pub fn transform(raw: &str) -> Result<ResourceName, PlanError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PlanError::InvalidName(raw.to_string()));
    }
    let (directory, base) = split_path(raw)?;

    let classified = classify(base);
    let singular_classified = singularize(&classified);
    let file_stem = dasherize(base);
    let singular_stem = singularize(&file_stem);

    Ok(ResourceName {
        raw: raw.to_string(),
        directory,
        camel: camelize(&classified),
        singular_camel: camelize(&singular_classified),
        classified,
        singular_classified,
        file_stem,
        singular_stem,
    })
}

/// Split a name into its directory part and base name.
///
/// `/` and `\` both separate segments. Empty and `.` directory segments are
/// dropped. Absolute paths, drive prefixes, `..` segments and an empty base
/// name are rejected, so planned paths never leave the output directory.
pub fn split_path(raw: &str) -> Result<(Option<String>, &str), PlanError> {
    let invalid = || PlanError::InvalidName(raw.to_string());

    if raw.starts_with(['/', '\\']) || raw.as_bytes().get(1) == Some(&b':') {
        return Err(invalid());
    }

    let mut segments: Vec<&str> = raw.split(['/', '\\']).collect();
    let base = segments.pop().map(str::trim).unwrap_or_default();
    if base.is_empty() || base == "." || base == ".." {
        return Err(invalid());
    }
    if segments.iter().any(|segment| segment.trim() == "..") {
        return Err(invalid());
    }

    let dirs: Vec<&str> = segments
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    let directory = (!dirs.is_empty()).then(|| dirs.join("/"));
    Ok((directory, base))
}

/// PascalCase each `_`-separated segment and rejoin with `_`.
///
/// Underscores are literal characters of the identifier, not word breaks.
/// Within a segment, `heck` decides the word boundaries and drops any
/// character it does not treat as part of a word.
pub fn classify(name: &str) -> String {
    name.split('_')
        .map(|segment| segment.to_pascal_case())
        .collect::<Vec<_>>()
        .join("_")
}

/// Kebab-case a name for use in file paths.
///
/// Lower-to-upper boundaries and whitespace become `-` and ASCII letters are
/// lower-cased. All other characters, `_` included, are kept as they are.
pub fn dasherize(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                result.push('-');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() {
            result.push('-');
        } else {
            result.push(ch);
        }
        prev = Some(ch);
    }

    result
}

/// Lower-case the first letter after the leading underscore run.
pub fn camelize(classified: &str) -> String {
    let underscores = classified.len() - classified.trim_start_matches('_').len();
    let (prefix, rest) = classified.split_at(underscores);
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_ascii_lowercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
