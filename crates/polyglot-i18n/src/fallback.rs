//! Locale fallback chains

use std::collections::HashMap;

/// Build the ordered list of locales consulted after `locale` misses.
///
/// Explicit locales (from a view) come first, then the locales configured
/// for `locale`, then `default_locale`. Earlier entries win; duplicates and
/// `locale` itself are dropped.
pub fn candidates(
    locale: &str,
    explicit: &[String],
    configured: &HashMap<String, Vec<String>>,
    default_locale: &str,
) -> Vec<String> {
    let configured = configured.get(locale).map(Vec::as_slice).unwrap_or_default();

    let mut chain: Vec<String> = Vec::with_capacity(explicit.len() + configured.len() + 1);
    let ordered = explicit
        .iter()
        .chain(configured)
        .map(String::as_str)
        .chain(std::iter::once(default_locale));

    for candidate in ordered {
        if candidate.is_empty() || candidate == locale {
            continue;
        }
        if !chain.iter().any(|seen| seen == candidate) {
            chain.push(candidate.to_string());
        }
    }

    chain
}
