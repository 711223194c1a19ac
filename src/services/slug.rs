//! Anchor slugs for headings.

/// Derive an anchor slug from raw heading text.
///
/// Lowercases, turns each space into a dash and drops everything that is not
/// an ASCII lowercase letter, digit, dash or underscore. Repeated text yields
/// repeated slugs; nothing is deduplicated or truncated.
///
/// ```
/// use bookpage::services::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("Step 2: Build"), "step-2-build");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .collect()
}
