//! Caption rendering: substitutes the episode number into a caption pattern.

/// Token replaced by the episode number.
pub const EPISODE_PLACEHOLDER: &str = "{episode}";

/// Replaces every `{episode}` in `pattern` with `episode` verbatim.
///
/// Never fails: patterns without the placeholder come back unchanged, and any other brace
/// syntax (`{`, `{name}`, `{{episode}}` halves) is kept literally.
pub fn render(pattern: &str, episode: &str) -> String {
    pattern.replace(EPISODE_PLACEHOLDER, episode)
}

/// Accepts only non-empty strings made entirely of ASCII decimal digits. Leading zeros are kept
/// as-is and there is no upper bound.
pub fn is_episode_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
