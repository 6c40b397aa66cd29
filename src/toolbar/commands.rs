//! Command dispatch: mapping button interactions to formatting commands.
//!
//! The decision logic is kept as pure functions over [`AncestorTags`] and
//! the raw input text; the controller's effect handler feeds the resulting
//! [`FormatCommand`]s to the host capability.

use crate::host::FormatCommand;
use crate::inspector::AncestorTags;

/// Normalize a user-typed URL.
///
/// Empty input means "remove the link" and yields `None`. Anything without
/// an `http://` or `https://` scheme gets `http://` prepended.
pub fn normalize_url(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else {
        Some(format!("http://{raw}"))
    }
}

/// Commands for a quote-button press.
///
/// A selection already inside a blockquote converts back to a paragraph and
/// outdents; anything else becomes a blockquote. Applying the result twice
/// therefore round-trips instead of nesting quotes.
pub fn quote_toggle_commands(tags: &AncestorTags) -> Vec<FormatCommand> {
    if tags.contains("BLOCKQUOTE") {
        vec![
            FormatCommand::FormatBlock("p".to_string()),
            FormatCommand::Outdent,
        ]
    } else {
        vec![FormatCommand::FormatBlock("blockquote".to_string())]
    }
}

/// Commands for a link commit: always unlink first, then re-link when a
/// URL remains after normalization. The unconditional unlink is what makes
/// committing an empty URL a repeatable "remove the link".
pub fn link_commit_commands(raw: &str) -> Vec<FormatCommand> {
    let mut commands = vec![FormatCommand::Unlink];
    if let Some(url) = normalize_url(raw) {
        commands.push(FormatCommand::CreateLink(url));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prepends_scheme_when_missing() {
        assert_eq!(
            normalize_url("example.com"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn normalize_keeps_existing_schemes() {
        assert_eq!(
            normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn normalize_rejects_empty_input() {
        assert_eq!(normalize_url(""), None);
    }

    #[test]
    fn quote_press_outside_quote_formats_blockquote() {
        let tags: AncestorTags = ["P", "DIV"].into_iter().collect();
        assert_eq!(
            quote_toggle_commands(&tags),
            vec![FormatCommand::FormatBlock("blockquote".to_string())]
        );
    }

    #[test]
    fn quote_press_inside_quote_unwraps() {
        let tags: AncestorTags = ["BLOCKQUOTE", "DIV"].into_iter().collect();
        assert_eq!(
            quote_toggle_commands(&tags),
            vec![
                FormatCommand::FormatBlock("p".to_string()),
                FormatCommand::Outdent,
            ]
        );
    }

    #[test]
    fn empty_commit_only_unlinks() {
        assert_eq!(link_commit_commands(""), vec![FormatCommand::Unlink]);
    }

    #[test]
    fn commit_unlinks_then_relinks() {
        assert_eq!(
            link_commit_commands("foo.com"),
            vec![
                FormatCommand::Unlink,
                FormatCommand::CreateLink("http://foo.com".to_string()),
            ]
        );
    }
}
