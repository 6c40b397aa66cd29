//! Toolbar state.
//!
//! Everything the bubble knows lives in [`Model`] — the current phase,
//! button flags, position, composition flag, and the in-flight link edit.
//! No ambient or global state exists anywhere in the crate.

use crate::host::RangeId;
use crate::inspector::AncestorTags;

use super::position::Position;

/// Bubble lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Parked off-screen.
    Hidden,
    /// Fade-out running; hides when the fade timer fires with a matching
    /// generation.
    FadingOut,
    /// Shown near the selection.
    Visible,
}

/// Visibility flag pushed to the host surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BubbleVisual {
    #[default]
    Hidden,
    Fading,
    Active,
}

/// Active flags for the four formatting buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStates {
    pub bold: bool,
    pub italic: bool,
    pub quote: bool,
    pub link: bool,
}

impl ButtonStates {
    /// Derive button flags from the inspected ancestor tags.
    pub fn from_tags(tags: &AncestorTags) -> Self {
        Self {
            bold: tags.contains("B"),
            italic: tags.contains("I"),
            quote: tags.contains("BLOCKQUOTE"),
            link: tags.contains("A"),
        }
    }
}

/// Link edit in flight: the selection saved before the URL input took
/// focus, and the text the input was prefilled with.
///
/// Created when the link editor finishes opening; consumed exactly once by
/// the commit, which makes a second commit trigger (Enter followed by the
/// blur it causes) a harmless no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLinkEdit {
    /// Range captured before focus moved into the input.
    pub range: RangeId,
    /// Prefill shown in the input when the editor opened.
    pub url_text: String,
}

/// The complete toolbar state.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub phase: Phase,
    /// Bumped when a fade-out starts. The fade timer captures the value it
    /// was armed with, so a timeout that outlived its episode is ignored
    /// instead of hiding a freshly shown bubble.
    pub generation: u64,
    pub buttons: ButtonStates,
    pub position: Position,
    /// Collapse flag observed by the previous selection check.
    pub last_collapsed: bool,
    /// True while an IME composition is in progress; selection-driven
    /// bubble logic is suppressed so interim composition states are not
    /// misread as user selections.
    pub composing: bool,
    /// True while the options panel shows the URL input.
    pub url_mode: bool,
    /// Link edit in flight, if any.
    pub pending_link: Option<PendingLinkEdit>,
    /// Text the URL input should display.
    pub url_input: String,
}

impl Model {
    pub fn new() -> Self {
        Self {
            phase: Phase::Hidden,
            generation: 0,
            buttons: ButtonStates::default(),
            position: Position::OFF_SCREEN,
            // The first check never fades: a fade requires the previous
            // check to have seen a non-collapsed selection.
            last_collapsed: true,
            composing: false,
            url_mode: false,
            pending_link: None,
            url_input: String::new(),
        }
    }

    /// Visual flag the surface should show for the current phase.
    pub const fn visual(&self) -> BubbleVisual {
        match self.phase {
            Phase::Hidden => BubbleVisual::Hidden,
            Phase::FadingOut => BubbleVisual::Fading,
            Phase::Visible => BubbleVisual::Active,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_is_hidden_and_parked() {
        let model = Model::new();
        assert_eq!(model.phase, Phase::Hidden);
        assert_eq!(model.position, Position::OFF_SCREEN);
        assert_eq!(model.visual(), BubbleVisual::Hidden);
        assert!(model.last_collapsed);
    }

    #[test]
    fn buttons_follow_ancestor_tags() {
        let tags: AncestorTags = ["B", "BLOCKQUOTE", "P"].into_iter().collect();
        let buttons = ButtonStates::from_tags(&tags);
        assert!(buttons.bold);
        assert!(buttons.quote);
        assert!(!buttons.italic);
        assert!(!buttons.link);
    }
}
