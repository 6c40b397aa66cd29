//! Pure state transitions for the bubble.
//!
//! [`update`] is the whole state machine: it consumes a [`Message`] built
//! by the event binder and returns the next [`Model`]. It never touches the
//! host — formatting commands, range bookkeeping, and focus changes happen
//! in the controller's effect handler, keyed off the same message.

use crate::host::CaretRect;
use crate::inspector::AncestorTags;

use super::model::{ButtonStates, Model, Phase};
use super::position::{Position, compute_position};

/// Snapshot of everything a selection check needs, assembled by the event
/// binder from the host at event time.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionContext {
    /// True when the selection is a caret rather than a range.
    pub collapsed: bool,
    /// True when the anchor's immediate container carries the
    /// editable-region marker.
    pub in_editable: bool,
    /// Ancestor tags of the selection's anchor.
    pub tags: AncestorTags,
    /// Bounding rectangle of the active range, when one exists.
    pub rect: Option<CaretRect>,
    /// Page scroll offset at event time.
    pub scroll_y: f64,
}

impl SelectionContext {
    /// Context representing "no usable selection".
    pub fn empty() -> Self {
        Self {
            collapsed: true,
            in_editable: false,
            tags: AncestorTags::default(),
            rect: None,
            scroll_y: 0.0,
        }
    }
}

/// All events and actions the toolbar reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Document-level selection check (key-up, mouse-down, or the deferred
    /// mouse-up re-check).
    SelectionCheck(SelectionContext),
    /// Event targeted at the toolbar's own controls: refresh button states
    /// only, never evaluate visibility.
    ToolbarInteraction(AncestorTags),
    /// Window resized or page scrolled: refresh the bubble position.
    Reposition {
        rect: Option<CaretRect>,
        scroll_y: f64,
    },
    /// Fade timer elapsed for the given generation.
    FadeElapsed { generation: u64 },
    CompositionStart,
    CompositionEnd,
    /// Bold button pressed.
    ToggleBold,
    /// Italic button pressed.
    ToggleItalic,
    /// Quote button pressed; carries the ancestors at press time.
    ToggleQuote(AncestorTags),
    /// Link button pressed: toggle the URL panel.
    ToggleLinkEditor,
    /// The link-open debounce fired; carries the ancestors at fire time.
    LinkEditorReady(AncestorTags),
    /// Commit the link edit with the input's text (Enter or focus loss).
    CommitLink(String),
}

/// Pure function that advances the toolbar state by one message.
///
/// All state transitions happen here; no side effects occur in this
/// function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::SelectionCheck(ctx) => {
            if ctx.collapsed && !model.last_collapsed {
                // The selection vanished: start a fade episode. The bumped
                // generation is what lets a later selection supersede the
                // armed timer without cancelling it.
                model.phase = Phase::FadingOut;
                model.generation += 1;
            }
            if !ctx.collapsed && !model.composing && ctx.in_editable {
                model.buttons = ButtonStates::from_tags(&ctx.tags);
                if let Some(rect) = ctx.rect {
                    model.position = compute_position(rect, ctx.scroll_y);
                }
                model.phase = Phase::Visible;
            }
            model.last_collapsed = ctx.collapsed;
        }
        Message::ToolbarInteraction(tags) => {
            // Interacting with the toolbar itself must not be read as a
            // document selection change; the last-collapse flag stays put.
            model.buttons = ButtonStates::from_tags(&tags);
        }
        Message::Reposition { rect, scroll_y } => {
            if model.phase == Phase::Visible
                && let Some(rect) = rect
            {
                model.position = compute_position(rect, scroll_y);
            }
        }
        Message::FadeElapsed { generation } => {
            if model.phase == Phase::FadingOut && model.generation == generation {
                model.phase = Phase::Hidden;
                model.position = Position::OFF_SCREEN;
            }
        }
        Message::CompositionStart => model.composing = true,
        Message::CompositionEnd => model.composing = false,
        Message::ToggleBold | Message::ToggleItalic | Message::ToggleQuote(_) => {
            // Formatting is delegated to the host capability by the effect
            // handler; button flags refresh on the next selection check.
        }
        Message::ToggleLinkEditor => {
            model.url_mode = !model.url_mode;
            if !model.url_mode {
                model.url_input.clear();
            }
        }
        Message::LinkEditorReady(tags) => {
            model.url_input = tags.url().unwrap_or_default().to_string();
            // Keep the bubble up while the input holds focus: focusing it
            // collapses the live selection, and that collapse must not be
            // taken for the user dismissing the bubble.
            model.last_collapsed = false;
        }
        Message::CommitLink(_) => {
            model.url_mode = false;
            model.url_input.clear();
        }
    }
    model
}
