//! Host-environment contracts.
//!
//! The toolbar core never touches a real document tree. Everything it needs
//! from the embedding — tree shape, selection state, formatting commands, and
//! the visual toolbar surface — comes through the traits in this module. A
//! browser embedding implements them against its DOM; the in-memory
//! implementation used by tests and the demo binary lives in [`crate::dom`].

use crate::toolbar::{BubbleVisual, ButtonStates, Position};

/// Opaque handle to a node in the host document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding rectangle of the active selection, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretRect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
}

/// Read-only snapshot of the host selection at one instant.
///
/// Taken fresh at every inspection point; never stored across events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionSnapshot {
    /// True when the selection is a caret rather than a range.
    pub collapsed: bool,
    /// Node owning the selection's focus point, when one exists.
    pub anchor: Option<NodeId>,
    /// Bounding rectangle of the active range, when one exists.
    pub rect: Option<CaretRect>,
}

impl SelectionSnapshot {
    /// The "no selection at all" snapshot.
    pub const fn none() -> Self {
        Self {
            collapsed: true,
            anchor: None,
            rect: None,
        }
    }
}

impl Default for SelectionSnapshot {
    fn default() -> Self {
        Self::none()
    }
}

/// Handle to a selection range saved by the host for later restoration.
///
/// Focusing the URL input can collapse or replace the live selection, so the
/// link-edit flow saves the range up front and restores it at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeId(pub u64);

/// A formatting operation delegated to the host text-formatting capability.
///
/// Each command applies to the current selection implicitly and is
/// fire-and-forget: no return value is consumed by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    /// Convert the selection's block container to the given tag.
    FormatBlock(String),
    Outdent,
    Unlink,
    CreateLink(String),
}

/// Read access to the host document tree.
pub trait DocumentTree {
    /// Parent of `node`, or `None` at the document root.
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    /// Upper-case tag name of `node` (e.g. `"B"`, `"BLOCKQUOTE"`, `"#text"`).
    fn tag_of(&self, node: NodeId) -> &str;

    /// Link target when `node` is a link element.
    fn link_target_of(&self, node: NodeId) -> Option<&str>;

    /// Whether `node` carries the given marker (the class/attribute
    /// equivalent used to identify the editable region and the toolbar's
    /// own controls).
    fn has_marker(&self, node: NodeId, marker: &str) -> bool;
}

/// Access to the host's live selection.
pub trait SelectionAccess {
    /// Snapshot of the current selection.
    fn selection(&self) -> SelectionSnapshot;

    /// Vertical scroll offset of the page, in pixels.
    fn scroll_offset_y(&self) -> f64;

    /// Save the active range for later restoration; `None` when there is
    /// no active range.
    fn save_range(&mut self) -> Option<RangeId>;

    /// Replace the active range with a previously saved one.
    fn restore_range(&mut self, range: RangeId);

    /// Collapse the selection to an empty caret.
    fn clear_selection(&mut self);
}

/// The external text-formatting capability.
pub trait FormatCommands {
    /// Apply `command` to the current selection. The host is responsible
    /// for no-op-ing commands that arrive without a meaningful selection.
    fn exec(&mut self, command: FormatCommand);
}

/// Visual sink for the bubble and its controls.
///
/// The state machine recomputes visual state wholesale on every relevant
/// event and pushes it here; implementations only need to reflect it.
pub trait ToolbarSurface {
    /// Show, fade, or hide the bubble at the given page position.
    fn set_bubble(&mut self, visual: BubbleVisual, position: Position);

    /// Set the active/inactive flag on each formatting button.
    fn set_buttons(&mut self, states: ButtonStates);

    /// Switch the options panel between button mode and URL-input mode.
    fn set_panel_url_mode(&mut self, url_mode: bool);

    /// Set the text displayed in the URL input.
    fn set_url_input(&mut self, text: &str);

    /// Give keyboard focus to the URL input.
    fn focus_url_input(&mut self);

    /// Remove keyboard focus from the URL input.
    fn blur_url_input(&mut self);
}

/// Everything the controller needs from one host value.
pub trait Host: DocumentTree + SelectionAccess + FormatCommands + ToolbarSurface {}

impl<T: DocumentTree + SelectionAccess + FormatCommands + ToolbarSurface> Host for T {}
