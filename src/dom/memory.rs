//! Host double: tree + recorded selection, command log, and surface.

use crate::host::{
    CaretRect, DocumentTree, FormatCommand, FormatCommands, NodeId, RangeId, SelectionAccess,
    SelectionSnapshot, ToolbarSurface,
};
use crate::inspector::inspect;
use crate::toolbar::{BubbleVisual, ButtonStates, Position};

use super::tree::DomTree;

/// Last visual state pushed by the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub visual: BubbleVisual,
    pub position: Position,
    pub buttons: ButtonStates,
    pub url_mode: bool,
    pub url_input: String,
    pub url_input_focused: bool,
}

/// In-memory host: owns a [`DomTree`], a live selection, saved ranges, a
/// log of every formatting command, and the recorded surface state.
///
/// Formatting commands are both logged and simulated with simple tree
/// edits (wrap/unwrap for inline tags, a retag for blocks), so flows like
/// "commit a link, then re-inspect" behave observably end-to-end.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    tree: DomTree,
    selection: SelectionSnapshot,
    saved: Vec<SelectionSnapshot>,
    scroll_y: f64,
    commands: Vec<FormatCommand>,
    surface: SurfaceState,
}

impl MemoryHost {
    pub fn new(tree: DomTree) -> Self {
        Self {
            tree,
            selection: SelectionSnapshot::none(),
            saved: Vec::new(),
            scroll_y: 0.0,
            commands: Vec::new(),
            surface: SurfaceState::default(),
        }
    }

    /// Simulate the user selecting text anchored at `anchor`.
    pub fn select(&mut self, anchor: NodeId, rect: CaretRect) {
        self.selection = SelectionSnapshot {
            collapsed: false,
            anchor: Some(anchor),
            rect: Some(rect),
        };
    }

    /// Simulate the selection collapsing to a caret.
    pub const fn collapse(&mut self) {
        self.selection.collapsed = true;
    }

    pub const fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Every formatting command issued so far, in order.
    pub fn commands(&self) -> &[FormatCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub const fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    fn toggle_inline(&mut self, anchor: NodeId, tag: &str) {
        if inspect(&self.tree, anchor).contains(tag) {
            self.tree.unwrap_ancestor(anchor, tag);
        } else {
            self.tree.wrap(anchor, tag);
        }
    }
}

impl DocumentTree for MemoryHost {
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent_of(node)
    }

    fn tag_of(&self, node: NodeId) -> &str {
        self.tree.tag_of(node)
    }

    fn link_target_of(&self, node: NodeId) -> Option<&str> {
        self.tree.link_target_of(node)
    }

    fn has_marker(&self, node: NodeId, marker: &str) -> bool {
        self.tree.has_marker(node, marker)
    }
}

impl SelectionAccess for MemoryHost {
    fn selection(&self) -> SelectionSnapshot {
        self.selection
    }

    fn scroll_offset_y(&self) -> f64 {
        self.scroll_y
    }

    fn save_range(&mut self) -> Option<RangeId> {
        self.selection.anchor?;
        self.saved.push(self.selection);
        Some(RangeId(self.saved.len() as u64 - 1))
    }

    fn restore_range(&mut self, range: RangeId) {
        if let Some(&snapshot) = self.saved.get(usize::try_from(range.0).unwrap_or(usize::MAX)) {
            self.selection = snapshot;
        }
    }

    fn clear_selection(&mut self) {
        self.selection = SelectionSnapshot::none();
    }
}

impl FormatCommands for MemoryHost {
    fn exec(&mut self, command: FormatCommand) {
        self.commands.push(command.clone());
        // A command without a selection anchor is the host's problem to
        // no-op, which is exactly what happens here.
        let Some(anchor) = self.selection.anchor else {
            return;
        };
        match command {
            FormatCommand::Bold => self.toggle_inline(anchor, "B"),
            FormatCommand::Italic => self.toggle_inline(anchor, "I"),
            FormatCommand::FormatBlock(tag) => {
                self.tree.retag_nearest_block(anchor, &tag);
            }
            FormatCommand::Outdent => {}
            FormatCommand::Unlink => while self.tree.unwrap_ancestor(anchor, "A") {},
            FormatCommand::CreateLink(url) => {
                if let Some(link) = self.tree.wrap(anchor, "A") {
                    self.tree.set_link_target(link, &url);
                }
            }
        }
    }
}

impl ToolbarSurface for MemoryHost {
    fn set_bubble(&mut self, visual: BubbleVisual, position: Position) {
        self.surface.visual = visual;
        self.surface.position = position;
    }

    fn set_buttons(&mut self, states: ButtonStates) {
        self.surface.buttons = states;
    }

    fn set_panel_url_mode(&mut self, url_mode: bool) {
        self.surface.url_mode = url_mode;
    }

    fn set_url_input(&mut self, text: &str) {
        if self.surface.url_input != text {
            text.clone_into(&mut self.surface.url_input);
        }
    }

    fn focus_url_input(&mut self) {
        self.surface.url_input_focused = true;
        // Focusing an input collapses the live document selection — the
        // disturbance the save/restore dance in the link flow exists for.
        self.selection.collapsed = true;
    }

    fn blur_url_input(&mut self) {
        self.surface.url_input_focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_paragraph() -> (MemoryHost, NodeId) {
        let mut tree = DomTree::new();
        let region = tree.add_element(tree.root(), "DIV");
        tree.add_marker(region, "editable-region");
        let p = tree.add_element(region, "P");
        let text = tree.add_text(p);
        (MemoryHost::new(tree), text)
    }

    const RECT: CaretRect = CaretRect {
        top: 100.0,
        left: 50.0,
        right: 150.0,
    };

    #[test]
    fn bold_toggles_a_wrapper() {
        let (mut host, text) = host_with_paragraph();
        host.select(text, RECT);

        host.exec(FormatCommand::Bold);
        assert!(inspect(host.tree(), text).contains("B"));

        host.exec(FormatCommand::Bold);
        assert!(!inspect(host.tree(), text).contains("B"));
    }

    #[test]
    fn unlink_removes_nested_links() {
        let (mut host, text) = host_with_paragraph();
        host.select(text, RECT);
        host.exec(FormatCommand::CreateLink("http://a.example/".to_string()));
        host.exec(FormatCommand::CreateLink("http://b.example/".to_string()));

        host.exec(FormatCommand::Unlink);
        assert!(!inspect(host.tree(), text).contains("A"));
    }

    #[test]
    fn commands_without_anchor_are_no_ops() {
        let (mut host, text) = host_with_paragraph();
        host.exec(FormatCommand::Bold);
        assert_eq!(host.commands().len(), 1);
        assert!(!inspect(host.tree(), text).contains("B"));
    }

    #[test]
    fn focusing_the_input_collapses_the_selection() {
        let (mut host, text) = host_with_paragraph();
        host.select(text, RECT);
        host.focus_url_input();
        assert!(host.selection().collapsed);
        assert!(host.surface().url_input_focused);
    }

    #[test]
    fn save_and_restore_round_trips_the_selection() {
        let (mut host, text) = host_with_paragraph();
        host.select(text, RECT);
        let range = host.save_range().unwrap();

        host.focus_url_input();
        assert!(host.selection().collapsed);

        host.restore_range(range);
        assert!(!host.selection().collapsed);
        assert_eq!(host.selection().anchor, Some(text));
    }
}
