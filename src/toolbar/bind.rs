//! Event classification and the timing structures behind it.
//!
//! The binder is deliberately thin: it classifies raw host events against
//! the configured markers, assembles [`SelectionContext`]s, and owns the
//! time-polled one-shots (fade, link-open debounce, deferred mouse-up
//! re-check) plus the scroll throttle. All of them are driven by the
//! controller's `tick(now_ms)` — no timer callbacks, no cancellation races.

use crate::config::Markers;
use crate::host::{DocumentTree, Host, NodeId};
use crate::inspector::{AncestorTags, inspect};

use super::update::SelectionContext;

/// Raw events delivered by the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    KeyUp { target: Option<NodeId> },
    MouseDown { target: Option<NodeId> },
    /// Mouse released; the selection check runs one tick later so the host
    /// can finalize the selection after the click.
    MouseUp { target: Option<NodeId> },
    Scroll,
    Resize,
    CompositionStart,
    CompositionEnd,
    BoldPressed,
    ItalicPressed,
    QuotePressed,
    /// Mouse-down on the link button. Fires on mouse-down so it runs
    /// before the click collapses the selection.
    LinkPressed,
    /// Enter pressed inside the URL input.
    UrlInputEnter { text: String },
    /// The URL input lost focus.
    UrlInputBlur { text: String },
}

/// Where an input event landed, relative to the toolbar's own controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Target {
    Document,
    ToolbarControls,
}

/// Classify an event target. The URL input, the link button, and anything
/// directly inside the input-controls wrapper count as the toolbar's own.
pub(super) fn classify_target(
    tree: &impl DocumentTree,
    markers: &Markers,
    target: Option<NodeId>,
) -> Target {
    let Some(node) = target else {
        return Target::Document;
    };
    if tree.has_marker(node, &markers.url_input) || tree.has_marker(node, &markers.link_button) {
        return Target::ToolbarControls;
    }
    if let Some(parent) = tree.parent_of(node)
        && tree.has_marker(parent, &markers.input_controls)
    {
        return Target::ToolbarControls;
    }
    Target::Document
}

/// Assemble the selection context a document-level check needs.
pub(super) fn selection_context<H: Host>(host: &H, markers: &Markers) -> SelectionContext {
    let snapshot = host.selection();
    let (tags, in_editable) = match snapshot.anchor {
        Some(anchor) => {
            let in_editable = host
                .parent_of(anchor)
                .is_some_and(|parent| host.has_marker(parent, &markers.editable));
            (inspect(host, anchor), in_editable)
        }
        // No anchor is the normal negative case, not an error.
        None => (AncestorTags::default(), false),
    };
    SelectionContext {
        collapsed: snapshot.collapsed,
        in_editable,
        tags,
        rect: snapshot.rect,
        scroll_y: host.scroll_offset_y(),
    }
}

/// Ancestor tags of the current selection anchor, or the empty set.
pub(super) fn current_tags<H: Host>(host: &H) -> AncestorTags {
    match host.selection().anchor {
        Some(anchor) => inspect(host, anchor),
        None => AncestorTags::default(),
    }
}

/// One-shot fade timer. Carries the generation it was armed for so a
/// timeout that outlived its fade episode is recognizably stale.
#[derive(Debug)]
pub(super) struct FadeTimer {
    delay_ms: u64,
    pending: Option<(u64, u64)>,
}

impl FadeTimer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, generation: u64, now_ms: u64) {
        self.pending = Some((generation, now_ms));
    }

    /// The armed generation, once the delay has elapsed.
    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<u64> {
        let (generation, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some(generation)
        } else {
            None
        }
    }
}

/// One-shot debounce for the link-editor open flow.
#[derive(Debug)]
pub(super) struct LinkOpenDebouncer {
    delay_ms: u64,
    pending: Option<u64>,
}

impl LinkOpenDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    pub(super) const fn cancel(&mut self) {
        self.pending = None;
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> bool {
        let queued_at = match self.pending {
            Some(queued_at) => queued_at,
            None => return false,
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// Mouse-up selection check deferred to the next tick.
#[derive(Debug, Default)]
pub(super) struct DeferredCheck {
    pending: Option<Option<NodeId>>,
}

impl DeferredCheck {
    /// Queue a re-check for the given event target. A newer mouse-up
    /// replaces an undrained one.
    pub(super) const fn queue(&mut self, target: Option<NodeId>) {
        self.pending = Some(target);
    }

    /// The queued event target, if a re-check is due.
    pub(super) fn take(&mut self) -> Option<Option<NodeId>> {
        self.pending.take()
    }
}

/// Drop-style scroll throttle: the first event in a burst passes, later
/// ones inside the window are dropped rather than deferred.
#[derive(Debug)]
pub struct ScrollThrottle {
    window_ms: u64,
    last_pass: Option<u64>,
}

impl ScrollThrottle {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_pass: None,
        }
    }

    /// Whether an event arriving at `now_ms` should be processed.
    pub fn allow(&mut self, now_ms: u64) -> bool {
        match self.last_pass {
            Some(last) if now_ms.saturating_sub(last) < self.window_ms => false,
            _ => {
                self.last_pass = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    #[test]
    fn scroll_throttle_passes_first_and_drops_the_burst() {
        let mut throttle = ScrollThrottle::new(250);
        assert!(throttle.allow(0));
        assert!(!throttle.allow(10));
        assert!(!throttle.allow(249));
        assert!(throttle.allow(250));
        assert!(!throttle.allow(260));
    }

    #[test]
    fn fade_timer_reports_generation_after_delay() {
        let mut timer = FadeTimer::new(260);
        timer.queue(7, 100);
        assert_eq!(timer.take_ready(200), None);
        assert_eq!(timer.take_ready(360), Some(7));
        // One-shot: drained.
        assert_eq!(timer.take_ready(1000), None);
    }

    #[test]
    fn fade_timer_requeue_replaces_generation() {
        let mut timer = FadeTimer::new(260);
        timer.queue(1, 0);
        timer.queue(2, 100);
        assert_eq!(timer.take_ready(300), None);
        assert_eq!(timer.take_ready(360), Some(2));
    }

    #[test]
    fn link_debouncer_cancel_discards_pending() {
        let mut debouncer = LinkOpenDebouncer::new(100);
        debouncer.queue(0);
        debouncer.cancel();
        assert!(!debouncer.take_ready(500));
    }

    #[test]
    fn classify_recognizes_toolbar_controls() {
        let markers = Markers::default();
        let mut tree = DomTree::new();
        let toolbar = tree.add_element(tree.root(), "DIV");
        tree.add_marker(toolbar, &markers.toolbar);
        let inputs = tree.add_element(toolbar, "DIV");
        tree.add_marker(inputs, &markers.input_controls);
        let input = tree.add_element(inputs, "INPUT");
        tree.add_marker(input, &markers.url_input);
        let stray = tree.add_element(inputs, "SPAN");
        let body = tree.add_element(tree.root(), "DIV");

        assert_eq!(
            classify_target(&tree, &markers, Some(input)),
            Target::ToolbarControls
        );
        // Anything directly inside the input-controls wrapper is toolbar-owned.
        assert_eq!(
            classify_target(&tree, &markers, Some(stray)),
            Target::ToolbarControls
        );
        assert_eq!(
            classify_target(&tree, &markers, Some(body)),
            Target::Document
        );
        assert_eq!(classify_target(&tree, &markers, None), Target::Document);
    }
}
