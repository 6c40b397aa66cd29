//! The bubble toolbar: state machine, positioning, command dispatch, and
//! event plumbing.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: the complete toolbar state
//! - [`Message`]: all events and actions
//! - [`update`]: pure function for state transitions
//! - [`ToolbarController`]: owns the model, the timers, and the host handle
//!
//! The controller is driven by the host loop through two calls:
//! [`ToolbarController::handle_event`] for every raw event, and
//! [`ToolbarController::tick`] once per loop iteration so the time-polled
//! one-shots (fade, link-open debounce, deferred mouse-up re-check) can
//! fire.

mod bind;
pub mod commands;
mod effects;
mod model;
mod position;
mod update;

pub use bind::{HostEvent, ScrollThrottle};
pub use model::{BubbleVisual, ButtonStates, Model, PendingLinkEdit, Phase};
pub use position::{Position, compute_position};
pub use update::{Message, SelectionContext, update};

use crate::config::ToolbarConfig;
use crate::host::{Host, NodeId};

use bind::{DeferredCheck, FadeTimer, LinkOpenDebouncer, Target};

/// Owns the toolbar state and every piece of timing bookkeeping that used
/// to be ambient: the fade timer, the link-open debounce, the scroll
/// throttle, and the deferred mouse-up re-check.
pub struct ToolbarController<H: Host> {
    host: H,
    model: Model,
    config: ToolbarConfig,
    fade: FadeTimer,
    link_open: LinkOpenDebouncer,
    scroll: ScrollThrottle,
    deferred: DeferredCheck,
}

impl<H: Host> ToolbarController<H> {
    /// Create a controller and reset the host to a collapsed caret so a
    /// stale selection cannot produce a bubble before the first real event.
    pub fn new(host: H, config: ToolbarConfig) -> Self {
        let mut controller = Self {
            fade: FadeTimer::new(config.timing.fade_ms),
            link_open: LinkOpenDebouncer::new(config.timing.link_debounce_ms),
            scroll: ScrollThrottle::new(config.timing.scroll_throttle_ms),
            deferred: DeferredCheck::default(),
            model: Model::new(),
            config,
            host,
        };
        controller.host.clear_selection();
        controller.sync_surface();
        controller
    }

    /// The current toolbar state.
    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub const fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for embeddings that drive the document between
    /// events (and for tests).
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Feed one raw host event into the state machine.
    pub fn handle_event(&mut self, event: HostEvent, now_ms: u64) {
        tracing::trace!(?event, now_ms, "host event");
        match event {
            HostEvent::KeyUp { target } | HostEvent::MouseDown { target } => {
                self.selection_check(target, now_ms);
            }
            HostEvent::MouseUp { target } => {
                // The host finalizes the click's selection after this
                // event; re-check on the next tick.
                self.deferred.queue(target);
            }
            HostEvent::Scroll => {
                if self.scroll.allow(now_ms) {
                    let msg = self.reposition_message();
                    self.apply(msg, now_ms);
                }
            }
            HostEvent::Resize => {
                let msg = self.reposition_message();
                self.apply(msg, now_ms);
            }
            HostEvent::CompositionStart => self.apply(Message::CompositionStart, now_ms),
            HostEvent::CompositionEnd => self.apply(Message::CompositionEnd, now_ms),
            HostEvent::BoldPressed => self.apply(Message::ToggleBold, now_ms),
            HostEvent::ItalicPressed => self.apply(Message::ToggleItalic, now_ms),
            HostEvent::QuotePressed => {
                let tags = bind::current_tags(&self.host);
                self.apply(Message::ToggleQuote(tags), now_ms);
            }
            HostEvent::LinkPressed => self.apply(Message::ToggleLinkEditor, now_ms),
            HostEvent::UrlInputEnter { text } | HostEvent::UrlInputBlur { text } => {
                self.apply(Message::CommitLink(text), now_ms);
            }
        }
    }

    /// Advance time: drain the deferred mouse-up re-check and fire any
    /// elapsed one-shots. Call once per host loop iteration.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(target) = self.deferred.take() {
            self.selection_check(target, now_ms);
        }
        if let Some(generation) = self.fade.take_ready(now_ms) {
            self.apply(Message::FadeElapsed { generation }, now_ms);
        }
        if self.link_open.take_ready(now_ms) {
            let tags = bind::current_tags(&self.host);
            self.apply(Message::LinkEditorReady(tags), now_ms);
        }
    }

    fn selection_check(&mut self, target: Option<NodeId>, now_ms: u64) {
        let msg = match bind::classify_target(&self.host, &self.config.markers, target) {
            Target::ToolbarControls => Message::ToolbarInteraction(bind::current_tags(&self.host)),
            Target::Document => {
                Message::SelectionCheck(bind::selection_context(&self.host, &self.config.markers))
            }
        };
        self.apply(msg, now_ms);
    }

    fn reposition_message(&self) -> Message {
        let snapshot = self.host.selection();
        Message::Reposition {
            rect: snapshot.rect,
            scroll_y: self.host.scroll_offset_y(),
        }
    }

    fn apply(&mut self, msg: Message, now_ms: u64) {
        let phase_before = self.model.phase;
        let generation_before = self.model.generation;

        self.model = update(std::mem::take(&mut self.model), msg.clone());

        // A generation bump marks a new fade episode; arm the timer with it.
        if self.model.generation != generation_before {
            self.fade.queue(self.model.generation, now_ms);
        }
        self.arm_link_debounce(&msg, now_ms);
        self.handle_message_effects(&msg);

        if phase_before != self.model.phase {
            tracing::debug!(from = ?phase_before, to = ?self.model.phase, "phase transition");
        }
        self.sync_surface();
    }

    fn arm_link_debounce(&mut self, msg: &Message, now_ms: u64) {
        if matches!(msg, Message::ToggleLinkEditor) {
            if self.model.url_mode {
                self.link_open.queue(now_ms);
            } else {
                self.link_open.cancel();
            }
        }
    }

    /// Push the whole visual state to the surface. Recomputed wholesale on
    /// every applied message rather than diffed.
    fn sync_surface(&mut self) {
        let visual = self.model.visual();
        let position = self.model.position;
        let buttons = self.model.buttons;
        let url_mode = self.model.url_mode;
        let url_input = self.model.url_input.clone();

        self.host.set_bubble(visual, position);
        self.host.set_buttons(buttons);
        self.host.set_panel_url_mode(url_mode);
        self.host.set_url_input(&url_input);
    }
}
