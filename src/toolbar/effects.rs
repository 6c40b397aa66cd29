//! Side effects of toolbar messages.
//!
//! [`update`](super::update::update) is pure; everything that touches the
//! host — formatting commands, range bookkeeping, input focus — happens
//! here, keyed off the same message the model was advanced with.

use crate::host::{FormatCommand, Host};
use crate::toolbar::ToolbarController;

use super::bind;
use super::commands::{link_commit_commands, quote_toggle_commands};
use super::model::{ButtonStates, PendingLinkEdit};
use super::update::Message;

impl<H: Host> ToolbarController<H> {
    pub(super) fn handle_message_effects(&mut self, msg: &Message) {
        match msg {
            Message::ToggleBold => self.host.exec(FormatCommand::Bold),
            Message::ToggleItalic => self.host.exec(FormatCommand::Italic),
            Message::ToggleQuote(tags) => {
                for command in quote_toggle_commands(tags) {
                    self.host.exec(command);
                }
            }
            Message::LinkEditorReady(tags) => {
                if tags.url().is_none() {
                    // Temporary anchor so the affected range stays visually
                    // marked while the input holds focus. Never meant to be
                    // seen: the commit replaces or removes it.
                    self.host.exec(FormatCommand::CreateLink("/".to_string()));
                }
                if let Some(range) = self.host.save_range() {
                    self.model.pending_link = Some(PendingLinkEdit {
                        range,
                        url_text: self.model.url_input.clone(),
                    });
                }
                self.host.focus_url_input();
                tracing::debug!(prefill = %self.model.url_input, "link editor open");
            }
            Message::CommitLink(raw) => {
                // The pending range is consumed exactly once; the blur that
                // follows an Enter commit finds nothing left to do.
                if let Some(pending) = self.model.pending_link.take() {
                    self.host.restore_range(pending.range);
                    for command in link_commit_commands(raw) {
                        self.host.exec(command);
                    }
                    tracing::debug!(url = %raw, "link commit");
                }
                self.host.blur_url_input();
                // Button flags reflect whatever markup now surrounds the
                // selection.
                let tags = bind::current_tags(&self.host);
                self.model.buttons = ButtonStates::from_tags(&tags);
            }
            _ => {}
        }
    }
}
