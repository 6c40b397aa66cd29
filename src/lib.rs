// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. toolbar::ToolbarController)
    clippy::module_name_repetitions
)]

//! # Bubblebar
//!
//! An inline selection toolbar ("bubble") engine for content-editable
//! surfaces. When the user selects text inside an editable region, a
//! floating toolbar appears near the selection offering bold, italic,
//! quote, and link formatting; this crate owns the selection tracking,
//! visibility lifecycle, positioning, and command dispatch behind it.
//!
//! The host document is reached only through the traits in [`host`]: a
//! browser embedding implements them against its DOM, while tests and the
//! demo binary use the in-memory tree in [`dom`].
//!
//! ## Architecture
//!
//! The toolbar uses The Elm Architecture (TEA) pattern:
//! - **Model**: the complete toolbar state
//! - **Message**: events and actions
//! - **Update**: pure state transitions
//! - **Effects**: formatting commands and focus changes, applied by the
//!   controller against the host
//!
//! Timing (the fade-out, the link-open debounce, the scroll throttle, the
//! deferred mouse-up re-check) is handled by one-shots the host loop polls
//! through [`toolbar::ToolbarController::tick`] — no timer callbacks, and
//! the fade race is settled by a generation check instead of cancellation.
//!
//! ## Modules
//!
//! - [`toolbar`]: controller, state machine, positioning, command dispatch
//! - [`inspector`]: ancestor-chain inspection of the selection anchor
//! - [`host`]: traits the embedding implements
//! - [`dom`]: in-memory tree and host double
//! - [`config`]: markers and timing windows
//! - [`scenario`]: replayable event scripts for the demo binary and tests

pub mod config;
pub mod dom;
pub mod host;
pub mod inspector;
pub mod scenario;
pub mod toolbar;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::ToolbarConfig;
    pub use crate::dom::MemoryHost;
    pub use crate::host::{CaretRect, FormatCommand, NodeId, SelectionSnapshot};
    pub use crate::inspector::{AncestorTags, inspect};
    pub use crate::toolbar::{
        HostEvent, Message, Model, Phase, ToolbarController, compute_position, update,
    };
}
