//! Scenario files: a declarative page plus a timed event script.
//!
//! A scenario describes the host page as a flat node list and the user's
//! behavior as millisecond-stamped actions. [`replay`] runs it through a
//! full [`ToolbarController`] against the in-memory host, ticking a
//! virtual clock, which makes bubble behavior observable without a
//! browser. The demo binary and the integration tests both go through
//! this path.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::ToolbarConfig;
use crate::dom::{DomTree, MemoryHost, SurfaceState};
use crate::host::{CaretRect, FormatCommand, NodeId};
use crate::toolbar::{HostEvent, ToolbarController};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario")]
    Parse(#[from] serde_json::Error),
    #[error("unknown node id `{0}`")]
    UnknownNode(String),
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectSpec {
    pub top: f64,
    pub left: f64,
    pub right: f64,
}

impl From<RectSpec> for CaretRect {
    fn from(rect: RectSpec) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            right: rect.right,
        }
    }
}

/// One node of the scenario page. Nodes must appear after their parent;
/// a missing `parent` attaches to the document root.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub markers: Vec<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// A scripted user or browser action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Replace the live selection with a range anchored at the given node.
    Select { anchor: String, rect: RectSpec },
    /// Collapse the live selection to a caret.
    Collapse,
    KeyUp {
        #[serde(default)]
        target: Option<String>,
    },
    MouseDown {
        #[serde(default)]
        target: Option<String>,
    },
    MouseUp {
        #[serde(default)]
        target: Option<String>,
    },
    Scroll {
        #[serde(default)]
        y: f64,
    },
    Resize,
    CompositionStart,
    CompositionEnd,
    PressBold,
    PressItalic,
    PressQuote,
    PressLink,
    /// Type into the URL input (replaces its content).
    TypeUrl { text: String },
    /// Press Enter inside the URL input.
    PressEnter,
    /// Move focus out of the URL input.
    BlurInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Virtual-clock timestamp of the action, in milliseconds.
    pub at: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: ToolbarConfig,
    pub page: Vec<NodeSpec>,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON does not match the scenario schema.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// One line of replay output: what ran and what the surface showed after.
#[derive(Debug, Clone)]
pub struct ReplayLine {
    pub at: u64,
    pub action: String,
    pub surface: SurfaceState,
}

/// Outcome of a full scenario replay.
#[derive(Debug)]
pub struct Replay {
    pub lines: Vec<ReplayLine>,
    pub commands: Vec<FormatCommand>,
    pub surface: SurfaceState,
}

/// Replay a scenario on a virtual millisecond clock.
///
/// The clock runs past the last step long enough for any armed fade or
/// debounce to fire, so the reported final surface is settled.
///
/// # Errors
///
/// Returns an error when the page or a step references an unknown node id,
/// or the page declares one twice.
pub fn replay(scenario: &Scenario) -> Result<Replay, ScenarioError> {
    let (tree, ids) = build_tree(&scenario.page)?;
    let mut controller = ToolbarController::new(MemoryHost::new(tree), scenario.config.clone());

    let mut steps: Vec<&Step> = scenario.steps.iter().collect();
    steps.sort_by_key(|step| step.at);

    let timing = scenario.config.timing;
    let settle = timing.fade_ms.max(timing.link_debounce_ms) + 2;
    let end = steps.last().map_or(0, |step| step.at) + settle;

    let mut typed: Option<String> = None;
    let mut lines = Vec::new();
    let mut index = 0;
    for now_ms in 0..=end {
        controller.tick(now_ms);
        while index < steps.len() && steps[index].at <= now_ms {
            let step = steps[index];
            apply_step(&mut controller, &ids, &mut typed, step)?;
            lines.push(ReplayLine {
                at: now_ms,
                action: describe(&step.action),
                surface: controller.host().surface().clone(),
            });
            index += 1;
        }
    }

    Ok(Replay {
        lines,
        commands: controller.host().commands().to_vec(),
        surface: controller.host().surface().clone(),
    })
}

fn apply_step(
    controller: &mut ToolbarController<MemoryHost>,
    ids: &HashMap<String, NodeId>,
    typed: &mut Option<String>,
    step: &Step,
) -> Result<(), ScenarioError> {
    let now_ms = step.at;
    match &step.action {
        Action::Select { anchor, rect } => {
            let node = lookup(ids, anchor)?;
            controller.host_mut().select(node, (*rect).into());
        }
        Action::Collapse => controller.host_mut().collapse(),
        Action::KeyUp { target } => {
            let target = resolve(ids, target.as_deref())?;
            controller.handle_event(HostEvent::KeyUp { target }, now_ms);
        }
        Action::MouseDown { target } => {
            let target = resolve(ids, target.as_deref())?;
            controller.handle_event(HostEvent::MouseDown { target }, now_ms);
        }
        Action::MouseUp { target } => {
            let target = resolve(ids, target.as_deref())?;
            controller.handle_event(HostEvent::MouseUp { target }, now_ms);
        }
        Action::Scroll { y } => {
            controller.host_mut().set_scroll_y(*y);
            controller.handle_event(HostEvent::Scroll, now_ms);
        }
        Action::Resize => controller.handle_event(HostEvent::Resize, now_ms),
        Action::CompositionStart => controller.handle_event(HostEvent::CompositionStart, now_ms),
        Action::CompositionEnd => controller.handle_event(HostEvent::CompositionEnd, now_ms),
        Action::PressBold => controller.handle_event(HostEvent::BoldPressed, now_ms),
        Action::PressItalic => controller.handle_event(HostEvent::ItalicPressed, now_ms),
        Action::PressQuote => controller.handle_event(HostEvent::QuotePressed, now_ms),
        Action::PressLink => controller.handle_event(HostEvent::LinkPressed, now_ms),
        Action::TypeUrl { text } => *typed = Some(text.clone()),
        Action::PressEnter => {
            let text = input_text(controller, typed.as_deref());
            controller.handle_event(HostEvent::UrlInputEnter { text }, now_ms);
            *typed = None;
        }
        Action::BlurInput => {
            let text = input_text(controller, typed.as_deref());
            controller.handle_event(HostEvent::UrlInputBlur { text }, now_ms);
            *typed = None;
        }
    }
    Ok(())
}

/// Text the input currently holds: what the script typed, or the prefill
/// the controller pushed.
fn input_text(controller: &ToolbarController<MemoryHost>, typed: Option<&str>) -> String {
    typed.map_or_else(
        || controller.host().surface().url_input.clone(),
        str::to_string,
    )
}

fn build_tree(page: &[NodeSpec]) -> Result<(DomTree, HashMap<String, NodeId>), ScenarioError> {
    let mut tree = DomTree::new();
    let mut ids = HashMap::new();
    for spec in page {
        let parent = match &spec.parent {
            Some(name) => lookup(&ids, name)?,
            None => tree.root(),
        };
        let node = if spec.tag == "#text" {
            tree.add_text(parent)
        } else {
            tree.add_element(parent, &spec.tag)
        };
        for marker in &spec.markers {
            tree.add_marker(node, marker);
        }
        if let Some(href) = &spec.href {
            tree.set_link_target(node, href);
        }
        if ids.insert(spec.id.clone(), node).is_some() {
            return Err(ScenarioError::DuplicateNode(spec.id.clone()));
        }
    }
    Ok((tree, ids))
}

fn lookup(ids: &HashMap<String, NodeId>, name: &str) -> Result<NodeId, ScenarioError> {
    ids.get(name)
        .copied()
        .ok_or_else(|| ScenarioError::UnknownNode(name.to_string()))
}

fn resolve(
    ids: &HashMap<String, NodeId>,
    name: Option<&str>,
) -> Result<Option<NodeId>, ScenarioError> {
    name.map(|name| lookup(ids, name)).transpose()
}

fn describe(action: &Action) -> String {
    match action {
        Action::Select { anchor, .. } => format!("select {anchor}"),
        Action::Collapse => "collapse".to_string(),
        Action::KeyUp { .. } => "key_up".to_string(),
        Action::MouseDown { .. } => "mouse_down".to_string(),
        Action::MouseUp { .. } => "mouse_up".to_string(),
        Action::Scroll { y } => format!("scroll {y}"),
        Action::Resize => "resize".to_string(),
        Action::CompositionStart => "composition_start".to_string(),
        Action::CompositionEnd => "composition_end".to_string(),
        Action::PressBold => "press bold".to_string(),
        Action::PressItalic => "press italic".to_string(),
        Action::PressQuote => "press quote".to_string(),
        Action::PressLink => "press link".to_string(),
        Action::TypeUrl { text } => format!("type \"{text}\""),
        Action::PressEnter => "enter".to_string(),
        Action::BlurInput => "blur input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::BubbleVisual;

    fn minimal_json() -> &'static str {
        r##"{
            "page": [
                { "id": "region", "tag": "SPAN", "markers": ["editable-region"] },
                { "id": "text", "tag": "#text", "parent": "region" }
            ],
            "steps": [
                { "at": 0, "action": { "select": { "anchor": "text",
                    "rect": { "top": 100, "left": 50, "right": 150 } } } },
                { "at": 1, "action": { "key_up": {} } }
            ]
        }"##
    }

    #[test]
    fn parses_and_replays_a_minimal_scenario() {
        let scenario = Scenario::from_json(minimal_json()).unwrap();
        let replay = replay(&scenario).unwrap();
        let shown = replay
            .lines
            .iter()
            .any(|line| line.surface.visual == BubbleVisual::Active);
        assert!(shown, "bubble never became visible");
    }

    #[test]
    fn unknown_anchor_is_an_error() {
        let scenario = Scenario::from_json(
            r#"{
                "page": [],
                "steps": [
                    { "at": 0, "action": { "select": { "anchor": "missing",
                        "rect": { "top": 0, "left": 0, "right": 0 } } } }
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            replay(&scenario),
            Err(ScenarioError::UnknownNode(name)) if name == "missing"
        ));
    }

    #[test]
    fn duplicate_node_id_is_an_error() {
        let scenario = Scenario::from_json(
            r#"{
                "page": [
                    { "id": "a", "tag": "DIV" },
                    { "id": "a", "tag": "P", "parent": "a" }
                ],
                "steps": []
            }"#,
        )
        .unwrap();
        assert!(matches!(
            replay(&scenario),
            Err(ScenarioError::DuplicateNode(name)) if name == "a"
        ));
    }
}
