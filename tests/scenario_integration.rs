use std::path::Path;

use bubblebar::host::FormatCommand;
use bubblebar::scenario::{Scenario, replay};
use bubblebar::toolbar::BubbleVisual;

fn demo_scenario() -> Scenario {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/link-flow.json");
    Scenario::load(&path).expect("demo scenario should load")
}

#[test]
fn test_demo_link_flow_applies_the_typed_url() {
    let outcome = replay(&demo_scenario()).unwrap();

    assert_eq!(
        outcome.commands,
        vec![
            FormatCommand::CreateLink("/".to_string()),
            FormatCommand::Unlink,
            FormatCommand::CreateLink("http://foo.com".to_string()),
        ],
        "open should place the placeholder, commit should unlink and re-link"
    );

    // The bubble was up while the user worked, and the collapse at the end
    // faded it back out.
    assert!(
        outcome
            .lines
            .iter()
            .any(|line| line.surface.visual == BubbleVisual::Active)
    );
    assert_eq!(outcome.surface.visual, BubbleVisual::Hidden);
    assert!(!outcome.surface.url_mode);
}

#[test]
fn test_demo_link_button_lights_up_after_commit() {
    let outcome = replay(&demo_scenario()).unwrap();
    let after_enter = outcome
        .lines
        .iter()
        .find(|line| line.action == "enter")
        .expect("demo should press enter");
    assert!(after_enter.surface.buttons.link);
    assert!(!after_enter.surface.url_mode);
}

#[test]
fn test_scenario_files_load_from_disk_with_config_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fade.json");
    let content = r##"{
        "config": { "timing": { "fade_ms": 20, "link_debounce_ms": 5 } },
        "page": [
            { "id": "region", "tag": "SPAN", "markers": ["editable-region"] },
            { "id": "text", "tag": "#text", "parent": "region" }
        ],
        "steps": [
            { "at": 0, "action": { "select": { "anchor": "text",
                "rect": { "top": 10, "left": 0, "right": 20 } } } },
            { "at": 1, "action": { "key_up": {} } },
            { "at": 2, "action": "collapse" },
            { "at": 3, "action": { "key_up": {} } }
        ]
    }"##;
    std::fs::write(&path, content).unwrap();

    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.config.timing.fade_ms, 20);

    // With a 20 ms fade the bubble is hidden again by the settled end.
    let outcome = replay(&scenario).unwrap();
    assert_eq!(outcome.surface.visual, BubbleVisual::Hidden);
}

#[test]
fn test_composition_scenario_keeps_the_bubble_hidden() {
    let scenario = Scenario::from_json(
        r##"{
            "page": [
                { "id": "region", "tag": "SPAN", "markers": ["editable-region"] },
                { "id": "text", "tag": "#text", "parent": "region" }
            ],
            "steps": [
                { "at": 0, "action": "composition_start" },
                { "at": 1, "action": { "select": { "anchor": "text",
                    "rect": { "top": 10, "left": 0, "right": 20 } } } },
                { "at": 2, "action": { "key_up": {} } },
                { "at": 3, "action": { "mouse_up": {} } }
            ]
        }"##,
    )
    .unwrap();

    let outcome = replay(&scenario).unwrap();
    assert!(
        outcome
            .lines
            .iter()
            .all(|line| line.surface.visual == BubbleVisual::Hidden)
    );
}
