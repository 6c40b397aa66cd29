//! Benchmarks for selection inspection and state transitions.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bubblebar::config::ToolbarConfig;
use bubblebar::dom::{DomTree, MemoryHost};
use bubblebar::host::{CaretRect, NodeId};
use bubblebar::inspector::inspect;
use bubblebar::toolbar::{HostEvent, ToolbarController};

fn nested_page(depth: usize) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let region = tree.add_element(tree.root(), "SPAN");
    tree.add_marker(region, "editable-region");
    let mut parent = region;
    for tag in ["P", "B", "I", "EM", "STRONG"].iter().cycle().take(depth) {
        parent = tree.add_element(parent, tag);
    }
    let anchor = tree.add_text(parent);
    (tree, anchor)
}

fn bench_inspect_deep_chain(c: &mut Criterion) {
    let (tree, anchor) = nested_page(64);
    c.bench_function("inspect_deep_chain", |b| {
        b.iter(|| inspect(black_box(&tree), black_box(anchor)))
    });
}

fn bench_selection_check_burst(c: &mut Criterion) {
    let (tree, anchor) = nested_page(0);
    let rect = CaretRect {
        top: 100.0,
        left: 50.0,
        right: 150.0,
    };
    c.bench_function("selection_check_burst", |b| {
        b.iter(|| {
            let mut controller =
                ToolbarController::new(MemoryHost::new(tree.clone()), ToolbarConfig::default());
            controller.host_mut().select(anchor, rect);
            for now_ms in 0..100_u64 {
                controller.handle_event(HostEvent::KeyUp { target: None }, now_ms);
                controller.tick(now_ms);
            }
            controller
        })
    });
}

criterion_group!(benches, bench_inspect_deep_chain, bench_selection_check_burst);
criterion_main!(benches);
