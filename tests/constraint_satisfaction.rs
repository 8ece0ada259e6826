//! Integration tests verifying that derived constraints mean what the
//! builder promises. Each scenario is fed through the solver-backed sink and
//! the solved frames are checked against the intended geometry.

use pinlayout::{
    Axis, ConstraintOptions, Dimension, Edge, EdgeInsets, ElementId, ElementTree, Frame, GuideId,
    Layout, Placement, Priority, Relation, SolverSink,
};

const TOLERANCE: f64 = 0.001;

fn close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{} should be {}, got {}",
        what,
        expected,
        actual
    );
}

/// A 300x100 root with `count` children
fn scene(count: usize) -> (ElementTree, ElementId, Vec<ElementId>, SolverSink) {
    let mut tree = ElementTree::new();
    let root = tree.add_root("root");
    let items = (1..=count)
        .map(|i| tree.add_child(root, format!("v{}", i)))
        .collect();
    let mut sink = SolverSink::new();
    sink.fix_frame(root, Frame::new(0.0, 0.0, 300.0, 100.0))
        .expect("root frame should be accepted");
    (tree, root, items, sink)
}

#[test]
fn test_pinned_edges_respect_insets() {
    let (tree, _, items, mut sink) = scene(1);
    let batch = Layout::new(&tree, &mut sink).pin_edges_to_superview(
        items[0],
        EdgeInsets::new(10.0, 20.0, 30.0, 40.0),
        None,
    );
    assert!(batch.is_complete());
    sink.solve();

    let frame = sink.frame(items[0]);
    close(frame.y, 10.0, "top");
    close(frame.x, 20.0, "left");
    close(frame.bottom(), 70.0, "bottom");
    close(frame.right(), 260.0, "right");
}

#[test]
fn test_fill_divides_width_evenly() {
    let (tree, _, items, mut sink) = scene(3);
    let batch = Layout::new(&tree, &mut sink).fill(&items, Axis::Horizontal, Some(10.0), None);
    assert!(batch.is_complete());
    sink.solve();
    assert!(sink.rejected().is_empty());

    let width = (300.0 - 4.0 * 10.0) / 3.0;
    let frames: Vec<Frame> = items.iter().map(|id| sink.frame(*id)).collect();
    for (i, frame) in frames.iter().enumerate() {
        close(frame.width, width, "fill width");
        close(frame.x, 10.0 + i as f64 * (width + 10.0), "fill x");
    }
    close(frames[2].right(), 290.0, "last trailing edge");
}

#[test]
fn test_bound_wraps_content() {
    let mut tree = ElementTree::new();
    let root = tree.add_root("root");
    let card = tree.add_child(root, "card");
    let title = tree.add_child(card, "title");
    let detail = tree.add_child(card, "detail");

    let mut sink = SolverSink::new();
    sink.fix_frame(root, Frame::new(0.0, 0.0, 400.0, 300.0)).unwrap();
    {
        let mut layout = Layout::new(&tree, &mut sink);
        let offset = ConstraintOptions::new().with_offset(20.0);
        layout.pin_edge_to_superview(card, Edge::Top, offset).unwrap();
        layout.pin_edge_to_superview(card, Edge::Left, offset).unwrap();
        layout.set_size(title, 40.0, 10.0, None);
        layout.set_size(detail, 60.0, 10.0, None);
        let batch = layout.bound(card, &[title, detail], Axis::Horizontal, Some(5.0), None);
        assert!(batch.is_complete());
    }
    sink.solve();

    close(sink.frame(title).x, 25.0, "title x");
    close(sink.frame(detail).x, 70.0, "detail x");
    close(sink.frame(card).width, 115.0, "card width");
}

#[test]
fn test_distribute_odd_is_symmetric() {
    let (tree, _, items, mut sink) = scene(3);
    {
        let mut layout = Layout::new(&tree, &mut sink);
        for item in &items {
            layout.set_size(*item, 50.0, 20.0, None);
        }
        layout.distribute(&items, Axis::Horizontal, Some(10.0), None);
    }
    sink.solve();

    close(sink.frame(items[0]).x, 65.0, "v1 x");
    close(sink.frame(items[1]).center_x(), 150.0, "v2 center");
    close(sink.frame(items[2]).x, 185.0, "v3 x");
}

#[test]
fn test_distribute_even_bounds_middle_pair() {
    let (tree, _, items, mut sink) = scene(4);
    {
        let mut layout = Layout::new(&tree, &mut sink);
        for item in &items {
            layout.set_size(*item, 40.0, 20.0, None);
        }
        let batch = layout.distribute(&items, Axis::Horizontal, Some(10.0), None);
        assert!(batch.is_complete());
    }
    sink.solve();
    assert!(sink.rejected().is_empty());

    let frames: Vec<Frame> = items.iter().map(|id| sink.frame(*id)).collect();
    assert!(frames[1].right() <= 145.0 + TOLERANCE);
    assert!(frames[2].x <= 155.0 + TOLERANCE);
    close(frames[1].x - frames[0].right(), 10.0, "outer gap before");
    close(frames[3].x - frames[2].right(), 10.0, "outer gap after");
}

#[test]
fn test_relative_placement_and_matching() {
    let (tree, _, items, mut sink) = scene(2);
    let (header, body) = (items[0], items[1]);
    {
        let mut layout = Layout::new(&tree, &mut sink);
        layout.pin_edges_to_superview_excluding(header, EdgeInsets::uniform(8.0), Edge::Bottom, None);
        layout.set_dimension(header, Dimension::Height, 24.0, Relation::Equal, None).unwrap();
        layout
            .position(body, Placement::Below, header, ConstraintOptions::new().with_offset(6.0))
            .unwrap();
        layout.align_axis(body, Axis::Horizontal, header, ConstraintOptions::new()).unwrap();
        layout.match_size(body, header, 20.0, None);
    }
    sink.solve();

    let header_frame = sink.frame(header);
    let body_frame = sink.frame(body);
    close(header_frame.width, 284.0, "header width");
    close(body_frame.y, 8.0 + 24.0 + 6.0, "body y");
    close(body_frame.width, 264.0, "body width");
    close(body_frame.height, 4.0, "body height");
    close(body_frame.center_x(), header_frame.center_x(), "body center");
}

#[test]
fn test_aspect_ratio_and_guides() {
    let (tree, _, items, mut sink) = scene(1);
    let safe_area = GuideId(0);
    sink.fix_frame(safe_area, Frame::new(0.0, 20.0, 300.0, 80.0)).unwrap();
    {
        let mut layout = Layout::new(&tree, &mut sink);
        let inset = ConstraintOptions::new().with_offset(4.0);
        layout.pin_edge(items[0], Edge::Top, Edge::Top, safe_area, inset).unwrap();
        layout.pin_edge(items[0], Edge::Left, Edge::Left, safe_area, inset).unwrap();
        layout.set_dimension(items[0], Dimension::Width, 90.0, Relation::Equal, None).unwrap();
        layout.aspect_ratio(items[0], 1.5, None).unwrap();
    }
    sink.solve();

    let frame = sink.frame(items[0]);
    close(frame.y, 24.0, "guide top");
    close(frame.height, 60.0, "height from ratio");
}

#[test]
fn test_soft_priority_yields() {
    let (tree, _, items, mut sink) = scene(1);
    {
        let mut layout = Layout::new(&tree, &mut sink);
        layout
            .set_dimension(items[0], Dimension::Width, 100.0, Relation::Equal, None)
            .unwrap();
        layout
            .set_dimension(items[0], Dimension::Width, 50.0, Relation::Equal, Some(Priority::LOW))
            .unwrap();
        layout
            .set_dimension(items[0], Dimension::Height, 30.0, Relation::GreaterOrEqual, None)
            .unwrap();
    }
    sink.solve();

    assert!(sink.rejected().is_empty());
    assert_eq!(sink.attached(), 3);
    close(sink.frame(items[0]).width, 100.0, "required width wins");
    assert!(sink.frame(items[0]).height >= 30.0 - TOLERANCE);
}
