use std::time::Duration;

use graphwalk::{AnimationEvent, GraphIntent, PlaybackPhase, TraversalKind};

use super::harness::TestHarness;

#[test]
fn playback_steps_then_auto_resets() {
    let mut harness = TestHarness::with_nodes(3);
    harness.link(&[(0, 1), (1, 2)]);
    assert!(harness.session.play_traversal(TraversalKind::Bfs, Some(0)));

    let mut highlighted = Vec::new();
    for _ in 0..3 {
        harness.session.advance(Duration::from_secs(1));
        highlighted.push(harness.session.animation().highlighted());
    }
    assert_eq!(highlighted, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(harness.session.animation().phase(), PlaybackPhase::Draining);
    assert_eq!(harness.session.animation().visited_edges().len(), 2);

    let events = harness.session.advance(Duration::from_secs(3));
    assert_eq!(events, vec![AnimationEvent::Cleared]);
    assert!(harness.session.animation().is_idle());
    assert!(harness.session.animation().visited_nodes().is_empty());
}

#[test]
fn new_playback_never_interleaves_with_previous() {
    let mut harness = TestHarness::with_nodes(3);
    harness.link(&[(0, 1), (1, 2)]);
    harness.session.play_traversal(TraversalKind::Bfs, Some(0));
    harness.session.advance(Duration::from_millis(1_700));

    harness.session.play_traversal(TraversalKind::Dfs, Some(2));
    let events = harness.session.advance(Duration::from_millis(300));
    assert!(events.is_empty());

    let events = harness.session.advance(Duration::from_millis(700));
    assert!(matches!(
        events.as_slice(),
        [AnimationEvent::Stepped { index: 0, node: 2, .. }]
    ));
}

#[test]
fn clearing_during_drain_forces_idle() {
    let mut harness = TestHarness::with_nodes(2);
    harness.link(&[(0, 1)]);
    harness.session.play_traversal(TraversalKind::Dfs, Some(0));
    harness.session.advance(Duration::from_secs(2));
    assert_eq!(harness.session.animation().phase(), PlaybackPhase::Draining);

    harness.session.apply_intents([GraphIntent::ClearAll]);

    assert!(harness.session.animation().is_idle());
    assert!(harness.session.advance(Duration::from_secs(10)).is_empty());
}

#[test]
fn manual_reset_cancels_pending_steps() {
    let mut harness = TestHarness::with_nodes(3);
    harness.link(&[(0, 1), (1, 2)]);
    harness.session.play_traversal(TraversalKind::Bfs, None);
    harness.session.tick();

    harness.session.reset_animation();

    assert_eq!(harness.session.tick(), None);
    assert!(harness.session.animation().visited_nodes().is_empty());
}
