use super::*;
use crate::animation::{Prop, Target, TweenVars};
use crate::timeline::Position;

fn filler(arena: &mut TimelineArena, tl: TimelineId, duration: f64) {
    arena
        .to(
            tl,
            [Target::Null],
            TweenVars::new(duration).to(Prop::Value, 1.0),
            Position::End,
        )
        .unwrap();
}

#[test]
fn reserved_labels_skip_the_search() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    filler(&mut arena, root, 7.0);
    assert_eq!(resolve_label_time(&arena, root, "start").unwrap(), 0.0);
    assert_eq!(resolve_label_time(&arena, root, "end").unwrap(), 7.0);
}

#[test]
fn nested_label_accumulates_start_and_time_scale() {
    // root <- A at 10 (scale 1) <- B at 2 (scale 2) with label x at 4 => 10 + (2 + 4/2) = 14.
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let a = arena.new_timeline();
    let b = arena.new_timeline();

    filler(&mut arena, b, 8.0);
    arena.add_label(b, "x", 4.0).unwrap();
    arena.set_time_scale(b, 2.0).unwrap();
    arena.add(a, b, 2.0).unwrap();
    arena.add(root, a, 10.0).unwrap();

    assert_eq!(resolve_label_time(&arena, root, "x").unwrap(), 14.0);
    assert_eq!(resolve_label_time(&arena, a, "x").unwrap(), 4.0);
}

#[test]
fn root_label_wins_collisions() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let child = arena.new_timeline();
    filler(&mut arena, child, 3.0);
    arena.add_label(child, "dup", 1.0).unwrap();
    arena.add(root, child, 5.0).unwrap();
    arena.add_label(root, "dup", 0.5).unwrap();

    assert_eq!(resolve_label_time(&arena, root, "dup").unwrap(), 0.5);
}

#[test]
fn later_descendant_wins_among_siblings() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let first = arena.new_timeline();
    let second = arena.new_timeline();
    for tl in [first, second] {
        filler(&mut arena, tl, 2.0);
        arena.add_label(tl, "dup", 1.0).unwrap();
    }
    arena.add(root, first, Position::End).unwrap();
    arena.add(root, second, Position::End).unwrap();

    assert_eq!(resolve_label_time(&arena, root, "dup").unwrap(), 3.0);
}

#[test]
fn missing_label_is_typed_error() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let err = resolve_label_time(&arena, root, "stage9Snap").unwrap_err();
    assert!(matches!(err, ScrollstageError::LabelNotFound(l) if l == "stage9Snap"));
}
