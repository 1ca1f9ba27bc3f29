use super::*;
use crate::animation::TweenVars;
use crate::timeline::Position;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn sample_interpolates_and_holds_ends() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    arena
        .to(
            root,
            [Target::Background],
            TweenVars::new(2.0).to(Prop::Scale, 3.0),
            1.0,
        )
        .unwrap();

    let compiled = CompiledTimeline::compile(&arena, root, &PropertyStore::new()).unwrap();
    assert_eq!(compiled.duration(), 3.0);
    let mut store = PropertyStore::new();

    compiled.sample(0.0, &mut store);
    approx(store.value(Target::Background, Prop::Scale), 1.0);
    // Halfway through an out-quad tween is three quarters of the way.
    compiled.sample(2.0, &mut store);
    approx(store.value(Target::Background, Prop::Scale), 2.5);
    compiled.sample(99.0, &mut store);
    approx(store.value(Target::Background, Prop::Scale), 3.0);
}

#[test]
fn scrubbing_is_monotone_across_tween_boundaries() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let t = Target::GradientStop(1);
    arena
        .to(root, [t], TweenVars::new(1.0).to(Prop::Offset, 0.5), 0.0)
        .unwrap();
    arena
        .to(root, [t], TweenVars::new(1.0).to(Prop::Offset, 0.9), 1.0)
        .unwrap();

    let mut baseline = PropertyStore::new();
    baseline.set(t, Prop::Offset, 0.1);
    let compiled = CompiledTimeline::compile(&arena, root, &baseline).unwrap();

    let mut store = PropertyStore::new();
    let mut prev = f64::MIN;
    for i in 0..=200 {
        compiled.sample(f64::from(i) / 100.0, &mut store);
        let v = store.value(t, Prop::Offset);
        assert!(v + 1e-12 >= prev);
        prev = v;
    }
    approx(prev, 0.9);

    // Scrubbing backwards restores the baseline.
    compiled.sample(0.0, &mut store);
    approx(store.value(t, Prop::Offset), 0.1);
}

#[test]
fn relative_values_accumulate_from_tween_start() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let t = Target::ProgressBar(0);
    arena
        .set(root, [t], TweenVars::set().to(Prop::Top, 100.0), 0.0)
        .unwrap();
    arena
        .to(root, [t], TweenVars::new(1.0).by(Prop::Top, 25.0), 1.0)
        .unwrap();
    arena
        .to(root, [t], TweenVars::new(1.0).by(Prop::Top, -5.0), 2.0)
        .unwrap();

    let compiled = CompiledTimeline::compile(&arena, root, &PropertyStore::new()).unwrap();
    let mut store = PropertyStore::new();
    compiled.sample(1.5, &mut store);
    assert!(store.value(t, Prop::Top) > 100.0);
    compiled.sample(2.0, &mut store);
    approx(store.value(t, Prop::Top), 125.0);
    compiled.sample(3.0, &mut store);
    approx(store.value(t, Prop::Top), 120.0);
}

#[test]
fn stagger_offsets_each_target() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let targets = [Target::ProgressBar(0), Target::ProgressBar(1)];
    arena
        .to(
            root,
            targets,
            TweenVars::new(1.0).to(Prop::ScaleX, 0.0).stagger(0.5),
            Position::End,
        )
        .unwrap();

    let compiled = CompiledTimeline::compile(&arena, root, &PropertyStore::new()).unwrap();
    let mut store = PropertyStore::new();
    compiled.sample(0.5, &mut store);
    approx(store.value(targets[0], Prop::ScaleX), 0.25);
    approx(store.value(targets[1], Prop::ScaleX), 1.0);
    compiled.sample(1.0, &mut store);
    approx(store.value(targets[0], Prop::ScaleX), 0.0);
    approx(store.value(targets[1], Prop::ScaleX), 0.25);
}

#[test]
fn nested_timelines_map_into_root_time() {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let child = arena.new_timeline();
    arena
        .to(
            child,
            [Target::Null],
            TweenVars::new(2.0).to(Prop::Value, 1.0),
            0.0,
        )
        .unwrap();
    arena.set_time_scale(child, 2.0).unwrap();
    arena.add(root, child, 4.0).unwrap();

    let compiled = CompiledTimeline::compile(&arena, root, &PropertyStore::new()).unwrap();
    assert_eq!(compiled.track_count(), 1);
    let mut store = PropertyStore::new();
    compiled.sample(4.5, &mut store);
    approx(store.value(Target::Null, Prop::Value), 0.75);
    compiled.sample(5.0, &mut store);
    approx(store.value(Target::Null, Prop::Value), 1.0);
}

#[test]
fn store_defaults_and_iteration() {
    let mut store = PropertyStore::new();
    assert!(store.is_empty());
    assert_eq!(store.value(Target::Background, Prop::Scale), 1.0);
    assert_eq!(store.value(Target::Background, Prop::Top), 0.0);
    store.set(Target::Null, Prop::Value, 2.0);
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.iter().collect::<Vec<_>>(),
        vec![(Target::Null, Prop::Value, 2.0)]
    );
}
