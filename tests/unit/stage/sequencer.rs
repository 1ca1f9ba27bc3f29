use super::*;
use crate::stage::content::{ContentBlock, DynamicContent, ScrollPrompt, SetupStage};
use crate::timeline::Child;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn content() -> AnimatableContent {
    let stages = vec![SetupStage {
        header: vec![ContentBlock {
            tag: "h2".to_owned(),
            text: "AB".to_owned(),
        }],
        body: vec![],
    }];
    let copied = DynamicContent::copy_from(&stages, 5);
    AnimatableContent::split(
        &copied,
        &ScrollPrompt {
            text: String::new(),
            arrow: false,
        },
    )
}

fn build() -> (TimelineArena, TimelineId) {
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    let content = content();
    let config = InteractiveConfig::default();
    let mut seq = StageSequencer::new(&mut arena, root, &content, &config, 5);
    seq.build_stages().unwrap();
    seq.hoist_snap_labels().unwrap();
    (arena, root)
}

#[test]
fn first_stage_label_times() {
    let (arena, root) = build();
    let at = |l: &str| resolve_label_time(&arena, root, l).unwrap();

    approx(at("stage0In"), 0.0);
    approx(at("stage0ContentIn"), 0.25);
    // Header tween: 0.25 + 0.5 + 0.06 stagger over two letters.
    approx(at("stage0Snap"), 0.81 + 1.5);
    approx(at("stage0ContentOut"), 0.81 + 3.0);
    // Out order is [scrollPrompt, body, header]. Empty components still take their slot, so the
    // header waits two component staggers.
    approx(at("stage0Out"), 3.81 + 0.5 + 0.56);
    approx(at("stage1In"), 4.87 + 3.0);
}

#[test]
fn progress_stage_gets_fill_and_content() {
    let (arena, root) = build();
    let at = |l: &str| resolve_label_time(&arena, root, l).unwrap();

    // Stage 1 content-in is the progress indicator, third in order.
    approx(at("stage1Snap") - at("stage1In"), 0.25 + 0.5 + 0.62 + 1.5);

    let stage1 = arena.descendants(root).unwrap()[1];
    let fill = arena
        .children(stage1)
        .unwrap()
        .iter()
        .find_map(|c| match c {
            Child::Tween(t) if t.targets == [Target::ProgressBar(0)] => Some(t.clone()),
            _ => None,
        })
        .unwrap();
    approx(fill.start, 0.25);
    approx(fill.end(), arena.duration(stage1).unwrap());
}

#[test]
fn every_stage_has_its_labels_and_the_last_has_no_content_out() {
    let (arena, root) = build();
    for i in 0..5 {
        for label in StageLabel::ALL {
            let found = resolve_label_time(&arena, root, &label.name(i));
            if label == StageLabel::ContentOut && i == 4 {
                assert!(matches!(found, Err(ScrollstageError::LabelNotFound(_))));
            } else {
                assert!(found.is_ok(), "{}", label.name(i));
            }
        }
    }

    let root_labels: Vec<&str> = arena
        .labels(root)
        .unwrap()
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(
        root_labels,
        ["stage0Snap", "stage1Snap", "stage2Snap", "stage3Snap", "stage4Snap"]
    );
}

#[test]
fn root_duration_is_sum_of_stages() {
    let (arena, root) = build();
    let sum: f64 = arena
        .descendants(root)
        .unwrap()
        .iter()
        .map(|tl| arena.duration(*tl).unwrap())
        .sum();
    approx(arena.duration(root).unwrap(), sum);
}

#[test]
fn in_between_tween_spans_labels() {
    let (mut arena, root) = build();
    add_in_between_tween(
        &mut arena,
        root,
        [Target::Background],
        TweenVars::new(0.0).to(Prop::Scale, 1.0),
        "stage0In",
        "stage0Snap",
        0.5,
    )
    .unwrap();
    let Some(Child::Tween(t)) = arena.children(root).unwrap().last() else {
        panic!("expected tween");
    };
    approx(t.start, 0.5);
    approx(t.vars.duration, 2.31 - 0.5);
}

#[test]
fn in_between_tween_rejects_negative_duration() {
    let (mut arena, root) = build();
    let err = add_in_between_tween(
        &mut arena,
        root,
        [Target::Background],
        TweenVars::new(0.0).to(Prop::Scale, 1.0),
        "stage1In",
        "stage0In",
        0.0,
    )
    .unwrap_err();
    assert!(matches!(err, ScrollstageError::Animation(_)));

    assert!(matches!(
        add_in_between_tween(
            &mut arena,
            root,
            [Target::Background],
            TweenVars::new(0.0),
            "stage0In",
            "nowhere",
            0.0,
        ),
        Err(ScrollstageError::LabelNotFound(_))
    ));
}

fn content_in_starts(components: &[ContentComponent]) -> Vec<(String, f64)> {
    let stages = vec![SetupStage {
        header: vec![ContentBlock {
            tag: "h2".to_owned(),
            text: "AB".to_owned(),
        }],
        body: vec![ContentBlock {
            tag: "p".to_owned(),
            text: "CD".to_owned(),
        }],
    }];
    let content = AnimatableContent::split(
        &DynamicContent::copy_from(&stages, 5),
        &ScrollPrompt {
            text: String::new(),
            arrow: false,
        },
    );
    let config = InteractiveConfig::default();
    let mut arena = TimelineArena::new();
    let root = arena.new_timeline();
    StageSequencer::new(&mut arena, root, &content, &config, 5)
        .with_components(components)
        .build_stages()
        .unwrap();

    let stage0 = arena.descendants(root).unwrap()[0];
    let content_in = resolve_label_time(&arena, stage0, "stage0ContentIn").unwrap();
    let mut starts: Vec<(String, f64)> = arena
        .children(stage0)
        .unwrap()
        .iter()
        .filter_map(|c| match c {
            Child::Tween(t) if t.start < content_in + 1.0 => match t.targets.first() {
                Some(Target::Content(id)) => Some((content.name(*id)?.to_owned(), t.start)),
                _ => None,
            },
            _ => None,
        })
        .collect();
    starts.sort_by(|a, b| a.1.total_cmp(&b.1));
    starts
}

#[test]
fn component_order_drives_content_in() {
    let default_order = content_in_starts(&[ContentComponent::Header, ContentComponent::Body]);
    assert!(default_order[0].0.starts_with("stage0.header"));
    assert!(default_order[1].0.starts_with("stage0.body"));
    approx(default_order[1].1 - default_order[0].1, 0.25);

    let reversed = content_in_starts(&[ContentComponent::Body, ContentComponent::Header]);
    assert!(reversed[0].0.starts_with("stage0.body"));
    assert!(reversed[1].0.starts_with("stage0.header"));
    approx(reversed[0].1, default_order[0].1);
}
