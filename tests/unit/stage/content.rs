use super::*;

fn block(tag: &str, text: &str) -> ContentBlock {
    ContentBlock {
        tag: tag.to_owned(),
        text: text.to_owned(),
    }
}

fn stages() -> Vec<SetupStage> {
    vec![
        SetupStage {
            header: vec![block("h2", "Hi all")],
            body: vec![block("p", "ok"), block("a", "Learn more")],
        },
        SetupStage {
            header: vec![],
            body: vec![block("p", "kept")],
        },
    ]
}

#[test]
fn copy_pads_missing_stages_and_counts_progress() {
    let content = DynamicContent::copy_from(&stages(), 5);
    assert_eq!(content.stages().len(), 5);
    assert_eq!(content.progress_stages(), 3);
    assert_eq!(content.stages()[0].body.len(), 2);
    // An empty header still copies the stage body.
    assert!(content.stages()[1].header.is_empty());
    assert_eq!(content.stages()[1].body, [block("p", "kept")]);
    assert_eq!(content.stages()[4], SetupStage::default());
}

#[test]
fn splittable_tags_split_into_non_whitespace_chars() {
    let content = DynamicContent::copy_from(&stages(), 5);
    let animatable = AnimatableContent::split(&content, &ScrollPrompt::default());

    let header = animatable.children(ContentComponent::Header, 0);
    assert_eq!(header.len(), 1);
    assert_eq!(header[0].parts.len(), 5);

    let body = animatable.children(ContentComponent::Body, 0);
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].parts.len(), 2);
    assert_eq!(body[1].parts.len(), 1);
    let link = body[1].targets(false)[0];
    assert_eq!(animatable.name(link), Some("stage0.body.1.a"));

    assert!(animatable.children(ContentComponent::Body, 3).is_empty());
    assert!(animatable.children(ContentComponent::Header, 99).is_empty());
}

#[test]
fn reversing_a_child_reverses_its_parts_only() {
    let content = DynamicContent::copy_from(&[], 5);
    let animatable = AnimatableContent::split(
        &content,
        &ScrollPrompt {
            text: "Go".to_owned(),
            arrow: true,
        },
    );

    let prompt = &animatable.children(ContentComponent::ScrollPrompt, 0)[0];
    let forward = prompt.targets(false);
    let backward = prompt.targets(true);
    assert_eq!(forward.len(), 3);
    // [chars, arrow] -> [arrow, chars]: the characters keep their order.
    assert_eq!(backward, vec![forward[2], forward[0], forward[1]]);

    let progress = &animatable.children(ContentComponent::Progress, 0)[0];
    let mut expected = progress.targets(false);
    expected.reverse();
    assert_eq!(progress.targets(true), expected);
    assert_eq!(animatable.progress_bars(), 3);
}

#[test]
fn every_target_is_enumerated_once() {
    let content = DynamicContent::copy_from(&stages(), 5);
    let animatable = AnimatableContent::split(&content, &ScrollPrompt::default());
    // "Hiall" + "ok" + link + 3 progress + "Scroll" + arrow
    assert_eq!(animatable.len(), 5 + 2 + 1 + 3 + 6 + 1);
    assert_eq!(animatable.all_targets().count(), animatable.len());
    assert!(!animatable.is_empty());
    assert_eq!(ContentComponent::ScrollPrompt.name(), "scrollPrompt");
    assert!(ContentComponent::Body.is_dynamic());
    assert!(!ContentComponent::Progress.is_dynamic());
}
