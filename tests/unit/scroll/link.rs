use super::*;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn snapping_config() -> InteractiveConfig {
    InteractiveConfig {
        scroll_length: 10.0,
        snap_scroll: true,
        ..InteractiveConfig::default()
    }
}

/// Feed snap offsets back until the link stops moving the page.
fn settle(link: &mut ScrollLink, mut y: f64) -> f64 {
    for _ in 0..100 {
        if let Some(s) = link.update(y, 0.1).snap_scroll {
            y = s;
        }
    }
    y
}

#[test]
fn progress_is_clamped_to_the_pin() {
    let link = ScrollLink::new(100.0, 800.0, &InteractiveConfig::default(), 20.0, &[]).unwrap();
    assert_eq!(link.start(), 100.0);
    assert_eq!(link.end(), 7300.0);
    assert_eq!(link.progress(0.0), 0.0);
    assert_eq!(link.progress(3700.0), 0.5);
    assert_eq!(link.progress(1e9), 1.0);
    assert_eq!(link.scroll_for_progress(0.5), 3700.0);
}

#[test]
fn scrub_true_follows_scroll_exactly() {
    let mut link = ScrollLink::new(100.0, 800.0, &InteractiveConfig::default(), 20.0, &[]).unwrap();
    assert_eq!(link.update(3700.0, 0.016).time, 10.0);
    assert_eq!(link.update(100.0, 0.016).time, 0.0);
}

#[test]
fn numeric_scrub_catches_up_over_time() {
    let cfg = InteractiveConfig {
        scrub_factor: Scrub::Smoothed(1.0),
        ..InteractiveConfig::default()
    };
    let mut link = ScrollLink::new(0.0, 100.0, &cfg, 9.0, &[]).unwrap();
    let first = link.update(900.0, 0.1).time;
    assert!(first > 0.0 && first < 9.0, "{first}");
    for _ in 0..200 {
        link.update(900.0, 0.1);
    }
    approx(link.time(), 9.0);
}

#[test]
fn disabled_scrub_plays_in_real_time() {
    let cfg = InteractiveConfig {
        scrub_factor: Scrub::Enabled(false),
        ..InteractiveConfig::default()
    };
    let mut link = ScrollLink::new(500.0, 100.0, &cfg, 2.0, &[]).unwrap();
    assert_eq!(link.update(0.0, 0.5).time, 0.0);
    assert_eq!(link.update(600.0, 0.5).time, 0.5);
    assert_eq!(link.update(600.0, 5.0).time, 2.0);
}

#[test]
fn snaps_forward_to_next_label_after_idle_delay() {
    let mut link = ScrollLink::new(0.0, 100.0, &snapping_config(), 10.0, &[2.0, 6.0]).unwrap();
    assert_eq!(link.snap_points(), &[0.2, 0.6]);

    link.update(0.0, 0.1);
    link.update(300.0, 0.1);
    // Still inside the idle delay.
    assert_eq!(link.update(300.0, 0.05).snap_scroll, None);

    let y = settle(&mut link, 300.0);
    approx(y, 600.0);
    approx(link.time(), 6.0);
}

#[test]
fn snaps_backward_when_scrolling_up() {
    let mut link = ScrollLink::new(0.0, 100.0, &snapping_config(), 10.0, &[2.0, 6.0]).unwrap();
    link.update(0.0, 0.1);
    link.update(900.0, 0.1);
    link.update(500.0, 0.1);
    approx(settle(&mut link, 500.0), 200.0);
}

#[test]
fn nearest_label_when_nothing_lies_ahead() {
    let mut link = ScrollLink::new(0.0, 100.0, &snapping_config(), 10.0, &[2.0, 6.0]).unwrap();
    link.update(0.0, 0.1);
    link.update(700.0, 0.1);
    approx(settle(&mut link, 700.0), 600.0);
}

#[test]
fn user_scroll_cancels_a_running_snap() {
    let mut link = ScrollLink::new(0.0, 100.0, &snapping_config(), 10.0, &[2.0, 6.0]).unwrap();
    link.update(0.0, 0.1);
    link.update(300.0, 0.1);
    link.update(300.0, 0.1);
    link.update(300.0, 0.1);
    let moving = link.update(300.0, 0.1).snap_scroll;
    assert!(moving.is_some());

    let frame = link.update(310.0, 0.1);
    assert_eq!(frame.snap_scroll, None);
    approx(frame.time, 3.1);
}

#[test]
fn no_snapping_unless_enabled() {
    let mut link = ScrollLink::new(0.0, 100.0, &InteractiveConfig::default(), 10.0, &[2.0]).unwrap();
    link.update(0.0, 0.1);
    link.update(300.0, 0.1);
    approx(settle(&mut link, 300.0), 300.0);
}

#[test]
fn seek_jumps_without_smoothing() {
    let cfg = InteractiveConfig {
        scrub_factor: Scrub::Smoothed(5.0),
        ..InteractiveConfig::default()
    };
    let mut link = ScrollLink::new(0.0, 100.0, &cfg, 9.0, &[]).unwrap();
    assert_eq!(link.seek(450.0), 4.5);
}

#[test]
fn rejects_zero_window() {
    assert!(ScrollLink::new(0.0, 0.0, &InteractiveConfig::default(), 1.0, &[]).is_err());
}
