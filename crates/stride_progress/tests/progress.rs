use std::thread::sleep;
use std::time::Duration;

use stride_progress::test_utils::{CountingSurface, SharedBuf};
use stride_progress::{
    ndindex, ConsoleRenderer, ProgressBar, ProgressIteratorExt, Renderer, RichRenderer,
};

fn rich_bar(total: u64, surface: &CountingSurface) -> ProgressBar {
    let renderer = Renderer::Rich(RichRenderer::new(Box::new(surface.clone())));
    ProgressBar::with_renderer(total, renderer)
}

fn console_bar(total: u64, buf: &SharedBuf) -> ProgressBar {
    let console = ConsoleRenderer::with_writer(Box::new(buf.clone()));
    ProgressBar::with_renderer(total, Renderer::Console(console))
}

#[test]
fn test_full_consumption_drives_and_releases_the_bar() {
    let surface = CountingSurface::new();
    let bar = rich_bar(6, &surface).with_interval(Duration::ZERO);

    let mut iter = ndindex(&[2, 3]).progress_with(bar);
    let mut yielded = 0;
    while iter.next().is_some() {
        yielded += 1;
    }

    assert_eq!(yielded, 6);
    assert_eq!(iter.bar().completed(), 6);
    assert_eq!(iter.bar().total(), 6);

    assert_eq!(surface.disposes(), 0);
    drop(iter);
    assert_eq!(surface.displays(), 1);
    assert_eq!(surface.disposes(), 1);
}

#[test]
fn test_shape_product_becomes_the_total() {
    let surface = CountingSurface::new();
    let iter = ndindex(&[4]).progress_with(rich_bar(4, &surface));
    assert_eq!(iter.bar().total(), 4);
    assert_eq!(iter.len(), 4);
}

#[test]
fn test_early_break_still_releases_the_display() {
    let surface = CountingSurface::new();
    for _coord in ndindex(&[100]).progress_with(rich_bar(100, &surface)) {
        break;
    }
    assert_eq!(surface.disposes(), 1);
}

#[test]
fn test_eta_is_zero_once_all_steps_complete() {
    let buf = SharedBuf::new();
    let mut bar = console_bar(4, &buf);
    for _ in 0..4 {
        sleep(Duration::from_millis(2));
        bar.inc();
    }
    assert_eq!(bar.completed(), 4);
    assert_eq!(bar.eta(), Duration::ZERO);
}

#[test]
fn test_renders_are_throttled_by_the_interval() {
    let buf = SharedBuf::new();
    let mut bar = console_bar(10, &buf).with_interval(Duration::from_millis(50));

    // Let one interval elapse so the first step is allowed to paint, then
    // advance twice back to back: only the first may render.
    sleep(Duration::from_millis(80));
    bar.inc();
    bar.inc();

    assert_eq!(buf.line_count(), 1);
}

#[test]
fn test_estimates_track_observed_step_time() {
    let buf = SharedBuf::new();
    let mut bar = console_bar(10, &buf).with_interval(Duration::from_secs(3600));

    for _ in 0..5 {
        sleep(Duration::from_millis(20));
        bar.inc();
    }

    let avg = bar.avg_step();
    assert!(
        avg >= Duration::from_millis(5) && avg <= Duration::from_millis(500),
        "average step should be near 20ms: {avg:?}"
    );
    // Five steps remain, so the projection scales the average.
    assert!(bar.eta() > avg);
    assert!(bar.eta() < Duration::from_secs(10));
    assert!(bar.elapsed() >= Duration::from_millis(100));
}
