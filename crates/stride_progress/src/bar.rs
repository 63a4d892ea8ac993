use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::format::Snapshot;
use crate::render::Renderer;

/// Steps averaged plainly before exponential smoothing takes over.
const WARMUP_STEPS: u64 = 10;

/// Progress bar for an integer number of steps.
///
/// Each [`inc`] folds the elapsed step time into a smoothed seconds-per-step
/// estimate and redraws the display if at least the configured interval has
/// passed since the previous redraw. `completed` may run past `total`
/// without failing; only the rendered remaining time clamps at zero.
///
/// The bar is single-threaded by construction: [`inc`] takes `&mut self`,
/// so concurrent advancement requires external serialization.
///
/// ```no_run
/// use std::time::Duration;
/// use stride_progress::ProgressBar;
///
/// let mut bar = ProgressBar::new(500)
///     .with_smoothing(0.3)
///     .with_interval(Duration::from_millis(250));
/// for _ in 0..500 {
///     bar.inc();
/// }
/// ```
///
/// [`inc`]: ProgressBar::inc
pub struct ProgressBar {
    completed: u64,
    total: u64,
    smoothing: f64,
    interval: Duration,
    started_at: Instant,
    last_step: Instant,
    last_render: Instant,
    avg_step_secs: f64,
    renderer: Renderer,
    closed: bool,
}

impl ProgressBar {
    /// Create a bar for `total` steps, rendering to the front end detected
    /// for this process. Defaults: smoothing 0.1, interval 1 second.
    pub fn new(total: u64) -> Self {
        Self::with_renderer(total, Renderer::detect())
    }

    /// Create a bar rendering to an explicit target.
    ///
    /// A rich target paints its widgets immediately; the console stays
    /// quiet until the first throttled redraw.
    pub fn with_renderer(total: u64, renderer: Renderer) -> Self {
        let now = Instant::now();
        let mut bar = Self {
            completed: 0,
            total,
            smoothing: 0.1,
            interval: Duration::from_secs(1),
            started_at: now,
            last_step: now,
            last_render: now,
            avg_step_secs: 0.0,
            renderer,
            closed: false,
        };
        let snapshot = bar.snapshot();
        if let Err(err) = bar.renderer.first_paint(&snapshot) {
            warn!("initial progress paint failed: {err}");
        }
        bar
    }

    /// Smoothing factor for the time estimate, clamped to `[0, 1]`.
    ///
    /// A smaller value averages more steps; `1.0` trusts only the most
    /// recent step, `0.0` freezes the estimate once warm-up ends.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing.min(1.0).max(0.0);
        self
    }

    /// Minimum wall-clock gap between redraws.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Record one completed step and redraw if the interval has passed.
    pub fn inc(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_step).as_secs_f64();
        self.completed += 1;
        self.avg_step_secs =
            update_estimate(self.avg_step_secs, dt, self.completed, self.smoothing);
        self.last_step = now;
        self.render(now);
    }

    fn render(&mut self, now: Instant) {
        if now.duration_since(self.last_render) <= self.interval {
            return;
        }
        let snapshot = self.snapshot();
        if let Err(err) = self.renderer.paint(&snapshot) {
            warn!("progress render failed: {err}");
        }
        self.last_render = now;
    }

    fn snapshot(&self) -> Snapshot {
        let remaining = self.total.saturating_sub(self.completed);
        Snapshot {
            completed: self.completed,
            total: self.total,
            remaining_time: Duration::from_secs_f64(self.avg_step_secs * remaining as f64),
            avg_step: Duration::from_secs_f64(self.avg_step_secs),
            elapsed: self.last_step.duration_since(self.started_at),
        }
    }

    /// Steps finished so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Total step count the bar was constructed with.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.snapshot().fraction()
    }

    /// Projected time to finish the remaining steps.
    pub fn eta(&self) -> Duration {
        self.snapshot().remaining_time
    }

    /// Smoothed duration of a single step.
    pub fn avg_step(&self) -> Duration {
        self.snapshot().avg_step
    }

    /// Time elapsed between construction and the last completed step.
    pub fn elapsed(&self) -> Duration {
        self.snapshot().elapsed
    }

    /// Single-line text representation, identical to the console output.
    pub fn text(&self) -> String {
        self.snapshot().text()
    }

    /// Key/value table markup, identical to the rich-panel content.
    pub fn html(&self) -> String {
        self.snapshot().html()
    }

    /// Release any acquired display resources.
    ///
    /// Safe to call repeatedly; also runs on drop, so every exit path of a
    /// consuming loop releases the display.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.renderer.close() {
            warn!("closing progress display failed: {err}");
        }
        debug!(
            completed = self.completed,
            total = self.total,
            "progress bar closed"
        );
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("completed", &self.completed)
            .field("total", &self.total)
            .field("smoothing", &self.smoothing)
            .field("interval", &self.interval)
            .field("avg_step_secs", &self.avg_step_secs)
            .field("closed", &self.closed)
            .finish()
    }
}

impl fmt::Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Fold one step duration into the seconds-per-step estimate.
///
/// Below [`WARMUP_STEPS`] completed steps a plain running average is used,
/// keeping the first unrepresentative samples from dominating; afterwards
/// the estimate is exponentially smoothed. `completed` counts the step the
/// sample belongs to, so it is always at least 1 here.
fn update_estimate(avg: f64, dt: f64, completed: u64, smoothing: f64) -> f64 {
    if completed < WARMUP_STEPS {
        (dt + (completed - 1) as f64 * avg) / completed as f64
    } else {
        smoothing * dt + (1.0 - smoothing) * avg
    }
}
