//! Text and HTML formatting of progress state.

use std::time::Duration;

/// Width of the text bar in cells.
pub(crate) const BAR_WIDTH: u64 = 20;

/// Point-in-time view of a bar: the four facts every render shows.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    /// Steps finished so far.
    pub completed: u64,
    /// Total step count the bar was constructed with.
    pub total: u64,
    /// Projected time to finish the remaining steps.
    pub remaining_time: Duration,
    /// Smoothed duration of a single step.
    pub avg_step: Duration,
    /// Time elapsed between construction and the last completed step.
    pub elapsed: Duration,
}

impl Snapshot {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        (self.completed as f64 / self.total.max(1) as f64).min(1.0)
    }

    /// Single-line console representation:
    /// `[========            ] 42/100 0:00:58 0:00:01 0:00:42`.
    pub fn text(&self) -> String {
        let filled = bar_fill(self.completed, self.total);
        let mut bar = String::with_capacity(BAR_WIDTH as usize + 2);
        bar.push('[');
        for cell in 0..BAR_WIDTH {
            bar.push(if cell < filled { '=' } else { ' ' });
        }
        bar.push(']');

        format!(
            "{} {}/{} {} {} {}",
            bar,
            self.completed,
            self.total,
            format_hms(self.remaining_time),
            format_hms(self.avg_step),
            format_hms(self.elapsed),
        )
    }

    /// Key/value table markup for rich front ends, same facts as [`text`].
    ///
    /// [`text`]: Snapshot::text
    pub fn html(&self) -> String {
        format!(
            "<table>\
             <tr><th>Progress:</th><td>{}/{}</td></tr>\
             <tr><th>Remaining time:</th><td>{}</td></tr>\
             <tr><th>Average time:</th><td>{}</td></tr>\
             <tr><th>Total time:</th><td>{}</td></tr>\
             </table>",
            self.completed,
            self.total,
            format_hms(self.remaining_time),
            format_hms(self.avg_step),
            format_hms(self.elapsed),
        )
    }
}

/// Filled cell count, clamped to the bar width.
///
/// A zero total renders as a full bar rather than dividing by zero.
fn bar_fill(completed: u64, total: u64) -> u64 {
    (BAR_WIDTH * completed / total.max(1)).min(BAR_WIDTH)
}

/// Format a duration as `H:MM:SS`, hours unpadded and unbounded.
///
/// Sub-second fractions are truncated.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
