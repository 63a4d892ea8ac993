//! Progress bars with smoothed time estimation.
//!
//! A [`ProgressBar`] counts completed steps against a known total, keeps an
//! exponentially smoothed estimate of seconds-per-step, and redraws itself at
//! most once per configured interval. Output goes to the console as a single
//! text line, or to a notebook-style front end as an HTML panel when one is
//! detected at startup.
//!
//! ```no_run
//! use stride_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::new(100);
//! for _ in 0..100 {
//!     // ... do one unit of work ...
//!     bar.inc();
//! }
//! // The display resource is released when the bar is dropped; call
//! // `close` to release it earlier.
//! ```
//!
//! Iterators can carry a bar along instead of driving one by hand:
//!
//! ```no_run
//! use stride_progress::{ndindex, ProgressIteratorExt};
//!
//! for coord in ndindex(&[20, 30]).progress() {
//!     // ... coord is [row, col], last axis fastest ...
//! }
//! ```

pub mod errors;
pub mod format;
pub mod frontend;
pub mod ndindex;
pub mod render;
pub mod test_utils;

mod bar;

pub use bar::ProgressBar;
pub use errors::{ProgressError, Result};
pub use format::Snapshot;
pub use frontend::Frontend;
pub use ndindex::{ndindex, NdIndex, ProgressIter, ProgressIteratorExt};
pub use render::{ConsoleRenderer, Renderer, RichRenderer, RichSurface};
