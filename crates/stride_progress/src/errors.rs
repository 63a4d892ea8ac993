use thiserror::Error;

/// Errors that can occur on the render path.
///
/// Public mutators never surface these: a failed redraw is logged and
/// swallowed so a broken display cannot abort the workload it is measuring.
#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, ProgressError>;
