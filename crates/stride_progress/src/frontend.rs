//! Process-wide front-end detection.

use std::sync::OnceLock;

use tracing::debug;

static FRONTEND: OnceLock<Frontend> = OnceLock::new();

/// Render target available to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    /// Plain console output.
    Console,
    /// Notebook-style front end with rich HTML display support.
    Rich,
}

impl Frontend {
    /// Detect the front end for this process.
    ///
    /// The result is computed once and fixed for the session; every bar
    /// constructed afterwards sees the same answer.
    pub fn detect() -> Frontend {
        *FRONTEND.get_or_init(|| {
            let frontend = Self::probe(|name| std::env::var_os(name).is_some());
            debug!(?frontend, "detected display front end");
            frontend
        })
    }

    fn probe(has_env: impl Fn(&str) -> bool) -> Frontend {
        // Jupyter front ends export JPY_PARENT_PID into kernel processes;
        // the evcxr kernel additionally marks itself.
        if has_env("EVCXR_IS_JUPYTER") || has_env("JPY_PARENT_PID") {
            Frontend::Rich
        } else {
            Frontend::Console
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_console_by_default() {
        assert_eq!(Frontend::probe(|_| false), Frontend::Console);
    }

    #[test]
    fn test_probe_rich_under_jupyter() {
        assert_eq!(
            Frontend::probe(|name| name == "JPY_PARENT_PID"),
            Frontend::Rich
        );
        assert_eq!(
            Frontend::probe(|name| name == "EVCXR_IS_JUPYTER"),
            Frontend::Rich
        );
    }
}
