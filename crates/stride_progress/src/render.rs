//! Render strategies: plain console output or a rich display surface.

use std::io::{self, Write};

use crossterm::tty::IsTty;

use crate::errors::{ProgressError, Result};
use crate::format::Snapshot;
use crate::frontend::Frontend;

/// Render strategy for a single bar, selected once at construction.
pub enum Renderer {
    Console(ConsoleRenderer),
    Rich(RichRenderer),
}

impl Renderer {
    /// Build the default renderer for the detected front end.
    pub fn detect() -> Self {
        match Frontend::detect() {
            Frontend::Rich => {
                Renderer::Rich(RichRenderer::new(Box::new(JupyterSurface::new())))
            }
            Frontend::Console => Renderer::Console(ConsoleRenderer::new()),
        }
    }

    /// Initial paint at construction time.
    ///
    /// Rich surfaces show their widgets immediately; the console stays
    /// quiet until the first throttled redraw.
    pub(crate) fn first_paint(&mut self, snapshot: &Snapshot) -> Result<()> {
        match self {
            Renderer::Console(_) => Ok(()),
            Renderer::Rich(rich) => rich.surface.display(snapshot),
        }
    }

    pub(crate) fn paint(&mut self, snapshot: &Snapshot) -> Result<()> {
        match self {
            Renderer::Console(console) => console.paint(snapshot),
            Renderer::Rich(rich) => rich.surface.update(snapshot),
        }
    }

    pub(crate) fn close(&mut self) -> Result<()> {
        match self {
            Renderer::Console(console) => console.finish(),
            Renderer::Rich(rich) => rich.surface.dispose(),
        }
    }
}

/// Renders one line of text per paint.
///
/// On an interactive terminal the line is redrawn in place with a carriage
/// return; when output is piped each paint becomes its own line.
pub struct ConsoleRenderer {
    writer: Box<dyn Write + Send>,
    inline: bool,
    painted: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        let stdout = io::stdout();
        let inline = stdout.is_tty();
        Self {
            writer: Box::new(stdout),
            inline,
            painted: false,
        }
    }

    /// Render to a custom writer, one line per paint.
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            inline: false,
            painted: false,
        }
    }

    fn paint(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.inline {
            write!(self.writer, "\r{}", snapshot.text())?;
        } else {
            writeln!(self.writer, "{}", snapshot.text())?;
        }
        self.writer.flush()?;
        self.painted = true;
        Ok(())
    }

    /// Move past the bar line so later output starts on a fresh one.
    fn finish(&mut self) -> Result<()> {
        if self.inline && self.painted {
            writeln!(self.writer)?;
            self.writer.flush()?;
        }
        Ok(())
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Widget pair acquired from a rich front end: a bounded numeric indicator
/// and an HTML status panel.
pub trait RichSurface: Send {
    /// Show both widgets for the first time.
    fn display(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Update the indicator value and panel content in place.
    fn update(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Release the widgets. Must tolerate repeated calls.
    fn dispose(&mut self) -> Result<()>;
}

/// Renders through an abstract [`RichSurface`].
pub struct RichRenderer {
    surface: Box<dyn RichSurface>,
}

impl RichRenderer {
    pub fn new(surface: Box<dyn RichSurface>) -> Self {
        Self { surface }
    }
}

/// Rich surface speaking the evcxr display protocol: MIME-tagged content
/// blocks written to stdout, which Jupyter-style front ends pick up and
/// render as HTML.
pub struct JupyterSurface {
    writer: Box<dyn Write + Send>,
    disposed: bool,
}

impl JupyterSurface {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            disposed: false,
        }
    }

    fn emit(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.disposed {
            return Err(ProgressError::Surface(
                "surface already disposed".to_string(),
            ));
        }
        writeln!(
            self.writer,
            "EVCXR_BEGIN_CONTENT text/html\n<div><progress value=\"{}\" max=\"{}\"></progress>{}</div>\nEVCXR_END_CONTENT",
            snapshot.completed,
            snapshot.total,
            snapshot.html(),
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

impl Default for JupyterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RichSurface for JupyterSurface {
    fn display(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.emit(snapshot)
    }

    fn update(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.emit(snapshot)
    }

    fn dispose(&mut self) -> Result<()> {
        self.disposed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SharedBuf;
    use std::time::Duration;

    fn snapshot() -> Snapshot {
        Snapshot {
            completed: 2,
            total: 4,
            remaining_time: Duration::from_secs(2),
            avg_step: Duration::from_secs(1),
            elapsed: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_console_paint_writes_one_line() {
        let buf = SharedBuf::new();
        let mut console = ConsoleRenderer::with_writer(Box::new(buf.clone()));
        console.paint(&snapshot()).unwrap();

        let contents = buf.contents();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("2/4"));
    }

    #[test]
    fn test_console_finish_is_quiet_without_paints() {
        let buf = SharedBuf::new();
        let mut console = ConsoleRenderer::with_writer(Box::new(buf.clone()));
        console.finish().unwrap();
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn test_jupyter_surface_emits_html_block() {
        let buf = SharedBuf::new();
        let mut surface = JupyterSurface::with_writer(Box::new(buf.clone()));
        surface.display(&snapshot()).unwrap();

        let contents = buf.contents();
        assert!(contents.starts_with("EVCXR_BEGIN_CONTENT text/html"));
        assert!(contents.contains("<progress value=\"2\" max=\"4\">"));
        assert!(contents.contains("<th>Remaining time:</th>"));
        assert!(contents.trim_end().ends_with("EVCXR_END_CONTENT"));
    }

    #[test]
    fn test_jupyter_surface_rejects_update_after_dispose() {
        let buf = SharedBuf::new();
        let mut surface = JupyterSurface::with_writer(Box::new(buf.clone()));
        surface.dispose().unwrap();
        surface.dispose().unwrap();
        assert!(surface.update(&snapshot()).is_err());
    }
}
