//! Observable render targets for tests.
//!
//! These stand in for stdout and for a rich front end so tests can count
//! paints and disposals instead of inspecting a real terminal.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::Result;
use crate::format::Snapshot;
use crate::render::RichSurface;

/// A cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuf {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().expect("buffer lock poisoned");
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Number of complete lines written so far.
    pub fn line_count(&self) -> usize {
        self.contents().lines().count()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().expect("buffer lock poisoned");
        buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A [`RichSurface`] that only counts calls.
#[derive(Clone, Default)]
pub struct CountingSurface {
    displays: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    disposes: Arc<AtomicUsize>,
}

impl CountingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displays(&self) -> usize {
        self.displays.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn disposes(&self) -> usize {
        self.disposes.load(Ordering::SeqCst)
    }
}

impl RichSurface for CountingSurface {
    fn display(&mut self, _snapshot: &Snapshot) -> Result<()> {
        self.displays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update(&mut self, _snapshot: &Snapshot) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        self.disposes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
