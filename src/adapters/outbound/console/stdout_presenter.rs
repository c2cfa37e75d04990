use crate::inventory::domain::BaseImageRef;
use crate::ports::outbound::OutputPresenter;
use crate::shared::error::InventoryError;
use crate::shared::Result;
use std::cell::RefCell;
use std::io::{self, Write};

/// StdoutPresenter adapter writing one image reference per line
///
/// Each line is flushed as soon as it is written, so output survives a
/// stop part-way through the run and can be piped incrementally.
pub struct StdoutPresenter<W: Write = io::Stdout> {
    writer: RefCell<W>,
}

impl StdoutPresenter {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutPresenter<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> OutputPresenter for StdoutPresenter<W> {
    fn present(&self, image: &BaseImageRef) -> Result<()> {
        let mut writer = self.writer.borrow_mut();
        writeln!(writer, "{}", image)
            .and_then(|_| writer.flush())
            .map_err(|e| InventoryError::OutputError {
                details: e.to_string(),
            })?;
        Ok(())
    }
}
