use base_image_inventory::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock OutputPresenter that keeps every presented reference in order
#[derive(Default, Clone)]
pub struct MockOutputPresenter {
    lines: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockOutputPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presenter whose every write fails, like a closed stdout pipe
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl OutputPresenter for MockOutputPresenter {
    fn present(&self, image: &BaseImageRef) -> Result<()> {
        if self.fail {
            anyhow::bail!("Mock presenter failure");
        }
        self.lines.lock().unwrap().push(image.to_string());
        Ok(())
    }
}
