//! Seams to the outside world: the participant-facing display/keyboard and
//! the operator-facing intake dialog.
//!
//! Both are blocking. A session runs on one thread and waits on these calls
//! for as long as it takes; there are no deadlines.

use crate::error::SurfaceError;
use crate::participant::IntakeForm;
use std::path::Path;

pub trait Presenter {
    /// Draw a full-screen message. Does not wait; the runner reads keys.
    fn show_text(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Draw the machine stimulus.
    fn show_image(&mut self, asset: &Path) -> Result<(), SurfaceError>;

    /// Block until the next key press and return its name
    /// (`left`, `right`, `space`, ...).
    fn next_key(&mut self) -> Result<String, SurfaceError>;
}

pub trait IntakePrompt {
    /// Ask every field of `form`. `Ok(None)` means the operator cancelled.
    fn prompt_fields(&mut self, form: &IntakeForm) -> Result<Option<Vec<String>>, SurfaceError>;
}
