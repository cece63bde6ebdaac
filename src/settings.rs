//! Settings defining how to run a program

use crate::tape::VecTape;

/// Run configuration
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Settings {
    /// Dump every executed instruction to stderr.
    pub trace: bool,
    /// Upper bound on the number of tape cells. Growing past it is reported
    /// as an allocation failure.
    pub max_tape_cells: Option<usize>,
}

impl Settings {
    /// Create the tape described by these settings.
    pub fn make_tape(&self) -> VecTape {
        match self.max_tape_cells {
            Some(limit) => VecTape::with_limit(limit),
            None => VecTape::new(),
        }
    }
}
