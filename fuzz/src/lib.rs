//! Fuzzing helper function

use std::collections::VecDeque;
use std::fmt::Debug;

use brainrun::Instruction;

#[derive(Debug, arbitrary::Arbitrary)]
pub struct FuzzInputInstructions {
    pub instructions: Vec<Instruction>,
    pub input: VecDeque<u8>,
}

impl FuzzInputInstructions {
    /// Render the instructions as source code.
    pub fn source(&self) -> Vec<u8> {
        self.instructions.iter().map(|i| i.as_byte()).collect()
    }
}

#[derive(arbitrary::Arbitrary)]
pub struct FuzzInputSrc {
    pub code: Vec<u8>,
    pub input: VecDeque<u8>,
}

impl Debug for FuzzInputSrc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzInputSrc")
            .field("code", &String::from_utf8_lossy(&self.code))
            .field("input", &self.input)
            .finish()
    }
}
