//! Source loading: decoding instructions and matching brackets.

use thiserror::Error;

/// The eight BF instructions.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Instruction {
    Left,
    Right,
    Add,
    Subtract,
    Input,
    Output,
    BeginLoop,
    EndLoop,
}

impl Instruction {
    /// Decode a source byte. Anything that isn't an instruction is a
    /// comment.
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Self::Left),
            b'>' => Some(Self::Right),
            b'+' => Some(Self::Add),
            b'-' => Some(Self::Subtract),
            b',' => Some(Self::Input),
            b'.' => Some(Self::Output),
            b'[' => Some(Self::BeginLoop),
            b']' => Some(Self::EndLoop),
            _ => None,
        }
    }

    /// The source byte for this instruction.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Left => b'<',
            Self::Right => b'>',
            Self::Add => b'+',
            Self::Subtract => b'-',
            Self::Input => b',',
            Self::Output => b'.',
            Self::BeginLoop => b'[',
            Self::EndLoop => b']',
        }
    }
}

/// Errors from bracket matching
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BracketError {
    /// A `[` with no `]` after it.
    #[error("Unmatched [ at offset {position}: missing ]")]
    MissingClose { position: usize },
    /// A `]` with no `[` before it.
    #[error("Unmatched ] at offset {position}: missing [")]
    MissingOpen { position: usize },
}

/// A loaded program: the raw source and its jump table.
///
/// `jumps[i]` is only meaningful when `source[i]` is a bracket. It holds the
/// position of the matching bracket, or `None` if the bracket is unmatched.
/// Unmatched brackets are only an error once execution needs to jump over
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    source: Vec<u8>,
    jumps: Vec<Option<usize>>,
}

impl Program {
    /// Load a program, matching brackets in one pass.
    pub fn new(source: impl Into<Vec<u8>>) -> Self {
        let source = source.into();
        let jumps = build_jump_table(&source);
        Self { source, jumps }
    }

    /// Number of source bytes (including comments).
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// The instruction at `pos`, if it is one.
    pub fn instruction(&self, pos: usize) -> Option<Instruction> {
        self.source.get(pos).copied().and_then(Instruction::decode)
    }

    /// Position to resume at when skipping the loop that starts at `pos`.
    ///
    /// This is the position right after the matching `]`.
    pub fn skip_forward(&self, pos: usize) -> Result<usize, BracketError> {
        match self.jumps.get(pos).copied().flatten() {
            Some(end) => Ok(end + 1),
            None => Err(BracketError::MissingClose { position: pos }),
        }
    }

    /// Position to resume at when repeating the loop that ends at `pos`.
    ///
    /// This is the position right after the matching `[`. The `]` only
    /// jumps back on a non-zero cell, so the `[` test would always pass and
    /// is not repeated.
    pub fn jump_back(&self, pos: usize) -> Result<usize, BracketError> {
        match self.jumps.get(pos).copied().flatten() {
            Some(start) => Ok(start + 1),
            None => Err(BracketError::MissingOpen { position: pos }),
        }
    }

    /// Report the first unmatched bracket in source order, if any.
    pub fn check_balance(&self) -> Result<(), BracketError> {
        for (pos, byte) in self.source.iter().enumerate() {
            if self.jumps[pos].is_some() {
                continue;
            }
            match byte {
                b'[' => return Err(BracketError::MissingClose { position: pos }),
                b']' => return Err(BracketError::MissingOpen { position: pos }),
                _ => (),
            }
        }
        Ok(())
    }
}

/// Pair up brackets with a stack of open loop positions.
fn build_jump_table(source: &[u8]) -> Vec<Option<usize>> {
    let mut jumps = vec![None; source.len()];
    let mut open_loops = vec![];
    for (pos, byte) in source.iter().enumerate() {
        match Instruction::decode(*byte) {
            Some(Instruction::BeginLoop) => open_loops.push(pos),
            Some(Instruction::EndLoop) => {
                // A `]` with nothing open stays unmatched.
                if let Some(start) = open_loops.pop() {
                    jumps[start] = Some(pos);
                    jumps[pos] = Some(start);
                }
            }
            _ => (),
        }
    }
    // Whatever is left on the stack is an unmatched `[`.
    jumps
}
