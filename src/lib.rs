//! # brainrun - A Brainfuck interpreter
//!
//! Programs run directly from source. Brackets are matched once when the
//! program is loaded, and the tape grows on demand in both directions.
//!
//! **NOTE! This is a command line program. This library does NOT provide a
//! stable API, or even an API meant to be consumed by external code at all.**

// Re-export some symbols.
pub use interpreter::execute;
pub use interpreter::ExecuteCallbackData;
pub use interpreter::ExecuteCallbackResult;
pub use interpreter::ExecutionError;
pub use parser::BracketError;
pub use parser::Instruction;
pub use parser::Program;
pub use tape::TapeError;
pub use types::BfNum;
pub use types::TapeAddr;

mod interpreter;
mod parser;
pub mod settings;
pub mod tape;
#[doc(hidden)]
pub mod test_utils;
pub mod types;
