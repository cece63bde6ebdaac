use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use thiserror::Error;

use crate::parser::BracketError;
use crate::parser::Instruction;
use crate::parser::Program;
use crate::tape::Tape;
use crate::tape::TapeError;

/// Error type for execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The tape could not grow.
    #[error("Tape error: {0}")]
    TapeError(#[from] TapeError),
    /// A loop had to be jumped over or repeated, but has no partner bracket.
    #[error("{0}")]
    UnmatchedBracket(#[from] BracketError),
    /// Writing to the output failed.
    #[error("Failed to write output: {0}")]
    OutputError(std::io::Error),
    /// Reading from the input failed (end of input is not an error).
    #[error("Failed to read input: {0}")]
    InputError(std::io::Error),
    /// Aborted by callback
    #[error("Callback aborted execution")]
    Aborted,
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TapeError(l0), Self::TapeError(r0)) => l0 == r0,
            (Self::UnmatchedBracket(l0), Self::UnmatchedBracket(r0)) => l0 == r0,
            (Self::OutputError(l0), Self::OutputError(r0)) => l0.kind() == r0.kind(),
            (Self::InputError(l0), Self::InputError(r0)) => l0.kind() == r0.kind(),
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// Data sent to execution callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteCallbackData {
    /// Offset of the instruction in the source.
    pub position: usize,
    /// The instruction about to be executed.
    pub instruction: Instruction,
}

/// Reply type for callback
pub enum ExecuteCallbackResult {
    /// Continue execution
    Continue,
    /// Abort execution
    Abort,
}

/// Run a program until the end of the source is reached.
///
/// The callback is invoked before every instruction (comments are skipped
/// without calling it).
pub fn execute<TapeT: Tape, F>(
    program: &Program,
    tape: &mut TapeT,
    input: &mut impl Read,
    output: &mut impl Write,
    callback: &mut F,
) -> Result<(), ExecutionError>
where
    F: FnMut(ExecuteCallbackData, &TapeT) -> ExecuteCallbackResult,
{
    let mut pc = 0;
    while pc < program.len() {
        let Some(instruction) = program.instruction(pc) else {
            pc += 1;
            continue;
        };
        let data = ExecuteCallbackData {
            position: pc,
            instruction,
        };
        match callback(data, tape) {
            ExecuteCallbackResult::Continue => (),
            ExecuteCallbackResult::Abort => return Err(ExecutionError::Aborted),
        }
        pc = match instruction {
            Instruction::Right => {
                tape.advance()?;
                pc + 1
            }
            Instruction::Left => {
                tape.retreat()?;
                pc + 1
            }
            Instruction::Add => {
                tape.increment();
                pc + 1
            }
            Instruction::Subtract => {
                tape.decrement();
                pc + 1
            }
            Instruction::Output => {
                let tmp: [u8; 1] = [tape.read().into()];
                output.write_all(&tmp).map_err(ExecutionError::OutputError)?;
                pc + 1
            }
            Instruction::Input => {
                // We may need to flush output here if there wasn't a newline.
                output.flush().map_err(ExecutionError::OutputError)?;
                tape.write(read_byte(input)?.unwrap_or(0).into());
                pc + 1
            }
            Instruction::BeginLoop if tape.read().is_zero() => program.skip_forward(pc)?,
            Instruction::EndLoop if !tape.read().is_zero() => program.jump_back(pc)?,
            Instruction::BeginLoop | Instruction::EndLoop => pc + 1,
        };
    }
    output.flush().map_err(ExecutionError::OutputError)?;
    Ok(())
}

/// Read a single byte, `None` at end of input.
fn read_byte(input: &mut impl Read) -> Result<Option<u8>, ExecutionError> {
    let mut tmp: [u8; 1] = [0; 1];
    loop {
        match input.read(&mut tmp) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(tmp[0])),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ExecutionError::InputError(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{self, Read, Write};

    use crate::parser::BracketError;
    use crate::parser::Instruction;
    use crate::parser::Program;
    use crate::tape::{Tape, TapeError, VecTape};
    use crate::BfNum;
    use crate::TapeAddr;

    use super::execute;
    use super::ExecuteCallbackResult;
    use super::ExecutionError;

    fn run(src: &[u8], input: &[u8]) -> (Result<(), ExecutionError>, VecTape, Vec<u8>) {
        let program = Program::new(src);
        let mut tape = VecTape::new();
        let mut input: VecDeque<u8> = input.iter().copied().collect();
        let mut output: Vec<u8> = Vec::new();
        let result = execute(
            &program,
            &mut tape,
            &mut input,
            &mut output,
            &mut |_, _| ExecuteCallbackResult::Continue,
        );
        (result, tape, output)
    }

    #[test]
    fn test_execute() {
        let (result, tape, output) = run(b"+++>-->++[-]>+<>>>>>,.<,,", &[65, 32]);
        assert_eq!(result, Ok(()));
        assert_eq!(tape.position(), TapeAddr::new(6));
        assert_eq!(tape.get(0.into()), 3u8.into());
        assert_eq!(tape.get(1.into()), 254u8.into());
        assert_eq!(tape.get(2.into()), BfNum::ZERO);
        assert_eq!(tape.get(3.into()), 1u8.into());
        // Second read on cell 6 hit end of input.
        assert_eq!(tape.get(6.into()), BfNum::ZERO);
        assert_eq!(tape.get(7.into()), 65u8.into());
        assert_eq!(output, vec![65]);
    }

    #[test]
    fn test_addition_loop() {
        let (result, _, output) = run(b"++>+++++[<+>-]<.", &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(output, vec![7]);
    }

    #[test]
    fn test_comments_ignored() {
        let (result, _, output) = run(b"add two: ++ then\nprint it: . done!", &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(output, vec![2]);
    }

    #[test]
    fn test_echo_and_eof() {
        let (result, _, output) = run(b",.", b"x");
        assert_eq!(result, Ok(()));
        assert_eq!(output, b"x");

        let (result, _, output) = run(b"+++++,.", b"");
        assert_eq!(result, Ok(()));
        assert_eq!(output, vec![0]);
    }

    #[test]
    fn test_clear_loop() {
        let (result, tape, _) = run(b"+++++++[-]", &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(tape.read(), BfNum::ZERO);

        let (result, tape, output) = run(b"[-.]", &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(tape.read(), BfNum::ZERO);
        assert!(output.is_empty());
    }

    #[test]
    fn test_left_of_origin() {
        let (result, tape, output) = run(b"<<<+++[>+<-]>.>>.", &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(output, vec![3, 0]);
        assert_eq!(tape.position(), TapeAddr::new(0));
        assert_eq!(tape.get((-2).into()), 3u8.into());
    }

    #[test]
    fn test_unmatched() {
        let (result, _, _) = run(b"+-[", &[]);
        assert_eq!(
            result,
            Err(BracketError::MissingClose { position: 2 }.into())
        );
        let (result, _, _) = run(b"+]", &[]);
        assert_eq!(
            result,
            Err(BracketError::MissingOpen { position: 1 }.into())
        );
        // Only a jump needs the partner bracket.
        let (result, _, _) = run(b"]", &[]);
        assert_eq!(result, Ok(()));
        let (result, _, _) = run(b"+[-", &[]);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_deep_nesting_skip() {
        let mut src = vec![b'['; 1000];
        src.extend(vec![b']'; 1000]);
        src.extend(b"+.");
        let (result, _, output) = run(&src, &[]);
        assert_eq!(result, Ok(()));
        assert_eq!(output, vec![1]);
    }

    #[test]
    fn test_tape_limit() {
        let program = Program::new(*b"+[>+]");
        let mut tape = VecTape::with_limit(64);
        let result = execute(
            &program,
            &mut tape,
            &mut io::empty(),
            &mut io::sink(),
            &mut |_, _| ExecuteCallbackResult::Continue,
        );
        assert_eq!(
            result,
            Err(TapeError::AllocationFailure { requested: 128 }.into())
        );
    }

    #[test]
    fn test_abort() {
        let program = Program::new(*b"+[]");
        let mut tape = VecTape::new();
        let mut steps = 0;
        let result = execute(
            &program,
            &mut tape,
            &mut io::empty(),
            &mut io::sink(),
            &mut |data, _| {
                steps += 1;
                assert_ne!(data.instruction, Instruction::Input);
                if steps > 1000 {
                    ExecuteCallbackResult::Abort
                } else {
                    ExecuteCallbackResult::Continue
                }
            },
        );
        assert_eq!(result, Err(ExecutionError::Aborted));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_errors() {
        let program = Program::new(*b"+.");
        let result = execute(
            &program,
            &mut VecTape::new(),
            &mut io::empty(),
            &mut Broken,
            &mut |_, _| ExecuteCallbackResult::Continue,
        );
        assert_eq!(
            result,
            Err(ExecutionError::OutputError(io::ErrorKind::BrokenPipe.into()))
        );

        let program = Program::new(*b",");
        let result = execute(
            &program,
            &mut VecTape::new(),
            &mut Broken,
            &mut Vec::new(),
            &mut |_, _| ExecuteCallbackResult::Continue,
        );
        assert_eq!(
            result,
            Err(ExecutionError::InputError(io::ErrorKind::BrokenPipe.into()))
        );
    }
}
