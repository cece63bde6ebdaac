use crate::{
    parser::BracketError, tape::VecTape, ExecuteCallbackResult, ExecutionError, Program,
};

#[derive(Debug, Default, PartialEq)]
pub struct ExecutionState {
    pub result: Option<Result<(), ExecutionError>>,
    pub tape: VecTape,
    pub output: Vec<u8>,
}

/// Run a program with in-memory IO, aborting after `max_steps` instructions.
pub fn test_execute(
    program: &Program,
    input: &mut impl std::io::Read,
    max_steps: usize,
) -> ExecutionState {
    let mut instr_count = 0;
    let mut exec = ExecutionState::default();
    exec.result = Some(crate::execute(
        program,
        &mut exec.tape,
        input,
        &mut exec.output,
        &mut |_, _| {
            instr_count += 1;
            if instr_count > max_steps {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    ));

    exec
}

/// Find the partner of the bracket at `pos` by scanning the source and
/// counting nesting levels. Used to cross-check the jump table.
pub fn scan_for_partner(source: &[u8], pos: usize) -> Result<usize, BracketError> {
    match source[pos] {
        b'[' => {
            let mut level = 1usize;
            for (idx, byte) in source.iter().enumerate().skip(pos + 1) {
                match byte {
                    b'[' => level += 1,
                    b']' => {
                        level -= 1;
                        if level == 0 {
                            return Ok(idx);
                        }
                    }
                    _ => (),
                }
            }
            Err(BracketError::MissingClose { position: pos })
        }
        b']' => {
            let mut level = 1usize;
            for idx in (0..pos).rev() {
                match source[idx] {
                    b']' => level += 1,
                    b'[' => {
                        level -= 1;
                        if level == 0 {
                            return Ok(idx);
                        }
                    }
                    _ => (),
                }
            }
            Err(BracketError::MissingOpen { position: pos })
        }
        other => panic!("Not a bracket: {other:#x} at {pos}"),
    }
}
