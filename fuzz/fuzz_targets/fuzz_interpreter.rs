#![no_main]

use brainrun::test_utils::test_execute;
use brainrun::ExecutionError;
use brainrun::Program;
use brainrun_fuzz::FuzzInputSrc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputSrc| {
    let mut input = data.input;
    let program = Program::new(data.code);

    let exec = test_execute(&program, &mut input, 500);
    match exec.result {
        Some(Ok(_)) => (),
        Some(Err(err)) => match err {
            ExecutionError::TapeError(_) => (),
            ExecutionError::UnmatchedBracket(_) => {
                assert!(program.check_balance().is_err());
            }
            ExecutionError::OutputError(_) | ExecutionError::InputError(_) => {
                panic!("In-memory IO failed: {err}")
            }
            ExecutionError::Aborted => (),
        },
        None => unreachable!(),
    }
});
