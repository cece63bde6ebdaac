#![no_main]

use brainrun::test_utils::test_execute;
use brainrun::ExecutionError;
use brainrun::Program;
use brainrun_fuzz::FuzzInputInstructions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputInstructions| {
    let program = Program::new(data.source());
    let balanced = program.check_balance().is_ok();
    let mut input = data.input;

    let exec = test_execute(&program, &mut input, 500);
    if let Some(Err(ExecutionError::UnmatchedBracket(_))) = exec.result {
        assert!(!balanced);
    }
    // Capacity only ever doubles, starting from a single cell.
    assert!(exec.tape.capacity().is_power_of_two());
});
