#![no_main]

use libfuzzer_sys::fuzz_target;

use brainrun::{test_utils::scan_for_partner, BracketError, Program};

fn check_loop_balance(data: &[u8]) -> Option<BracketError> {
    let mut open = vec![];
    for (pos, v) in data.iter().enumerate() {
        match v {
            b'[' => open.push(pos),
            b']' => {
                if open.pop().is_none() {
                    return Some(BracketError::MissingOpen { position: pos });
                }
            }
            _ => (),
        }
    }
    open.first()
        .map(|&position| BracketError::MissingClose { position })
}

fuzz_target!(|data: &[u8]| {
    let program = Program::new(data);
    match program.check_balance() {
        Ok(_) => assert_eq!(check_loop_balance(data), None),
        Err(e) => assert_eq!(check_loop_balance(data), Some(e)),
    }
    for (pos, byte) in data.iter().enumerate() {
        match byte {
            b'[' => assert_eq!(
                program.skip_forward(pos),
                scan_for_partner(data, pos).map(|end| end + 1)
            ),
            b']' => assert_eq!(
                program.jump_back(pos),
                scan_for_partner(data, pos).map(|start| start + 1)
            ),
            _ => (),
        }
    }
});
