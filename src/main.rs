#[cfg(target_os = "linux")]
use std::os::linux::fs::MetadataExt;

use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use thiserror::Error;

use brainrun::{
    execute, settings::Settings, tape::Tape, BracketError, ExecuteCallbackResult, ExecutionError,
    Program, TapeError,
};
use clap::{error::ErrorKind, CommandFactory, Parser};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("The source file {path:?} could not be opened for reading: {source}")]
    FileOpenError { path: PathBuf, source: io::Error },
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutionError),
}

impl ProgramError {
    /// Process exit code, distinct for every kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProgramError::FileOpenError { .. } => 1,
            ProgramError::ExecutionError(err) => match err {
                ExecutionError::TapeError(TapeError::AllocationFailure { .. }) => 2,
                ExecutionError::UnmatchedBracket(BracketError::MissingClose { .. }) => 3,
                ExecutionError::UnmatchedBracket(BracketError::MissingOpen { .. }) => 4,
                ExecutionError::OutputError(_) => 5,
                ExecutionError::InputError(_) => 6,
                ExecutionError::Aborted => 7,
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Brainfuck source file
    input_file: PathBuf,

    /// Dump every executed instruction and the tape cell it sees
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Refuse to grow the tape beyond this many cells
    #[arg(long, value_name = "CELLS")]
    max_tape_cells: Option<usize>,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            trace: self.trace,
            max_tape_cells: self.max_tape_cells,
        }
    }
}

fn load_source(path: &Path) -> Result<Vec<u8>, ProgramError> {
    let open_error = |source| ProgramError::FileOpenError {
        path: path.to_owned(),
        source,
    };
    let mut file = std::fs::File::open(path).map_err(open_error)?;

    #[cfg(target_os = "linux")]
    let mut buf = Vec::with_capacity(file.metadata().map_err(open_error)?.st_size() as usize);
    #[cfg(not(target_os = "linux"))]
    let mut buf = Vec::new();

    file.read_to_end(&mut buf).map_err(open_error)?;
    Ok(buf)
}

fn run(args: &Args) -> Result<(), ProgramError> {
    let program = Program::new(load_source(&args.input_file)?);
    let settings = args.settings();
    let trace = settings.trace;

    let mut tape = settings.make_tape();
    execute(
        &program,
        &mut tape,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut |data, tape| {
            if trace {
                dbg!((data.position, data.instruction, tape.position(), tape.read()));
            }
            ExecuteCallbackResult::Continue
        },
    )?;
    Ok(())
}

/// Print usage text for a failed argument parse and pick the exit code.
///
/// Help, version and bad invocations all end with usage text and success.
fn report_usage(err: &clap::Error, out: &mut impl Write) -> u8 {
    let text = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.render(),
        _ => Args::command().render_help(),
    };
    match write!(out, "{text}").and_then(|_| out.flush()) {
        Ok(()) => 0,
        Err(err) => ProgramError::from(ExecutionError::OutputError(err)).exit_code(),
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => return ExitCode::from(report_usage(&err, &mut io::stdout().lock())),
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
