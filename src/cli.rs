use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::{read_whole_file, Error, Result};

/// Command line of a day program:
/// `NN <input-file> [--expect-one N] [--expect-two N]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: PathBuf,
    /// The answer part one must produce for the program to succeed.
    pub expect_one: Option<usize>,
    pub expect_two: Option<usize>,
}

impl Args {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let expect_one = args.opt_value_from_str("--expect-one")?;
        let expect_two = args.opt_value_from_str("--expect-two")?;
        let input = args.free_from_str()?;

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(Error::UnexpectedArguments(remaining));
        }

        Ok(Self {
            input,
            expect_one,
            expect_two,
        })
    }
}

/// Sets up logging, parses the command line and hands the input file to
/// [`execute`].
pub fn run<F>(solve: F) -> ExitCode
where
    F: FnOnce(&str, &Args) -> Result<bool>,
{
    crate::init_logging();

    let args = match Args::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Usage: <input-file> [--expect-one N] [--expect-two N]");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{args:?}");

    if execute(&args, solve) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Reads the input file and hands it to `solve`, which returns whether every
/// part was solved as expected. Errors are printed to stderr.
pub fn execute<F>(args: &Args, solve: F) -> bool
where
    F: FnOnce(&str, &Args) -> Result<bool>,
{
    match read_whole_file(&args.input).and_then(|input| solve(&input, args)) {
        Ok(solved) => solved,
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}
