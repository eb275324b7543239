/*
 * Shared code for the day programs: input reading, result reporting, and the
 * grid search engine the solutions are built on.
 * Example import from this crate: `use grid_search::search::Crucible;`.
 */

use std::env;
use std::fs;
use std::path::Path;

pub mod cli;
pub mod direction;
pub mod error;
pub mod grid;
pub mod search;

pub use error::{Error, Result};

#[doc(hidden)]
pub use log as __log;

pub const ANSI_ITALIC: &str = "\x1b[3m";
pub const ANSI_BOLD: &str = "\x1b[1m";
pub const ANSI_RESET: &str = "\x1b[0m";

/// Logs a debug line. Enable with `RUST_LOG=debug`.
#[macro_export]
macro_rules! debugln {
    () => {
        $crate::__log::debug!("")
    };
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

/// Runs one part of a day program, prints its answer, and returns whether it
/// was solved and matches the expected answer (if there is one).
#[macro_export]
macro_rules! solve {
    ($part:expr, $solver:ident, $input:expr, $expected:expr) => {{
        use std::fmt::Display;
        use std::time::Instant;
        use $crate::{ANSI_BOLD, ANSI_ITALIC, ANSI_RESET};

        fn print_result<I: ?Sized, T: Display + PartialEq>(
            func: impl FnOnce(&I) -> $crate::Result<T>,
            input: &I,
            expected: Option<T>,
        ) -> bool {
            let timer = Instant::now();
            let result = func(input);
            let elapsed = timer.elapsed();
            match result {
                Ok(result) => {
                    println!("{}(elapsed: {:.2?}){}", ANSI_ITALIC, elapsed, ANSI_RESET);
                    let matches = match &expected {
                        Some(expected) if *expected != result => {
                            println!("expected {}, got {}", expected, result);
                            false
                        }
                        _ => true,
                    };
                    println!("The result is: {}", result);
                    matches
                }
                Err(err) => {
                    println!("not solved: {}", err);
                    false
                }
            }
        }

        println!("🎄 {}Part {}{} 🎄", ANSI_BOLD, $part, ANSI_RESET);
        print_result($solver, $input, $expected)
    }};
}

/// Initializes `env_logger`, defaulting to warnings only.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A second call (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

pub fn read_whole_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

/// Reads `src/<folder>/<day>.txt`, relative to the working directory.
pub fn read_file(folder: &str, day: u8) -> String {
    let cwd = env::current_dir().unwrap();
    let filepath = cwd.join("src").join(folder).join(format!("{day:02}.txt"));
    let f = fs::read_to_string(filepath);
    f.expect("could not open input file")
}
