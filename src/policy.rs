//! What happens to a failed resolution, per [`ErrorHandling`].

use std::io::Write;
use std::process;

use crate::error::ClapenvError;
use crate::types::{EXIT_CODE, ErrorHandling};

/// Apply `handling` to the outcome of a resolution. `help` is whether a
/// help token was seen in the arguments.
pub(crate) fn apply<T: Default>(
    handling: ErrorHandling,
    result: Result<T, ClapenvError>,
    help: bool,
    output: &mut dyn Write,
    name: &str,
) -> Result<T, ClapenvError> {
    let err = match result {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    match handling {
        ErrorHandling::Continue if err.is_help() => Ok(T::default()),
        ErrorHandling::Continue => Err(err),
        ErrorHandling::Exit => {
            if help || err.is_help() {
                process::exit(0);
            }
            let _ = write_error(output, name, &err);
            let _ = output.flush();
            process::exit(EXIT_CODE);
        }
        ErrorHandling::Panic => panic!("{err}"),
    }
}

/// Flag registry errors carry their own rendering (message plus usage
/// hint); everything else is prefixed with the command name.
pub(crate) fn write_error(
    output: &mut dyn Write,
    name: &str,
    err: &ClapenvError,
) -> std::io::Result<()> {
    match err {
        ClapenvError::Cli(e) => write!(output, "{}", e.render()),
        other => writeln!(output, "{name}: {other}"),
    }
}
