use std::{fmt::Display, io::Write};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Print the outcome of a script and return the process exit code.
///
/// Success prints the report as a single line on `stdout`. Failure prints the whole error chain
/// on `stderr`.
pub fn report<T: Display, E: Into<anyhow::Error>>(
    outcome: Result<T, E>,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> u8 {
    let error = match outcome {
        Ok(report) => match writeln!(stdout, "{report}") {
            Ok(()) => return EXIT_SUCCESS,
            Err(err) => anyhow::Error::from(err).context("Cannot write the report"),
        },
        Err(err) => err.into(),
    };

    // Nothing sensible is left to do if stderr is gone as well.
    let _ = writeln!(stderr, "Error: {error:?}");
    EXIT_FAILURE
}
