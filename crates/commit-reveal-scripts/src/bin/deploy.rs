use std::{io, process::ExitCode};

use commit_reveal_scripts::{exit::report, procedure::Deploy, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let outcome = run(Deploy).await;
    ExitCode::from(report(outcome, &mut io::stdout(), &mut io::stderr()))
}
