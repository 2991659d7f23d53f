use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use super::Session;
use crate::command::Outcome;
use crate::notify::ConsoleNotifier;
use crate::persistence::Store;

/// Reads one command per line until `bye` or end of input.
pub fn run<S: Store>(session: &mut Session<S>, input: impl BufRead, out: impl Write) -> Result<()> {
    let mut notifier = ConsoleNotifier::new(out);
    session.greet(&mut notifier);
    for line in input.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if session.handle_line(line, &mut notifier) == Outcome::Exit {
            return Ok(());
        }
    }
    debug!("input closed without bye");
    Ok(())
}
