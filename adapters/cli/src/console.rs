//! Terminal input and output for interactive sessions.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result as AnyResult};
use maze_crawler_rendering::{RenderingBackend, TextFrame};
use maze_crawler_system_traversal::CommandSource;

const PROMPT: &str = "Enter your move (W for Up, A for Left, S for Down, D for Right, Q to Quit): ";

/// Reads whitespace-separated command tokens, prompting before each line.
pub(crate) struct PromptedCommands<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R> PromptedCommands<R>
where
    R: BufRead,
{
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R> CommandSource for PromptedCommands<R>
where
    R: BufRead,
{
    fn next_token(&mut self) -> AnyResult<Option<String>> {
        while self.pending.is_empty() {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{PROMPT}").context("failed to write prompt")?;
            stdout.flush().context("failed to flush prompt")?;

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .context("failed to read command")?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}

/// Writes composed frames to standard output.
#[derive(Debug, Default)]
pub(crate) struct StdoutBackend;

impl RenderingBackend for StdoutBackend {
    fn present(&mut self, frame: &TextFrame) -> AnyResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{frame}").context("failed to write frame")?;
        stdout.flush().context("failed to flush frame")?;
        Ok(())
    }
}

/// Waits for the player to press Enter.
pub(crate) fn acknowledge<R>(mut reader: R) -> AnyResult<()>
where
    R: BufRead,
{
    let mut stdout = io::stdout().lock();
    write!(stdout, "Press Enter to exit...").context("failed to write prompt")?;
    stdout.flush().context("failed to flush prompt")?;
    drop(stdout);

    let mut line = String::new();
    let _ = reader
        .read_line(&mut line)
        .context("failed to read acknowledgement")?;
    Ok(())
}
