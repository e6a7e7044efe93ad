// ABOUTME: Command implementations for the Gradebook CLI
// ABOUTME: Submodules for start and replay, plus the shared line-driven session loop

pub mod replay;
pub mod start;

use crate::conversation::{Conversation, MENU};
use gradebook_lib::Result;
use std::io::{BufRead, Write};

/// How replies are written back
pub struct SessionOptions {
    /// Echo each input line before its reply
    pub echo: bool,
    /// Print the menu whenever a flow finishes
    pub menu: bool,
}

/// Feed every input line to the conversation and write each reply
pub fn drive<R: BufRead, W: Write>(
    conversation: &mut Conversation,
    input: R,
    mut output: W,
    options: &SessionOptions,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let text = line.trim_end_matches(['\r', '\n']);

        if options.echo {
            writeln!(output, "> {text}")?;
        }
        let reply = conversation.handle(text);
        writeln!(output, "{}", reply.text.trim_end_matches('\n'))?;
        if reply.menu && options.menu {
            write!(output, "{}", render_menu())?;
        }
        output.flush()?;
    }
    Ok(())
}

/// Numbered menu; either the number or the label selects an entry
pub fn render_menu() -> String {
    MENU.iter()
        .enumerate()
        .map(|(i, entry)| format!("  {}. {entry}\n", i + 1))
        .collect()
}
