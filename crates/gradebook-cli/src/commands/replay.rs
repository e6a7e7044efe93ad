// ABOUTME: 'gradebook replay' command implementation
// ABOUTME: Feeds a file of operator lines to a fresh session and prints the transcript

use super::{drive, SessionOptions};
use crate::conversation::Conversation;
use gradebook_lib::Result;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Configuration for replay command
pub struct ReplayConfig {
    pub file: PathBuf,
    pub export_dir: PathBuf,
    pub verbose: bool,
}

/// Replay a script of operator lines
pub fn run(config: &ReplayConfig) -> Result<()> {
    let script = File::open(&config.file)?;

    if config.verbose {
        println!("Replaying {}", config.file.display());
        println!("Exports are written to {}", config.export_dir.display());
    }

    let mut conversation = Conversation::new(&config.export_dir);
    drive(
        &mut conversation,
        BufReader::new(script),
        io::stdout().lock(),
        &SessionOptions {
            echo: true,
            menu: false,
        },
    )?;

    if conversation.is_awaiting_answer() {
        tracing::warn!(file = %config.file.display(), "script ended in the middle of a prompt");
    }

    if config.verbose {
        println!();
        println!("{}", conversation.journal().render_table());
    }

    Ok(())
}
