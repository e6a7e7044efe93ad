// ABOUTME: 'gradebook start' command implementation
// ABOUTME: Runs an interactive journal session on stdin/stdout

use super::{drive, render_menu, SessionOptions};
use crate::conversation::{Conversation, WELCOME};
use gradebook_lib::Result;
use std::io;
use std::path::PathBuf;

/// Configuration for start command
pub struct StartConfig {
    pub export_dir: PathBuf,
    pub verbose: bool,
}

/// Run an interactive session until stdin closes
pub fn run(config: &StartConfig) -> Result<()> {
    if config.verbose {
        println!("Exports are written to {}", config.export_dir.display());
    }

    println!("{WELCOME}");
    print!("{}", render_menu());

    let mut conversation = Conversation::new(&config.export_dir);
    drive(
        &mut conversation,
        io::stdin().lock(),
        io::stdout().lock(),
        &SessionOptions {
            echo: false,
            menu: true,
        },
    )?;

    tracing::info!(students = conversation.journal().len(), "session closed");
    Ok(())
}
