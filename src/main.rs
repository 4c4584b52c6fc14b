// src/main.rs
// CLI front end: parse args, run the generator, print progress lines.

use std::path::Path;

use color_eyre::eyre::{eyre, Result};

use tba_typegen::cli::parse_cli;
use tba_typegen::params::Params;
use tba_typegen::progress::Progress;
use tba_typegen::runner;

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("Generating {} declaration file(s)", total);
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn item_done(&mut self, host: &str, version: u32, path: &Path) {
        eprintln!("{}-{}: wrote {}", host, version, path.display());
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut params = Params::new();
    parse_cli(&mut params).map_err(|e| eyre!(e.to_string()))?;

    let mut progress = ConsoleProgress;
    let summary =
        runner::run(&params, Some(&mut progress)).map_err(|e| eyre!(e.to_string()))?;

    if summary.files_written.is_empty() {
        return Err(eyre!("No declaration files were written"));
    }
    Ok(())
}
