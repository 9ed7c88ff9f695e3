use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use nabu_script::Diagnostics;
use nabu_ui::{init_logging, LoggingConfig, Ui};

/// Run a `.nabu` script and print the interface it builds.
#[derive(Parser)]
#[command(name = "nabu-studio", version, about)]
struct Cli {
    /// Script to run; a bundled demo when omitted.
    script: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "nabu_script=debug".
    #[arg(long)]
    filter: Option<String>,

    /// Print notes about input the lexer/parser silently degraded on.
    #[arg(long)]
    notes: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig { filter: cli.filter });

    let (name, source) = match &cli.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => ("demos/hello.nabu".to_string(), include_str!("../demos/hello.nabu").to_string()),
    };

    let mut ui = Ui::new();
    let mut diag = Diagnostics::new();
    let root = nabu_script::run_script_with(&source, &mut ui, &mut diag)
        .map_err(|e| anyhow::anyhow!("{name}: {e}"))?;

    match root {
        Some(_) => print!("{}", ui.dump_tree()),
        None => println!("{name}: the script built no window"),
    }

    let notices = ui.notifications();
    if !notices.is_empty() {
        println!();
        for notice in notices {
            println!("notice [{:?}] {}: {}", notice.kind, notice.title, notice.message);
        }
    }

    if cli.notes && !diag.is_empty() {
        println!();
        for entry in diag.entries() {
            println!("note {entry}");
        }
    }

    Ok(())
}
