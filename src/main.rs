use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tbx", about = "tbx — terminal toolbox: log extraction and text encryption")]
struct Cli {
    /// Tool to open at startup (overrides the config file).
    #[arg(long, value_parser = ["extract", "encrypt"])]
    tool: Option<String>,

    /// File preloaded into the extractor input pane.
    file: Option<PathBuf>,

    /// Write debug logs to /tmp/tbx-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/tbx-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("tbx debug log started — tail -f /tmp/tbx-debug.log");
    }

    let initial_input = match cli.file {
        Some(path) => Some(std::fs::read_to_string(&path)?),
        None => None,
    };

    tbx_tui::run(tbx_tui::RunOptions {
        start_tool: cli.tool,
        initial_input,
    })
}
