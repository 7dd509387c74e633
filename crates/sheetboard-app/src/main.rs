//! Main application entry point (native).

#[cfg(feature = "native")]
use clap::Parser;

/// Replay a recorded whiteboard session and export its sheets.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "sheetboard", about = "Sheetboard session replay")]
struct Cli {
    /// Session file (JSON) with optional `config` and an `actions` list.
    session: std::path::PathBuf,

    /// Directory the export action writes into.
    #[arg(long, short, default_value = ".")]
    output_dir: std::path::PathBuf,
}

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting Sheetboard");

    match sheetboard_app::run_session(&cli.session, &cli.output_dir) {
        Ok(app) => {
            log::info!(
                "Replayed {} with {} sheet(s)",
                cli.session.display(),
                app.canvas().document.sheet_count()
            );
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
