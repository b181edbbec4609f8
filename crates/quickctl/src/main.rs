use clap::{Parser, Subcommand};
use quickctl::config;
use quickctl::gui::app::AppModel;
use quickctl::gui::control::ControlState;
use quickctl::sys::runtime;
use quickctl::sys::server::SOCKET_PATH;
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "quickctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Mount the handle on a running daemon.
    Show,
    /// Unmount the handle, dropping drag and expand state.
    Hide,
    /// Write the bundled config if none exists and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => send_command("show"),
        Some(Commands::Hide) => send_command("hide"),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            run_daemon();
            Ok(())
        }
    }
}

fn run_daemon() {
    let config = config::load_or_default();
    let state = ControlState::from_config(&config);

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.quickctl.QuickControl");
    app.run::<AppModel>((state, rx));
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to quickctl daemon at {}: {}. Is quickctl running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
