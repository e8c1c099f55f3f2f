use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use portal_app::cli::{self, Command, HELP};
use portal_app::config::PortalConfig;
use portal_app::domain::repository::SlotStore;
use portal_app::infra::file_store::FileSlotStore;
use portal_app::infra::memory_store::MemorySlotStore;
use portal_app::infra::terminal::TerminalSurface;
use portal_app::notify::ToastTray;
use portal_app::state::Portal;

#[derive(Parser)]
#[command(about = "Employee and inventory-request portal")]
struct Args {
    /// Directory holding the storage slots (overrides PORTAL_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Byte quota per slot (overrides PORTAL_STORAGE_QUOTA)
    #[arg(long)]
    quota: Option<usize>,

    /// Keep everything in memory; nothing survives the process
    #[arg(long)]
    ephemeral: bool,

    /// Location to show first, e.g. `#/login`
    #[arg(long, default_value = "/")]
    route: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    portal_core::tracing::init_tracing();
    let args = Args::parse();

    let mut config = PortalConfig::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(quota) = args.quota {
        config.storage_quota = quota;
    }

    let surface = TerminalSurface::new(ToastTray::new(config.toast_visible, config.toast_fade));
    if args.ephemeral {
        info!("using in-memory storage");
        let store = MemorySlotStore::with_quota(config.storage_quota);
        run(Portal::start(store, surface, &args.route).await).await
    } else {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .with_context(|| format!("cannot create data dir {}", config.data_dir.display()))?;
        info!(dir = %config.data_dir.display(), "using file storage");
        let store = FileSlotStore::new(config.data_dir, config.storage_quota);
        run(Portal::start(store, surface, &args.route).await).await
    }
}

async fn run<S: SlotStore>(mut portal: Portal<S, TerminalSurface>) -> Result<()> {
    println!("Type `help` for commands.");
    while let Some(line) = portal.surface.next_line().await {
        match cli::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Action(action))) => portal.apply(action).await,
            Ok(Some(Command::Toasts)) => {
                for toast in portal.surface.toasts() {
                    println!("#{} ({}) {}", toast.id, toast.severity.as_str(), toast.message);
                }
            }
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::Quit)) => break,
            Err(e) => eprintln!("{e}"),
        }
    }
    info!("portal closed");
    Ok(())
}
