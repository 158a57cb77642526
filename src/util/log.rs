use std::fs::File;
use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to a file under the platform data directory; the terminal itself
/// belongs to the TUI.
pub fn initialize_logging() -> Result<()> {
    let directory = log_directory()?;
    std::fs::create_dir_all(&directory)?;
    let log_file = File::create(directory.join("tunescout.log"))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tunescout=info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

fn log_directory() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "tunescout", "tunescout")
        .ok_or_else(|| eyre!("no data directory available for logs"))?;
    Ok(dirs.data_local_dir().to_path_buf())
}
