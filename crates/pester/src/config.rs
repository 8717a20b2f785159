use crate::events::AppEvent;
use async_channel::Sender;
use nag::config::{ConfigError, get_config_path};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Config path {0} has no parent directory")]
    NoParent(PathBuf),
    #[error("Failed to create config directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file is created, changed or removed.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher error: {}", e);
    }
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), WatchError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| WatchError::NoParent(config_path.clone()))?;

    fs_err::create_dir_all(&config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if touches_config(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}
