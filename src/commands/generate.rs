//! Generate the page

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::time::{Duration, Instant};

use crate::generator::Build;
use crate::ui::Notification;
use crate::Folio;

/// Generate once
pub async fn run(folio: &Folio) -> Result<Build> {
    let start = Instant::now();
    let build = folio.generate().await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(build)
}

/// Notification to show the user for a finished build, if any
pub fn notification(build: &Build) -> Option<Notification> {
    build.error.as_ref().map(|e| {
        Notification::error(format!("Error loading portfolio data: {}", e))
    })
}

/// Watch the source directory and config, regenerating on change
///
/// Events are debounced so a burst of writes triggers one rebuild after
/// the last of them.
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.send(res);
        },
    )?;

    if folio.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&folio.source_dir, RecursiveMode::Recursive)?;
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(result) = rx.recv().await {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };
        for event in &events {
            tracing::debug!("Changed: {:?}", event.path);
        }

        tracing::info!("File changed, regenerating...");
        // Config changes take effect on the next build
        let result = match Folio::new(&folio.base_dir) {
            Ok(current) => run(&current).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(build) => {
                if let Some(note) = notification(&build) {
                    eprintln!("{}", note.message);
                }
            }
            Err(e) => tracing::error!("Generation failed: {}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_notification_for_failed_build() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let build = run(&folio).await.unwrap();
        let note = notification(&build).unwrap();
        assert!(note.is_error());
        assert!(note.message.starts_with("Error loading portfolio data: "));
    }

    #[tokio::test]
    async fn test_watch_builds_last_write_of_a_burst() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("source/data/data.json");
        fs::create_dir_all(data.parent().unwrap()).unwrap();
        fs::write(&data, r#"{"hero": {"subtitle": "start"}}"#).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let watcher = {
            let folio = folio.clone();
            tokio::spawn(async move { watch(&folio).await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;

        for subtitle in ["one", "two", "three"] {
            fs::write(&data, format!(r#"{{"hero": {{"subtitle": "{}"}}}}"#, subtitle)).unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let index = folio.public_dir.join("index.html");
        let mut html = String::new();
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            html = fs::read_to_string(&index).unwrap_or_default();
            if html.contains("three") {
                break;
            }
        }
        watcher.abort();

        assert!(html.contains("three"), "page not rebuilt after the last write");
    }
}
