use super::Settings;
use crate::output::Output;
use crate::{render, ui, WatchlistCommands};
use chrono::Utc;
use cinescope_core::{UiState, WatchListController, WatchListRepository};
use cinescope_models::{MovieDetail, WatchListEntry};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::time::Duration;

const WATCH_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub async fn run_watchlist(settings: &Settings, cmd: WatchlistCommands, output: &Output) -> Result<()> {
    match cmd {
        WatchlistCommands::List => list(settings, output).await,
        WatchlistCommands::Add { id } => add(settings, id, output).await,
        WatchlistCommands::Remove { id } => remove(settings, id, output).await,
        WatchlistCommands::Toggle { id } => toggle(settings, id, output).await,
        WatchlistCommands::Status { id } => status(settings, id, output).await,
        WatchlistCommands::Details => details(settings, output).await,
        WatchlistCommands::Watch => watch(settings, output).await,
    }
}

async fn controller(settings: &Settings) -> Result<WatchListController> {
    let store = settings.store().await?;
    Ok(WatchListController::new(WatchListRepository::new(store)))
}

/// Wait for the controller's first published list
async fn first_state(controller: &WatchListController) -> Result<UiState<Vec<WatchListEntry>>> {
    let mut rx = controller.entries.subscribe();
    let state = rx
        .wait_for(|state| !state.is_loading())
        .await
        .map_err(|_| eyre!("Watch list observer stopped"))?
        .clone();
    Ok(state)
}

fn render_entries(output: &Output, entries: &[WatchListEntry]) {
    if entries.is_empty() {
        output.info("Your watch list is empty");
    } else {
        output.heading(&format!("Watch list ({})", entries.len()));
        output.table(&render::watch_list(entries));
    }
    output.data("watch_list", entries);
}

async fn list(settings: &Settings, output: &Output) -> Result<()> {
    let controller = controller(settings).await?;
    let state = first_state(&controller).await?;
    output
        .state("Watch list", state, |out, entries| render_entries(out, entries))
        .map(|_| ())
        .ok_or_else(|| eyre!("Could not read the watch list"))
}

async fn add(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let detail: MovieDetail = ui::loading(&format!("Looking up movie {}", id), output, app.repos.movies.details(id))
        .await
        .map_err(|e| eyre!("Failed to look up movie {}: {}", id, e))?;

    let watch_list = app.watch_list();
    watch_list
        .add(WatchListEntry::from_detail(&detail, Utc::now()))
        .await
        .map_err(|e| eyre!("{}", e))?;
    output.success(format!("Added '{}' to your watch list", detail.title));
    Ok(())
}

async fn remove(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let controller = controller(settings).await?;
    let was_saved = controller.exists(id).await.map_err(|e| eyre!("{}", e))?;
    controller.remove(id).await.map_err(|e| eyre!("{}", e))?;
    if was_saved {
        output.success(format!("Removed {} from your watch list", id));
    } else {
        output.info(format!("{} was not in your watch list", id));
    }
    Ok(())
}

/// Same flow as the watch-list button on a movie screen
async fn toggle(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let detail = app.movie_detail();
    ui::loading(&format!("Loading movie {}", id), output, detail.load(id)).await;

    let saved = detail.toggle_watch_list().await.map_err(|e| eyre!("{}", e))?;
    let title = detail
        .details
        .current()
        .success()
        .map(|d| d.title.clone())
        .unwrap_or_else(|| id.to_string());
    if saved {
        output.success(format!("Added '{}' to your watch list", title));
    } else {
        output.success(format!("Removed '{}' from your watch list", title));
    }
    output.data("in_watch_list", &saved);
    Ok(())
}

async fn status(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let controller = controller(settings).await?;
    let saved = controller.exists(id).await.map_err(|e| eyre!("{}", e))?;
    if output.is_human() {
        if saved {
            output.success(format!("{} is in your watch list", id));
        } else {
            output.info(format!("{} is not in your watch list", id));
        }
    }
    output.data("in_watch_list", &saved);
    Ok(())
}

/// Refresh details for every saved movie in one concurrent batch
async fn details(settings: &Settings, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let entries = app
        .repos
        .watch_list
        .list_all()
        .await
        .map_err(|e| eyre!("Failed to read the watch list: {}", e))?;
    if entries.is_empty() {
        output.info("Your watch list is empty");
        return Ok(());
    }

    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    let batch = app.detail_batch();
    ui::loading(&format!("Loading details for {} movies", ids.len()), output, batch.load(&ids)).await;

    let image_base = settings.config.api.image_base_url.as_str();
    output.state("Watch-list details", batch.batch.current(), |out, batch| {
        // keep watch-list order rather than map order
        for id in &ids {
            if let Some(detail) = batch.details.get(id) {
                out.table(&render::movie_detail(detail, image_base));
            }
        }
        if !batch.failed.is_empty() {
            let failed: Vec<String> = batch.failed.iter().map(|id| id.to_string()).collect();
            out.warn(format!("Could not load details for: {}", failed.join(", ")));
        }
        out.data("details", batch);
    });
    Ok(())
}

/// Print the list again every time it changes until interrupted. Writes from
/// other processes are picked up by re-reading on a timer.
async fn watch(settings: &Settings, output: &Output) -> Result<()> {
    let controller = controller(settings).await?;
    let mut rx = controller.entries.subscribe();
    let mut ticker = tokio::time::interval(WATCH_POLL_INTERVAL);
    let mut last_shown: Option<UiState<Vec<WatchListEntry>>> = None;
    output.info("Watching the watch list. Press Ctrl-C to stop.");

    loop {
        let state = rx.borrow_and_update().clone();
        if !state.is_loading() && last_shown.as_ref() != Some(&state) {
            match &state {
                UiState::Success(entries) => render_entries(output, entries),
                UiState::Error(message) => output.error(message),
                UiState::Loading => {}
            }
            last_shown = Some(state);
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Err(eyre!("Watch list observer stopped"));
                }
            }
            _ = ticker.tick() => controller.refresh(),
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted, stopping watch");
                return Ok(());
            }
        }
    }
}
