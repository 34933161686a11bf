use super::{prompts, Settings};
use crate::output::Output;
use crate::ui;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

pub async fn run_clear(
    settings: &Settings,
    all: bool,
    watchlist: bool,
    credentials: bool,
    yes: bool,
    output: &Output,
) -> Result<()> {
    if !(all || watchlist || credentials) {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.info("Example: cinescope clear --watchlist");
        return Ok(());
    }

    if !yes && !confirm(all, watchlist, output)? {
        output.info("Nothing cleared");
        return Ok(());
    }

    if all || watchlist {
        clear_watch_list(settings, output).await?;
    }
    if all || credentials {
        clear_credentials(settings, output)?;
    }
    if all {
        output.success("Watch list and credentials cleared");
    }
    Ok(())
}

fn confirm(all: bool, watchlist: bool, output: &Output) -> Result<bool> {
    if !output.is_human() || !ui::is_interactive() {
        return Err(eyre!("Refusing to clear without confirmation. Pass --yes to proceed."));
    }
    let prompt = match (all, watchlist) {
        (true, _) => "Delete every saved title and the stored API key?",
        (false, true) => "Delete every saved title?",
        (false, false) => "Delete the stored API key?",
    };
    prompts::prompt_yes_no(prompt, Some(false))
}

async fn clear_watch_list(settings: &Settings, output: &Output) -> Result<()> {
    let database = settings.config.database_path(&settings.paths);
    if !database.exists() {
        output.info("No watch-list database found to clear");
        return Ok(());
    }

    let store = settings.store().await?;
    let removed = store
        .clear()
        .await
        .map_err(|e| eyre!("Failed to clear the watch list at {}: {}", database.display(), e))?;
    output.success(format!("Removed {} watch-list entr{}", removed, if removed == 1 { "y" } else { "ies" }));
    output.data("removed", &removed);
    Ok(())
}

fn clear_credentials(settings: &Settings, output: &Output) -> Result<()> {
    let credentials_file = settings.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
