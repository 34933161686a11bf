use super::{prompts, Settings};
use crate::output::{detail_table, mask_string, Output};
use crate::{ui, ConfigCommands};
use cinescope_api::{ApiError, CatalogApi, TmdbClient};
use cinescope_config::Config;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use std::time::Duration;

pub async fn run_config(settings: Settings, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(&settings, full, output),
        ConfigCommands::SetKey { key } => set_key(&settings, key, output).await,
        ConfigCommands::SetLanguage { language } => set_language(settings, language, output),
        ConfigCommands::Init { force } => init_config(&settings, force, output),
    }
}

fn show_config(settings: &Settings, full: bool, output: &Output) -> Result<()> {
    let config = &settings.config;
    let paths = &settings.paths;
    let credentials = settings.credentials()?;
    let key = credentials.get_tmdb_api_key().unwrap_or_default();
    let key_display = if full { key.to_string() } else { mask_string(key) };
    let validation = config.validate().err().map(|e| e.to_string());

    if !output.is_human() {
        output.data(
            "config",
            &json!({
                "config_file": paths.config_file(),
                "credentials_file": paths.credentials_file(),
                "database_file": config.database_path(paths),
                "api_key": key_display,
                "config": config,
                "problem": validation,
            }),
        );
        return Ok(());
    }

    if !paths.config_file().exists() {
        output.warn(format!(
            "No config file at {}, showing defaults. Run 'cinescope config init' to create one.",
            paths.config_file().display()
        ));
    }

    output.table(&detail_table(
        "Files",
        vec![
            ("Config file", paths.config_file().display().to_string()),
            ("Credentials", paths.credentials_file().display().to_string()),
            ("Database", config.database_path(paths).display().to_string()),
            ("Log file", paths.log_file().display().to_string()),
        ],
    ));
    output.table(&detail_table(
        "Catalog API",
        vec![
            ("API key", key_display),
            ("Base URL", config.api.base_url.clone()),
            ("Image base URL", config.api.image_base_url.clone()),
            ("Language", config.api.language.clone()),
            ("Timeout", format!("{} seconds", config.api.timeout_secs)),
        ],
    ));
    output.table(&detail_table(
        "Paging & logging",
        vec![
            (
                "Genre page limit",
                config
                    .paging
                    .genre_page_limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "provider total".to_string()),
            ),
            ("Log level", config.logging.level.clone()),
            ("Log to file", config.logging.to_file.to_string()),
        ],
    ));

    if let Some(problem) = validation {
        output.warn(format!("Configuration problem: {}", problem));
    }
    Ok(())
}

async fn set_key(settings: &Settings, key_arg: Option<String>, output: &Output) -> Result<()> {
    let key = match key_arg {
        Some(key) => key,
        None => {
            output.info("Create an API key at https://www.themoviedb.org/settings/api");
            loop {
                let input = prompts::prompt_secret("TMDB API key")?;
                if input.trim().is_empty() {
                    output.error("API key cannot be empty");
                    continue;
                }
                break input;
            }
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    // A cheap authenticated call tells a typo from a working key
    let config = &settings.config;
    let client = TmdbClient::new(
        &config.api.base_url,
        key.clone(),
        config.api.language.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )
    .map_err(|e| eyre!("Failed to create TMDB client: {}", e))?;

    match ui::loading("Verifying API key", output, client.movie_genres()).await {
        Ok(_) => output.success("API key verified"),
        Err(e @ ApiError::Status { status: 401, .. }) => {
            output.warn(format!("The catalog rejected this key: {}", e));
            let interactive = output.is_human() && ui::is_interactive();
            if !interactive || !prompts::prompt_yes_no("Save it anyway?", Some(false))? {
                return Err(eyre!("API key verification failed"));
            }
        }
        Err(e) => output.warn(format!("Could not verify the key: {}. Saving anyway.", e)),
    }

    let mut credentials = settings.credentials()?;
    credentials.set_tmdb_api_key(key);
    let credentials_file = settings.paths.credentials_file();
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {:#}", credentials_file.display(), e))?;
    output.success(format!("API key saved to {}", credentials_file.display()));
    Ok(())
}

fn set_language(mut settings: Settings, language: String, output: &Output) -> Result<()> {
    settings.config.api.language = language.trim().to_string();
    settings
        .config
        .validate()
        .map_err(|e| eyre!("Invalid language: {}", e))?;
    save(&settings.config, &settings)?;
    output.success(format!("Language set to {}", settings.config.api.language));
    Ok(())
}

fn init_config(settings: &Settings, force: bool, output: &Output) -> Result<()> {
    let config_file = settings.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }
    settings
        .paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    save(&Config::default(), settings)?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn save(config: &Config, settings: &Settings) -> Result<()> {
    let config_file = settings.paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {:#}", config_file.display(), e))
}
