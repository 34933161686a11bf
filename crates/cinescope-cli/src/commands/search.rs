use super::catalog::collect_pages;
use super::Settings;
use crate::output::Output;
use crate::{render, ui};
use cinescope_core::AppContext;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_search(settings: &Settings, query: &str, pages: u32, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    if pages > 1 && !query.trim().is_empty() {
        return search_pages(&app, query, pages, output).await;
    }

    let search = app.search();
    ui::loading(&format!("Searching for '{}'", query.trim()), output, search.search(query)).await;

    let found = output.state("Search", search.results.current(), |out, movies| {
        if movies.is_empty() {
            out.info(format!("No movies found for '{}'", query.trim()));
        } else {
            out.heading(&format!("Movies matching '{}'", query.trim()));
            out.table(&render::movies(movies));
        }
        out.data("results", movies);
    });

    match found {
        Some(_) => Ok(()),
        None => Err(eyre!("Search for '{}' failed", query.trim())),
    }
}

/// Several pages of the movie-only search endpoint
async fn search_pages(app: &AppContext, query: &str, pages: u32, output: &Output) -> Result<()> {
    let adapter = app.repos.search.paged(query);
    let movies = collect_pages(&adapter, 1, pages, output).await?;
    if movies.is_empty() {
        output.info(format!("No movies found for '{}'", query.trim()));
    } else {
        output.heading(&format!("Movies matching '{}'", query.trim()));
        output.table(&render::movies(&movies));
    }
    output.data("results", &movies);
    Ok(())
}
