use super::Settings;
use crate::output::Output;
use crate::{render, ui};
use cinescope_core::PagerStep;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_genres(settings: &Settings, tv: bool, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let genres = app.genres();
    if tv {
        ui::loading("Loading TV genres", output, genres.load_tv_genres()).await;
    } else {
        ui::loading("Loading movie genres", output, genres.load_movie_genres()).await;
    }

    let title = if tv { "TV genres" } else { "Movie genres" };
    output.heading(title);
    let listed = output.state(title, genres.genres.current(), |out, list| {
        out.table(&render::genres(list));
        out.data("genres", list);
    });
    listed.map(|_| ()).ok_or_else(|| eyre!("Could not load genres"))
}

pub async fn run_genre(settings: &Settings, genre_id: u32, pages: u32, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let mut genres = app.genres();

    let mut step = ui::loading(&format!("Loading genre {}", genre_id), output, genres.select(genre_id))
        .await
        .map_err(|e| eyre!("Failed to load genre {}: {}", genre_id, e))?;

    for page in 2..=pages.max(1) {
        if step == PagerStep::EndReached {
            break;
        }
        let message = format!("Loading genre {} (page {})", genre_id, page);
        match ui::loading(&message, output, genres.load_more()).await {
            Ok(next) => step = next,
            Err(e) => {
                output.warn(format!("Stopped at page {}: {}", page, e));
                break;
            }
        }
    }

    if step == PagerStep::EndReached {
        output.info("Reached the end of this genre");
    }

    output.heading(&format!("Genre {}", genre_id));
    output.state("Genre", genres.movies.current(), |out, movies| {
        out.table(&render::movies(movies));
        out.data("movies", movies);
    });
    Ok(())
}
