use super::Settings;
use crate::output::Output;
use crate::{render, ui, MovieListArg, TvListArg, WindowArg};
use cinescope_api::TimeWindow;
use cinescope_core::{LoadParams, LoadResult, MovieList, PageSource, PagedAdapter, TvList};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Rows shown per section on overview screens
const PREVIEW_ROWS: usize = 10;

impl From<WindowArg> for TimeWindow {
    fn from(window: WindowArg) -> Self {
        match window {
            WindowArg::Day => TimeWindow::Day,
            WindowArg::Week => TimeWindow::Week,
        }
    }
}

fn movie_list(list: MovieListArg, window: WindowArg, for_id: Option<i64>) -> Result<MovieList> {
    let based_on = || for_id.ok_or_else(|| eyre!("The {:?} list needs --for <MOVIE_ID>", list));
    Ok(match list {
        MovieListArg::Popular => MovieList::Popular,
        MovieListArg::TopRated => MovieList::TopRated,
        MovieListArg::NowPlaying => MovieList::NowPlaying,
        MovieListArg::Upcoming => MovieList::Upcoming,
        MovieListArg::Trending => MovieList::Trending(window.into()),
        MovieListArg::Similar => MovieList::Similar(based_on()?),
        MovieListArg::Recommended => MovieList::Recommended(based_on()?),
    })
}

fn tv_list(list: TvListArg) -> TvList {
    match list {
        TvListArg::Popular => TvList::Popular,
        TvListArg::TopRated => TvList::TopRated,
        TvListArg::OnTheAir => TvList::OnTheAir,
        TvListArg::AiringToday => TvList::AiringToday,
    }
}

fn preview<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(PREVIEW_ROWS)]
}

/// Load `pages` pages starting at `first`, following next keys. A failure after
/// at least one page keeps what was loaded and reports the error.
pub(crate) async fn collect_pages<S>(
    adapter: &PagedAdapter<S>,
    first: u32,
    pages: u32,
    output: &Output,
) -> Result<Vec<S::Item>>
where
    S: PageSource,
{
    let label = adapter.source().describe();
    let mut items = Vec::new();
    let mut key = Some(first.max(1));

    for _ in 0..pages.max(1) {
        let Some(page) = key else { break };
        let message = format!("Loading {} (page {})", label, page);
        match ui::loading(&message, output, adapter.load(LoadParams::page(page))).await {
            LoadResult::Page(loaded) => {
                items.extend(loaded.data);
                key = loaded.next_key;
            }
            LoadResult::Error(e) if items.is_empty() => {
                return Err(eyre!("Failed to load {} page {}: {}", label, page, e));
            }
            LoadResult::Error(e) => {
                output.warn(format!("Stopped at page {} of {}: {}", page, label, e));
                break;
            }
        }
    }

    if key.is_none() {
        tracing::debug!(list = %label, "Reached the end of the list");
    }
    Ok(items)
}

pub async fn run_home(settings: &Settings, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let home = app.home();
    ui::loading("Loading home", output, home.load()).await;

    let rows = [
        ("Trending", "trending", &home.trending),
        ("Popular", "popular", &home.popular),
        ("Top rated", "top_rated", &home.top_rated),
        ("Upcoming", "upcoming", &home.upcoming),
        ("Now playing", "now_playing", &home.now_playing),
    ];
    let mut failed = 0;
    for (title, section, slot) in rows {
        output.heading(title);
        let shown = output.state(title, slot.current(), |out, movies| {
            out.table(&render::movies(preview(movies)));
            out.data(section, movies);
        });
        if shown.is_none() {
            failed += 1;
        }
    }

    if failed == rows.len() {
        return Err(eyre!("Could not load any home section"));
    }
    Ok(())
}

pub async fn run_movies(
    settings: &Settings,
    list: MovieListArg,
    window: WindowArg,
    for_id: Option<i64>,
    page: u32,
    pages: u32,
    output: &Output,
) -> Result<()> {
    let list = movie_list(list, window, for_id)?;
    let app = settings.app().await?;
    let adapter = app.repos.movies.paged(list);
    let movies = collect_pages(&adapter, page, pages, output).await?;

    output.heading(&adapter.source().describe());
    output.table(&render::movies(&movies));
    output.data("movies", &movies);
    Ok(())
}

pub async fn run_tv(settings: &Settings, list: TvListArg, page: u32, pages: u32, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let adapter = app.repos.tv.paged(tv_list(list));
    let shows = collect_pages(&adapter, page, pages, output).await?;

    output.heading(&adapter.source().describe());
    output.table(&render::shows(&shows));
    output.data("shows", &shows);
    Ok(())
}

pub async fn run_movie(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let detail = app.movie_detail();
    ui::loading(&format!("Loading movie {}", id), output, detail.load(id)).await;

    let image_base = settings.config.api.image_base_url.as_str();
    let loaded = output.state("Details", detail.details.current(), |out, movie| {
        out.table(&render::movie_detail(movie, image_base));
        out.data("details", movie);
    });
    if loaded.is_none() {
        return Err(eyre!("Could not load movie {}", id));
    }

    if let Some(saved) = detail.in_watch_list.current().success() {
        if output.is_human() {
            let status = if *saved {
                "✓ In your watch list".green().to_string()
            } else {
                "Not in your watch list".bright_black().to_string()
            };
            output.info(status);
        }
        output.data("in_watch_list", saved);
    }

    output.heading("Cast & crew");
    output.state("Cast & crew", detail.credits.current(), |out, credits| {
        out.table(&render::credits(credits));
        out.data("credits", credits);
    });

    output.state("Trailer", detail.videos.current(), |out, videos| match videos.trailer() {
        Some(video) => {
            out.info(format!("Trailer: {}", render::trailer(video)));
            out.data("trailer", video);
        }
        None => out.info("No trailer available"),
    });

    output.heading("Similar movies");
    output.state("Similar movies", detail.similar.current(), |out, movies| {
        out.table(&render::movies(preview(movies)));
        out.data("similar", movies);
    });
    Ok(())
}

pub async fn run_show(settings: &Settings, id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let detail = app.tv_detail();
    ui::loading(&format!("Loading series {}", id), output, detail.load(id)).await;

    let image_base = settings.config.api.image_base_url.as_str();
    let loaded = output.state("Details", detail.details.current(), |out, show| {
        out.table(&render::tv_detail(show, image_base));
        out.data("details", show);
    });
    if loaded.is_none() {
        return Err(eyre!("Could not load series {}", id));
    }

    output.heading("Cast & crew");
    output.state("Cast & crew", detail.credits.current(), |out, credits| {
        out.table(&render::credits(credits));
        out.data("credits", credits);
    });

    if let Some(video) = detail.videos.current().success().and_then(|v| v.trailer().cloned()) {
        output.info(format!("Trailer: {}", render::trailer(&video)));
        output.data("trailer", &video);
    }

    output.heading("Similar series");
    output.state("Similar series", detail.similar.current(), |out, shows| {
        out.table(&render::shows(preview(shows)));
        out.data("similar", shows);
    });
    Ok(())
}

pub async fn run_trailer(settings: &Settings, movie_id: i64, output: &Output) -> Result<()> {
    let app = settings.app().await?;
    let videos = ui::loading("Looking for a trailer", output, app.repos.movies.videos(movie_id))
        .await
        .map_err(|e| eyre!("Failed to load videos for movie {}: {}", movie_id, e))?;

    match videos.trailer() {
        Some(video) => {
            if output.is_human() {
                output.info(render::trailer(video));
            }
            output.data("trailer", &TrailerLink::new(video));
            Ok(())
        }
        None => {
            output.warn(format!("Movie {} has no trailer on YouTube", movie_id));
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct TrailerLink<'a> {
    name: &'a str,
    url: String,
    official: bool,
}

impl<'a> TrailerLink<'a> {
    fn new(video: &'a cinescope_models::Video) -> Self {
        Self {
            name: &video.name,
            url: cinescope_api::youtube_url(&video.key),
            official: video.official,
        }
    }
}
