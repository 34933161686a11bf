//! Table builders for catalog types.

use crate::output::{detail_table, new_table};
use cinescope_api::{image_url, youtube_url, ImageSize};
use cinescope_models::{
    Credits, Genre, Movie, MovieDetail, Person, PersonCastCredit, TvDetail, TvShow, Video,
    WatchListEntry,
};
use comfy_table::{Cell, CellAlignment, Table};

const TOP_BILLED: usize = 10;

fn year(value: Option<u32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn rating(value: f64) -> Cell {
    Cell::new(format!("{:.1}", value)).set_alignment(CellAlignment::Right)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

pub fn movies(list: &[Movie]) -> Table {
    let mut table = new_table(&["ID", "Title", "Year", "Rating"]);
    for movie in list {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(truncate(&movie.title, 48)),
            Cell::new(year(movie.year())),
            rating(movie.vote_average),
        ]);
    }
    table
}

pub fn shows(list: &[TvShow]) -> Table {
    let mut table = new_table(&["ID", "Name", "Year", "Rating"]);
    for show in list {
        table.add_row(vec![
            Cell::new(show.id),
            Cell::new(truncate(&show.name, 48)),
            Cell::new(year(show.year())),
            rating(show.vote_average),
        ]);
    }
    table
}

pub fn genres(list: &[Genre]) -> Table {
    let mut table = new_table(&["ID", "Genre"]);
    for genre in list {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    table
}

pub fn movie_detail(detail: &MovieDetail, image_base_url: &str) -> Table {
    let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    let mut rows = vec![
        ("Title", detail.title.clone()),
        ("Year", year(detail.year())),
        ("Rating", format!("{:.1} ({} votes)", detail.vote_average, detail.vote_count)),
        ("Genres", genres.join(", ")),
    ];
    if let Some(runtime) = detail.runtime_label() {
        rows.push(("Runtime", runtime));
    }
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        rows.push(("Tagline", tagline.to_string()));
    }
    if let Some(overview) = detail.overview.as_deref().filter(|o| !o.is_empty()) {
        rows.push(("Overview", overview.to_string()));
    }
    if let Some(poster) = image_url(image_base_url, ImageSize::W500, detail.poster_path.as_deref()) {
        rows.push(("Poster", poster));
    }
    detail_table("Movie", rows)
}

pub fn tv_detail(detail: &TvDetail, image_base_url: &str) -> Table {
    let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    let networks: Vec<&str> = detail.networks.iter().map(|n| n.name.as_str()).collect();
    let mut rows = vec![
        ("Name", detail.name.clone()),
        ("First aired", year(detail.year())),
        ("Seasons", detail.number_of_seasons.to_string()),
        ("Episodes", detail.number_of_episodes.to_string()),
        ("Rating", format!("{:.1} ({} votes)", detail.vote_average, detail.vote_count)),
        ("Genres", genres.join(", ")),
    ];
    if !networks.is_empty() {
        rows.push(("Networks", networks.join(", ")));
    }
    if let Some(status) = &detail.status {
        rows.push(("Status", status.clone()));
    }
    if let Some(overview) = detail.overview.as_deref().filter(|o| !o.is_empty()) {
        rows.push(("Overview", overview.to_string()));
    }
    if let Some(poster) = image_url(image_base_url, ImageSize::W500, detail.poster_path.as_deref()) {
        rows.push(("Poster", poster));
    }
    detail_table("Series", rows)
}

pub fn credits(credits: &Credits) -> Table {
    let mut table = new_table(&["Name", "Role"]);
    for director in credits.directors() {
        table.add_row(vec![Cell::new(&director.name), Cell::new("Director")]);
    }
    for member in credits.top_billed(TOP_BILLED) {
        table.add_row(vec![
            Cell::new(&member.name),
            Cell::new(member.character.as_deref().unwrap_or("-")),
        ]);
    }
    table
}

pub fn trailer(video: &Video) -> String {
    format!("{} ({})", youtube_url(&video.key), video.name)
}

pub fn person(person: &Person, image_base_url: &str) -> Table {
    let mut rows = vec![("Name", person.name.clone())];
    if let Some(department) = &person.known_for_department {
        rows.push(("Known for", department.clone()));
    }
    if let Some(birthday) = &person.birthday {
        rows.push(("Born", birthday.clone()));
    }
    if let Some(place) = &person.place_of_birth {
        rows.push(("Place of birth", place.clone()));
    }
    if let Some(deathday) = &person.deathday {
        rows.push(("Died", deathday.clone()));
    }
    if let Some(biography) = person.biography.as_deref().filter(|b| !b.is_empty()) {
        rows.push(("Biography", truncate(biography, 600)));
    }
    if let Some(photo) = image_url(image_base_url, ImageSize::W185, person.profile_path.as_deref()) {
        rows.push(("Photo", photo));
    }
    detail_table("Person", rows)
}

pub fn person_credits(credits: &[PersonCastCredit]) -> Table {
    let mut table = new_table(&["ID", "Title", "Character", "Released", "Popularity"]);
    for credit in credits {
        table.add_row(vec![
            Cell::new(credit.id),
            Cell::new(truncate(credit.title.as_deref().unwrap_or("-"), 40)),
            Cell::new(credit.character.as_deref().unwrap_or("-")),
            Cell::new(credit.release_date.as_deref().unwrap_or("-")),
            rating(credit.popularity),
        ]);
    }
    table
}

pub fn watch_list(entries: &[WatchListEntry]) -> Table {
    let mut table = new_table(&["ID", "Title", "Released", "Rating", "Added"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(truncate(&entry.title, 48)),
            Cell::new(if entry.release_date.is_empty() { "-" } else { &entry.release_date }),
            rating(entry.rating),
            Cell::new(entry.added_on.format("%Y-%m-%d %H:%M")),
        ]);
    }
    table
}
