//! Screen state controllers.
//!
//! A controller owns the [`Slot`]s one screen renders, runs repository calls
//! and publishes each outcome as Loading, Success or Error. Underlying errors
//! are logged; views only ever see one of the fixed messages below.

mod batch;
mod genre;
mod home;
mod movie_detail;
mod person;
mod search;
mod tv_detail;
mod watch_list;

pub use batch::{DetailBatch, DetailBatchController};
pub use genre::GenreController;
pub use home::HomeController;
pub use movie_detail::MovieDetailController;
pub use person::PersonController;
pub use search::SearchController;
pub use tv_detail::TvDetailController;
pub use watch_list::WatchListController;

use crate::state::{Slot, UiState};
use std::fmt::Display;
use thiserror::Error;
use tracing::warn;

pub const MOVIES_UNAVAILABLE: &str = "Couldn't load movies. Check your connection and try again.";
pub const SHOWS_UNAVAILABLE: &str = "Couldn't load TV shows. Check your connection and try again.";
pub const DETAILS_UNAVAILABLE: &str = "Couldn't load details for this title.";
pub const CREDITS_UNAVAILABLE: &str = "Couldn't load the cast and crew.";
pub const VIDEOS_UNAVAILABLE: &str = "Couldn't load trailers.";
pub const GENRES_UNAVAILABLE: &str = "Couldn't load genres.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const PERSON_UNAVAILABLE: &str = "Couldn't load this person.";
pub const WATCH_LIST_UNAVAILABLE: &str = "Couldn't read your watch list.";
pub const WATCH_LIST_UPDATE_FAILED: &str = "Couldn't update your watch list.";

/// Failure surfaced to a view by a controller command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UserMessage(pub &'static str);

/// Log `error` and hand back the fixed message for it
pub(crate) fn user_message(what: &str, error: impl Display, message: &'static str) -> UserMessage {
    warn!(what, "{}: {}", message, error);
    UserMessage(message)
}

/// Publish a result on `slot`, replacing any error with `message`
pub(crate) fn publish<T: Clone, E: Display>(
    slot: &Slot<T>,
    what: &str,
    result: Result<T, E>,
    message: &'static str,
) {
    match result {
        Ok(value) => slot.set(UiState::Success(value)),
        Err(e) => {
            let UserMessage(message) = user_message(what, e, message);
            slot.set(UiState::Error(message.to_string()));
        }
    }
}
