pub mod credits;
pub mod media;
pub mod movie;
pub mod paged;
pub mod person;
pub mod search;
pub mod tv;
pub mod video;
pub mod watch_list;

pub use credits::{CastMember, Credits, CrewMember};
pub use media::{Genre, GenreList, MediaType};
pub use movie::{Movie, MovieDetail, ProductionCompany, SpokenLanguage};
pub use paged::Paged;
pub use person::{Person, PersonCastCredit, PersonCredits};
pub use search::MultiSearchResult;
pub use tv::{Creator, Network, SeasonSummary, TvDetail, TvShow};
pub use video::{Video, Videos};
pub use watch_list::WatchListEntry;
