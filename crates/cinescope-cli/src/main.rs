use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{catalog, clear, config, genre, person, search, watchlist, Settings};

mod commands;
mod logging;
mod output;
mod render;
mod ui;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(about = "CineScope - Browse movies and TV shows and keep a watch list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MovieListArg {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
    Trending,
    /// Movies similar to the one given with --for
    Similar,
    /// Recommendations based on the one given with --for
    Recommended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TvListArg {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the front page: trending, popular, top rated, upcoming and now playing
    Home,
    /// List movies from one of the catalog lists
    Movies {
        #[arg(value_enum)]
        list: MovieListArg,

        /// First page to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Number of pages to load, stopping early at the end of the list
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Time window for the trending list
        #[arg(long, value_enum, default_value = "week")]
        window: WindowArg,

        /// Movie id the similar and recommended lists are based on
        #[arg(long = "for", value_name = "MOVIE_ID")]
        for_id: Option<i64>,
    },
    /// Show details, cast, trailer and similar titles for a movie
    Movie {
        id: i64,
    },
    /// List TV series from one of the catalog lists
    Tv {
        #[arg(value_enum)]
        list: TvListArg,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show details, cast and similar series for a TV show
    Show {
        id: i64,
    },
    /// Search the catalog for movies
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Load this many pages of movie-only results instead of one page of
        /// the mixed search
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// List genres
    Genres {
        /// List TV genres instead of movie genres
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Browse the most popular movies of a genre
    Genre {
        id: u32,

        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show a person and the movies they appeared in
    Person {
        id: i64,
    },
    /// Print the trailer link for a movie
    Trailer {
        movie_id: i64,
    },
    /// Manage the local watch list
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Manage configuration and the API key
    #[command(long_about = "Manage configuration and credentials. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear the watch list or stored credentials
    Clear {
        /// Clear the watch list and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Remove every watch-list entry
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Remove the stored API key
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Do not ask for confirmation
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved titles, newest first
    List,
    /// Save a movie by id
    Add { id: i64 },
    /// Remove a movie by id (no error if it is not saved)
    Remove { id: i64 },
    /// Save a movie if it is not saved yet, remove it otherwise
    Toggle { id: i64 },
    /// Tell whether a movie is saved
    Status { id: i64 },
    /// Fetch fresh details for every saved movie
    Details,
    /// Keep printing the list whenever it changes (Ctrl-C to stop)
    Watch,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the TMDB API key
    SetKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },
    /// Set the response language, e.g. en-US or de-DE
    SetLanguage { language: String },
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let settings = Settings::load()?;
    let log_file = settings.config.logging.to_file.then(|| settings.paths.log_file());
    logging::init_logging(cli.verbose, cli.quiet, &settings.config.logging.level, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Home => catalog::run_home(&settings, &output).await,
        Commands::Movies { list, page, pages, window, for_id } => {
            catalog::run_movies(&settings, list, window, for_id, page, pages, &output).await
        }
        Commands::Movie { id } => catalog::run_movie(&settings, id, &output).await,
        Commands::Tv { list, page, pages } => catalog::run_tv(&settings, list, page, pages, &output).await,
        Commands::Show { id } => catalog::run_show(&settings, id, &output).await,
        Commands::Search { query, pages } => {
            search::run_search(&settings, &query.join(" "), pages, &output).await
        }
        Commands::Genres { tv } => genre::run_genres(&settings, tv, &output).await,
        Commands::Genre { id, pages } => genre::run_genre(&settings, id, pages, &output).await,
        Commands::Person { id } => person::run_person(&settings, id, &output).await,
        Commands::Trailer { movie_id } => catalog::run_trailer(&settings, movie_id, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(&settings, cmd, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(settings, cmd, &output).await
        }
        Commands::Clear { all, watchlist, credentials, yes } => {
            clear::run_clear(&settings, all, watchlist, credentials, yes, &output).await
        }
    }
}
