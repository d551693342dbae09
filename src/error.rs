use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading the tables or deriving dashboard data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),

    #[error("No dated songs for artist: {0}")]
    NoDatedSongs(String),

    #[error("Failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Description lookup failed: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, Error>;
