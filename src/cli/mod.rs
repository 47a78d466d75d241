//! Command-line interface for the movie tracker.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Tracker - catalog of movies, genres and actors with per-user watchlists
#[derive(Parser)]
#[command(name = "movie-tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Apply pending database migrations and exit
    Migrate,

    /// Add a genre by name (no-op if it already exists)
    AddGenre {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Add an actor by name (no-op if it already exists)
    AddActor {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Show a movie with its genres and actors
    #[command(alias = "i")]
    Info {
        /// Movie ID
        id: String,
    },
}

pub use commands::*;
