pub mod advisor;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod diet;
pub mod logging;
pub mod models;
pub mod mood;
pub mod posts;
pub mod profile;
pub mod progress;
pub mod session;
pub mod streak;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use models::{Mood, Post, ProgressEntry};
pub use session::Session;
pub use utils::Profile;
