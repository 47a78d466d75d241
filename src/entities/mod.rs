pub mod prelude;

pub mod actor;
pub mod genre;
pub mod legacy_users;
pub mod movie;
pub mod movie_actor;
pub mod movie_genre;
pub mod user_watchlist;
pub mod users;
