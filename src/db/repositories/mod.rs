pub mod catalog;
pub mod legacy_user;
pub mod movie;
pub mod user;
pub mod watchlist;
