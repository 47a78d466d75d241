pub use super::actor::Entity as Actor;
pub use super::genre::Entity as Genre;
pub use super::legacy_users::Entity as LegacyUsers;
pub use super::movie::Entity as Movie;
pub use super::movie_actor::Entity as MovieActor;
pub use super::movie_genre::Entity as MovieGenre;
pub use super::user_watchlist::Entity as UserWatchlist;
pub use super::users::Entity as Users;
