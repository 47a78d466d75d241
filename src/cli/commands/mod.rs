mod catalog;
mod info;
mod migrate;

pub use catalog::{cmd_add_actor, cmd_add_genre};
pub use info::cmd_movie_info;
pub use migrate::cmd_migrate;
