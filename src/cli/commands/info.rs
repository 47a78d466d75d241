use crate::config::Config;
use crate::db::Store;

pub async fn cmd_movie_info(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let Ok(id) = id_str.parse::<i32>() else {
        println!("Invalid movie ID: {id_str}");
        return Ok(());
    };

    let store = Store::new(&config.general.database_path).await?;

    let Some(record) = store.get_movie(id).await? else {
        println!("Movie with ID {id} not found.");
        return Ok(());
    };

    let movie = &record.movie;

    println!("Movie Info");
    println!("{:-<60}", "");
    println!("Title:      {}", movie.localized_title);
    if movie.original_title != movie.localized_title {
        println!("Original:   {}", movie.original_title);
    }
    println!("ID:         {}", movie.id);
    println!("Released:   {}", movie.release_date);
    println!("Language:   {}", movie.original_language);
    println!(
        "External:   TMDB {} | IMDb {} | Kinopoisk {}",
        movie.tmdb_id, movie.imdb_id, movie.kinopoisk_id
    );

    let genres: Vec<&str> = record.genres.iter().map(|g| g.name.as_str()).collect();
    let actors: Vec<&str> = record.actors.iter().map(|a| a.name.as_str()).collect();

    println!(
        "Genres:     {}",
        if genres.is_empty() { "-".to_string() } else { genres.join(", ") }
    );
    println!(
        "Cast:       {}",
        if actors.is_empty() { "-".to_string() } else { actors.join(", ") }
    );

    if !movie.overview.is_empty() {
        println!();
        println!("{}", movie.overview);
    }

    Ok(())
}
