use super::ApiError;
use crate::domain::MovieId;

pub fn validate_movie_id(id: i32) -> Result<MovieId, ApiError> {
    validate_id("movie", id).map(MovieId::new)
}

pub fn validate_id(kind: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {kind} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

/// Genre and actor names: non-blank, kept exactly as sent.
pub fn validate_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation(format!("{kind} name cannot be empty")));
    }

    if name.chars().count() > 255 {
        return Err(ApiError::validation(format!(
            "{kind} name must be 255 characters or less"
        )));
    }

    Ok(name)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        && !email.chars().any(char::is_whitespace);

    if !valid {
        return Err(ApiError::validation("value is not a valid email address"));
    }
    Ok(email)
}

pub fn validate_password(password: &str, min_length: usize) -> Result<&str, ApiError> {
    if password.chars().count() < min_length {
        return Err(ApiError::validation(format!(
            "Password should be at least {min_length} characters"
        )));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert_eq!(validate_movie_id(1).unwrap().value(), 1);
        assert!(validate_movie_id(12345).is_ok());
        assert!(validate_movie_id(0).is_err());
        assert!(validate_movie_id(-1).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Genre", "Sci-Fi").unwrap(), "Sci-Fi");
        assert_eq!(validate_name("Genre", " Noir ").unwrap(), " Noir ");
        assert!(validate_name("Genre", "").is_err());
        assert!(validate_name("Actor", "   ").is_err());
        assert!(validate_name("Actor", &"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user name@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678", 8).is_ok());
        assert!(validate_password("1234567", 8).is_err());
    }
}
