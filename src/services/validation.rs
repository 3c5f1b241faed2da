use super::user_service::UserError;

const MAX_LENGTH: usize = 180;

pub fn validate_username(username: &str) -> Result<&str, UserError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(UserError::Validation("Username cannot be empty".to_string()));
    }

    if trimmed.chars().count() < 2 {
        return Err(UserError::Validation(
            "Username must be at least 2 characters".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_LENGTH {
        return Err(UserError::Validation(format!(
            "Username must be {MAX_LENGTH} characters or less"
        )));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(UserError::Validation(
            "Username cannot contain whitespace".to_string(),
        ));
    }

    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, UserError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(UserError::Validation("Email cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_LENGTH {
        return Err(UserError::Validation(format!(
            "Email must be {MAX_LENGTH} characters or less"
        )));
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(UserError::Validation(format!("Invalid email: {trimmed}")));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(UserError::Validation(format!("Invalid email: {trimmed}")));
    }

    Ok(trimmed)
}

pub fn validate_client_name(name: &str) -> Result<&str, UserError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(UserError::Validation("Client name cannot be empty".to_string()));
    }
    Ok(trimmed)
}

pub fn validate_role(role: &str) -> Result<&str, UserError> {
    let trimmed = role.trim();
    if !trimmed
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
        || trimmed.len() == 5
    {
        return Err(UserError::Validation(format!(
            "Invalid role '{trimmed}': roles must start with ROLE_"
        )));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(UserError::Validation(format!(
            "Invalid role '{trimmed}': only letters, digits and underscores are allowed"
        )));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("  alice ").unwrap(), "alice");
        assert!(validate_username("bob_42").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("a").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("a".repeat(181).as_str()).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_role() {
        assert_eq!(validate_role("ROLE_SUPER_ADMIN").unwrap(), "ROLE_SUPER_ADMIN");
        assert!(validate_role("role_editor").is_ok());
        assert!(validate_role("ROLE_").is_err());
        assert!(validate_role("ADMIN").is_err());
        assert!(validate_role("ROLE_BAD-NAME").is_err());
    }

    #[test]
    fn test_validate_client_name() {
        assert_eq!(validate_client_name(" Android ").unwrap(), "Android");
        assert!(validate_client_name("   ").is_err());
    }
}
