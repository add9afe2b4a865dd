/// Why an email string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    Malformed,
}

impl EmailError {
    pub fn user_message(&self) -> &'static str {
        match self {
            EmailError::Empty => "Please enter your email address",
            EmailError::Malformed => "Please enter a valid email address",
        }
    }
}

/// Validates the email shape used across signup flows.
/// Rules:
/// - Trimmed input must be non-empty
/// - One or more non-whitespace/non-@ characters, then `@`, then one or more
///   non-whitespace/non-@ characters, then `.`, then one or more
///   non-whitespace/non-@ characters
pub fn validate_email(raw: &str) -> Result<(), EmailError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(EmailError::Empty);
    }

    let Some((local, rest)) = email.split_once('@') else {
        return Err(EmailError::Malformed);
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return Err(EmailError::Malformed);
    }
    if rest.chars().any(|c| c.is_whitespace() || c == '@') {
        return Err(EmailError::Malformed);
    }

    // Some dot must have at least one character on each side. The segments
    // around it may themselves contain further dots, so "user@example.com."
    // splits as "example" / "com." and is valid.
    let has_split_dot = rest
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < rest.len());
    if !has_split_dot {
        return Err(EmailError::Malformed);
    }

    Ok(())
}

/// Lower-cases and trims an email before it is checked or stored.
/// Duplicate detection is case-insensitive as a result.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
