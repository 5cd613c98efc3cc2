#[derive(Debug)]
pub enum RecipeRepositoryError {
    EmailAlreadyExists,
    TokenAlreadyExists,
    InvalidReference,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for RecipeRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeRepositoryError::EmailAlreadyExists => write!(f, "email already exists"),
            RecipeRepositoryError::TokenAlreadyExists => write!(f, "token already exists"),
            RecipeRepositoryError::InvalidReference => write!(f, "referenced row does not exist"),
            RecipeRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RecipeRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecipeRepositoryError::EmailAlreadyExists => None,
            RecipeRepositoryError::TokenAlreadyExists => None,
            RecipeRepositoryError::InvalidReference => None,
            RecipeRepositoryError::Sqlx(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for RecipeRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = msg_lower.get(start..)?;
    let end = rest.find('\'')?;
    rest.get(..end).map(str::to_string)
}

pub fn map_sqlx_error(err: sqlx::Error) -> RecipeRepositoryError {
    const USER_EMAIL_UNIQUE: &str = "user_email_unique";
    const USER_TOKEN_UNIQUE: &str = "user_token_unique";

    if let sqlx::Error::Database(db_err) = &err {
        let msg = db_err.message().to_lowercase();
        let integrity_violation = db_err.code().as_deref() == Some("23000");

        // "Duplicate entry 'a@b.c' for key 'users.user_email_unique'"
        if integrity_violation && msg.contains("duplicate entry") && msg.contains("for key") {
            let key = extract_mysql_key_name(&msg).unwrap_or_default();

            if key.ends_with(USER_EMAIL_UNIQUE) || msg.contains(USER_EMAIL_UNIQUE) {
                return RecipeRepositoryError::EmailAlreadyExists;
            }

            if key.ends_with(USER_TOKEN_UNIQUE) || msg.contains(USER_TOKEN_UNIQUE) {
                return RecipeRepositoryError::TokenAlreadyExists;
            }
        }

        // "Cannot add or update a child row: a foreign key constraint fails (...)"
        if integrity_violation && msg.contains("foreign key constraint fails") {
            return RecipeRepositoryError::InvalidReference;
        }
    }

    RecipeRepositoryError::Sqlx(err)
}
