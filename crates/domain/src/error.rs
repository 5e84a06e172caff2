//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CitasError`]
//! via `From`. Adapters decide how each variant is rendered to their callers.

/// Top-level error returned by every service operation.
#[derive(Debug, thiserror::Error)]
pub enum CitasError {
    /// Malformed or missing input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness rule was violated.
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),

    /// No record matched the requested key.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Credentials did not match.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// A collaborator (database, password hasher) failed.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CitasError {
    /// Wrap any collaborator error as [`CitasError::Internal`].
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(err))
    }
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("appointment must be scheduled in the future")]
    PastSchedule,

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid timestamp, expected RFC 3339")]
    InvalidTimestamp,

    #[error("malformed request body")]
    MalformedBody,
}

/// Uniqueness violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DuplicateError {
    #[error("email is already registered")]
    Email,
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"User"`, `"Appointment"`).
    pub entity: &'static str,
    /// Key used for the lookup.
    pub id: String,
}

/// Credential check failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("incorrect password")]
    WrongPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_list_missing_fields_in_message() {
        let err = ValidationError::MissingFields(vec!["name", "role"]);
        assert_eq!(err.to_string(), "missing required fields: name, role");
    }

    #[test]
    fn should_not_leak_id_in_not_found_message() {
        let err: CitasError = NotFoundError {
            entity: "User",
            id: "juan@example.com".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn should_hide_source_details_in_internal_message() {
        let io = std::io::Error::other("connection refused on 10.0.0.3");
        let err = CitasError::internal(io);
        assert_eq!(err.to_string(), "internal error");
        assert!(std::error::Error::source(&err).is_some());
    }
}
