//! Database error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("constraint violation: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("migration step '{step}' failed: {source}")]
    Migration {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// True for the user-correctable conflict class (unique/constraint).
    pub fn is_conflict(&self) -> bool {
        matches!(self, DbError::Conflict(_))
    }
}

/// True only for uniqueness violations (including primary-key collisions).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

/// Map storage errors into the repo error taxonomy: constraint-class
/// failures become [`DbError::Conflict`], everything else passes through.
pub(crate) fn classify(err: sqlx::Error) -> DbError {
    let constraint = matches!(
        &err,
        sqlx::Error::Database(db) if matches!(
            db.kind(),
            sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation
        )
    );
    if constraint {
        DbError::Conflict(err.to_string())
    } else {
        DbError::Sqlx(err)
    }
}
