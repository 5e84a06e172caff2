//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use citas_app::ports::UserRepository;
use citas_domain::error::{CitasError, DuplicateError};
use citas_domain::id::UserId;
use citas_domain::time;
use citas_domain::user::{PasswordHash, User};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let password_hash: String = row.try_get("password_hash")?;
        let role: String = row.try_get("role")?;
        let created_at: String = row.try_get("created_at")?;

        let id = UserId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at =
            time::parse_rfc3339(&created_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(User {
            id,
            name,
            email,
            password_hash: PasswordHash::new(password_hash),
            role,
            created_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (id, name, email, password_hash, role, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const COUNT: &str = "SELECT COUNT(*) FROM users";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.password_hash.as_str())
                .bind(&user.role)
                .bind(user.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(|err| match err {
                    sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                        CitasError::from(DuplicateError::Email)
                    }
                    other => StorageError::from(other).into(),
                })?;

            Ok(user)
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, CitasError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_owned();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn count(&self) -> impl Future<Output = Result<usize, CitasError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(count).map_err(StorageError::from)?)
        }
    }
}
