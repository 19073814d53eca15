//! Device-local SQLite store.
//!
//! Holds the legacy account table used by the password-reset screens and a
//! cache of accounts registered from this device. The remote backend stays
//! authoritative for login; nothing here is synced back.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const SEED_EMAIL: &str = "testuser";
pub const SEED_PASSWORD: &str = "123";
pub const SEED_QUESTION: &str = "What is 1 + 1?";
pub const SEED_ANSWER: &str = "2";
pub const HISTORY_LIST_NAME: &str = "Vocab Word History";

const SEED_LIST_NAME: &str = "Created List for testuser";
const SEED_WORD: &str = "serendipity";
const SEED_DEFINITION: &str =
    "The occurrence and development of events by chance in a happy or beneficial way.";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No account registered for '{email}'")]
    NotFound { email: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Account record as stored locally.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LocalUser {
    #[sqlx(rename = "userID")]
    pub id: i64,
    pub email: String,
    #[sqlx(rename = "securityQuestion")]
    pub security_question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LocalWord {
    pub word: String,
    pub definition: String,
}

#[derive(Clone)]
pub struct LocalAuthStore {
    pool: SqlitePool,
}

impl LocalAuthStore {
    /// Open (creating if needed) the database at `path`, migrate and seed.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Database(sqlx::Error::Io(e)))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        store.seed_if_empty().await?;
        tracing::info!(path = %path.display(), "local store ready");
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        let migration_sql = include_str!("../migrations/001_initial.sql");
        sqlx::raw_sql(migration_sql).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert the demo account when the users table is empty.
    async fn seed_if_empty(&self) -> Result<(), StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            tracing::debug!(count, "db: users present, skipping seed");
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query(
            "INSERT INTO users (email, password, securityQuestion, securityAnswer) VALUES (?, ?, ?, ?)",
        )
        .bind(SEED_EMAIL)
        .bind(SEED_PASSWORD)
        .bind(SEED_QUESTION)
        .bind(SEED_ANSWER)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query("INSERT INTO vocabLists (userID, listName) VALUES (?, ?)")
            .bind(user_id)
            .bind(HISTORY_LIST_NAME)
            .execute(&mut *tx)
            .await?;

        let list_id = sqlx::query("INSERT INTO vocabLists (userID, listName) VALUES (?, ?)")
            .bind(user_id)
            .bind(SEED_LIST_NAME)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        sqlx::query("INSERT INTO wordInList (listID, userID, word, definition) VALUES (?, ?, ?, ?)")
            .bind(list_id)
            .bind(user_id)
            .bind(SEED_WORD)
            .bind(SEED_DEFINITION)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(user_id, "db: seeded demo account");
        Ok(())
    }

    pub async fn find_user(&self, email: &str) -> Result<Option<LocalUser>, StoreError> {
        let user = sqlx::query_as::<_, LocalUser>(
            "SELECT userID, email, securityQuestion FROM users WHERE email = ?",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Security question of the account, for the first reset step.
    pub async fn security_question(&self, email: &str) -> Result<String, StoreError> {
        self.find_user(email)
            .await?
            .map(|user| user.security_question)
            .ok_or_else(|| StoreError::NotFound {
                email: email.trim().to_string(),
            })
    }

    /// Compare the answer ignoring surrounding whitespace and case.
    pub async fn verify_security_answer(
        &self,
        email: &str,
        answer: &str,
    ) -> Result<bool, StoreError> {
        let stored: Option<(String,)> =
            sqlx::query_as("SELECT securityAnswer FROM users WHERE email = ?")
                .bind(email.trim())
                .fetch_optional(&self.pool)
                .await?;
        let (expected,) = stored.ok_or_else(|| StoreError::NotFound {
            email: email.trim().to_string(),
        })?;
        let matches = expected.trim().eq_ignore_ascii_case(answer.trim());
        tracing::debug!(email = email.trim(), matches, "db: security answer checked");
        Ok(matches)
    }

    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE email = ?")
            .bind(new_password)
            .bind(email.trim())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                email: email.trim().to_string(),
            });
        }
        tracing::info!(email = email.trim(), "db: password reset");
        Ok(())
    }

    /// Record an account registered against the backend.
    pub async fn remember_user(
        &self,
        email: &str,
        password: &str,
        security_question: &str,
        security_answer: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (email, password, securityQuestion, securityAnswer) VALUES (?, ?, ?, ?) \
             ON CONFLICT(email) DO UPDATE SET password = excluded.password, \
             securityQuestion = excluded.securityQuestion, securityAnswer = excluded.securityAnswer",
        )
        .bind(email.trim())
        .bind(password)
        .bind(security_question)
        .bind(security_answer)
        .execute(&self.pool)
        .await?;
        tracing::debug!(email = email.trim(), "db: account cached");
        Ok(())
    }

    pub async fn list_names(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT listName FROM vocabLists WHERE userID = ? ORDER BY listID")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    pub async fn words(&self, list_name: &str) -> Result<Vec<LocalWord>, StoreError> {
        let words = sqlx::query_as::<_, LocalWord>(
            "SELECT w.word, w.definition FROM wordInList w \
             JOIN vocabLists l ON l.listID = w.listID \
             WHERE l.listName = ? ORDER BY w.wordID",
        )
        .bind(list_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(words)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
