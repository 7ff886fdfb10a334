//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, PasswordHash, User, UserId, UserValidationError, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_unique_constraint,
};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

pub(crate) const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map a failed write, naming the identity the unique index rejected.
fn map_write_error(error: DieselError, user: &User) -> UserPersistenceError {
    match violated_unique_constraint(&error) {
        Some(USERNAME_UNIQUE_CONSTRAINT) => {
            UserPersistenceError::duplicate_username(user.username.as_ref())
        }
        Some(EMAIL_UNIQUE_CONSTRAINT) => UserPersistenceError::duplicate_email(user.email.as_ref()),
        _ => map_diesel_error(error),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    Ok(User {
        id: UserId::from_uuid(row.id),
        username: Username::new(&row.username).map_err(invalid)?,
        email: Email::new(&row.email).map_err(invalid)?,
        password_hash: PasswordHash::new(row.password_hash),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let identifier = identifier.trim();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(
                users::username
                    .eq(identifier)
                    .or(users::email.eq(identifier)),
            )
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, user))
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserUpdate {
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
            updated_at: user.updated_at,
        };

        let updated = diesel::update(users::table.filter(users::id.eq(*user.id.as_uuid())))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user))?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(*id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
