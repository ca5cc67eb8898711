use crate::db::errors::RepositoryError;
use crate::db::{DbConnection, DbPool};
use crate::models::user::User;
use diesel::prelude::*;
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct UserOperations {
    pool: DbPool,
}

impl UserOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_user(&self, search_user_id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user: failed to acquire DB connection for user_id '{}': {}",
                search_user_id, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .find(search_user_id)
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("users: {search_user_id}")),
                other => RepositoryError::DatabaseError(other),
            })
    }

    pub fn get_user_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .filter(email.eq(email_addr))
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_user_by_email: error fetching user with email '{}': {}",
                    email_addr, e
                );
                match e {
                    Error::NotFound => RepositoryError::NotFound(email_addr.to_string()),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    /// Creates or refreshes the local user row for a verified Firebase identity.
    pub fn upsert_firebase_user(
        &self,
        uid: String,
        email_opt: Option<String>,
        display_name_opt: Option<String>,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "upsert_firebase_user: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::users::dsl as u;

        let email_val = email_opt.ok_or_else(|| {
            RepositoryError::ValidationError("Email missing in Firebase token".to_string())
        })?;
        let name_val = display_name_opt
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email_val.clone());

        diesel::insert_into(u::users)
            .values((
                u::firebase_uid.eq(&uid),
                u::email.eq(&email_val),
                u::name.eq(&name_val),
            ))
            .on_conflict(u::firebase_uid)
            .do_update()
            .set((u::email.eq(&email_val), u::name.eq(&name_val)))
            .returning(User::as_returning())
            .get_result::<User>(conn.connection())
            .map_err(|e| {
                error!("upsert_firebase_user: error upserting uid '{}': {}", uid, e);
                RepositoryError::DatabaseError(e)
            })
    }
}
