use crate::auth::password::{hash_password, verify_password};
use crate::db::errors::RepositoryError;
use crate::db::schema::admins::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::admin::Admin;
use diesel::prelude::*;
use log::error;

#[derive(Clone)]
pub struct AdminOperations {
    pool: DbPool,
    pepper: String,
}

impl AdminOperations {
    pub fn new(pool: DbPool, pepper: String) -> Self {
        Self { pool, pepper }
    }

    /// Inserts the admin only if the id is not taken yet. Returns whether a row was written.
    pub fn seed_admin(&self, new_admin_id: &str, password: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("seed_admin: failed to acquire DB connection: {}", e);
            e
        })?;

        let hashed = hash_password(new_admin_id, password, &self.pepper);
        let inserted = diesel::insert_into(admins)
            .values((admin_id.eq(new_admin_id), password_hash.eq(&hashed)))
            .on_conflict(admin_id)
            .do_nothing()
            .execute(conn.connection())
            .map_err(|e| {
                error!("seed_admin: error inserting admin '{}': {}", new_admin_id, e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(inserted > 0)
    }

    /// `Ok(false)` for an unknown admin or a wrong password.
    pub fn verify_login(&self, login_id: &str, password: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("verify_login: failed to acquire DB connection: {}", e);
            e
        })?;

        let found = admins
            .find(login_id)
            .select(Admin::as_select())
            .first::<Admin>(conn.connection())
            .optional()
            .map_err(|e| {
                error!("verify_login: error fetching admin '{}': {}", login_id, e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(match found {
            Some(admin) => verify_password(login_id, password, &self.pepper, &admin.password_hash),
            None => false,
        })
    }

    pub fn admin_exists(&self, search_admin_id: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;
        let count: i64 = admins
            .filter(admin_id.eq(search_admin_id))
            .count()
            .get_result(conn.connection())?;
        Ok(count > 0)
    }
}
