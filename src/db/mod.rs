use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod admin;
mod common;
mod errors;
mod mess;
pub mod schema;
mod users;

pub use admin::admins::AdminOperations;
pub use admin::dishes::DishOperations;
pub use common::orders::OrderOperations;
pub use common::votes::VoteOperations;
pub use errors::RepositoryError;
pub use mess::menu::MessOperations;
pub use users::notifications::NotificationOperations;
pub use users::user::UserOperations;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RepositoryError::ConnectionPoolError)
}

pub fn run_db_migrations(pool: DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = DbConnection::new(&pool)?;
    let applied = conn.connection().run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        info!("Applied {} database migrations", applied.len());
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &DbPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
