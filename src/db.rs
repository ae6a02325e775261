// meals_backend/src/db.rs
use anyhow::Context;
use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use rocket::fairing::AdHoc;

// an R2D2 connection pool
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Initialize the database pool for the given URL.
///
/// The URL is supplied by the caller (main reads `DATABASE_URL` from the
/// environment) so the pool can be constructed against any database in tests.
pub fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder()
        .build(manager)
        .context("failed to create database pool")
}

/// Run any pending embedded migrations.
pub fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    let mut conn = pool
        .get()
        .context("failed to get a connection for migrations")?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;
    Ok(())
}

// Fairing for attaching the pool to Rocket's managed state.
// Migrations run at ignition so the schema always matches the binary.
pub fn stage(pool: PgPool) -> AdHoc {
    AdHoc::try_on_ignite("Diesel PostgreSQL Pool", |rocket| async move {
        if let Err(e) = run_migrations(&pool) {
            eprintln!("database migration failed: {e:#}");
            return Err(rocket);
        }
        Ok(rocket.manage(pool))
    })
}
