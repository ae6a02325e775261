use anyhow::Context;
use meals_backend::{db, rocket_instance};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = db::init_pool(&database_url)?;

    rocket_instance(pool).launch().await?;
    Ok(())
}
