pub mod queries;
pub mod transfer;

use sqlx::sqlite::SqlitePool;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use crate::configuration::DatabaseSettings;

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    settings.connect().await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
