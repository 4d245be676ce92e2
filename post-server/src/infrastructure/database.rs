use anyhow::{Context, Result};
use mongodb::{Client, Database, bson::doc};
use tracing::info;

use crate::infrastructure::settings::Settings;

pub(crate) async fn connect(settings: &Settings) -> Result<Database> {
    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .context("failed to build MongoDB client")?;
    let database = client.database(&settings.mongodb_database);

    // Fail at startup rather than on the first request.
    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB ping failed")?;

    info!(database = %settings.mongodb_database, "connected to MongoDB");
    Ok(database)
}
