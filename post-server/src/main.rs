use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::post_repository::PostRepository;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::mongo::post_repository::MongoPostRepository;
use infrastructure::database::connect;
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StorageBackend};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repo: Arc<dyn PostRepository> = match settings.storage_backend {
        StorageBackend::Mongodb => {
            let database = connect(&settings).await?;
            Arc::new(MongoPostRepository::new(&database))
        }
        StorageBackend::Memory => Arc::new(InMemoryPostRepository::new()),
    };

    let post_service = Arc::new(PostService::new(repo));
    let state = AppState::new(post_service);

    server::run_http(&settings, state).await
}
