use crate::config::QhatuConfig;
use crate::database::CatalogRepository;
use crate::database::sqlite::SqliteRepository;
use crate::services::tag_sync::TagSyncService;
use axum::Router;
use dotenv;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

pub mod config;
mod database;
mod domain;
mod error;
mod features;
mod services;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CatalogRepository>,
    pub tag_sync: Arc<TagSyncService>,
    pub config: Arc<QhatuConfig>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();

    // load centralized config
    let config = QhatuConfig::from_env();
    let shared_config = Arc::new(config.clone());

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        println!(
            "Unable to connect to database at {}, creating...",
            config.database_url
        );
        match Sqlite::create_database(&config.database_url).await {
            Ok(_) => println!("Successfully created database at {}.", &config.database_url),
            Err(e) => panic!(
                "Unable to create database at {}. Error details: {}",
                &config.database_url, e
            ),
        };
    }

    // connect to our db
    // sqlx turns PRAGMA foreign_keys on by default; keep it off so deletes
    // may orphan referencing rows instead of failing
    let connect_options = match SqliteConnectOptions::from_str(&config.database_url) {
        Ok(options) => options.foreign_keys(false),
        Err(e) => {
            panic!("Invalid DATABASE_URL {}: {}", config.database_url, e);
        }
    };

    let pool = match SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            panic!("Failed to create pool on {}: {}", config.database_url, e);
        }
    };

    // run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations.");

    let repo: Arc<dyn CatalogRepository> = Arc::new(SqliteRepository::new(pool));

    let app_state = AppState {
        repo: repo.clone(),
        tag_sync: Arc::new(TagSyncService::new(repo)),
        config: shared_config.clone(),
    };

    println!("Starting server...");

    // api router, where features are composed
    let api_router = Router::new()
        .nest("/categories", features::categories::categories_router())
        .nest("/products", features::products::products_router())
        .nest("/tags", features::tags::tags_router());

    let app = Router::new().nest("/api", api_router).with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&shared_config.bind_addr).await?;
    println!("Server listening on http://{}", shared_config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
