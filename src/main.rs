mod catalog {
    pub mod countries;
    pub mod scope;
    pub mod states;
}
mod db {
    pub mod selection;
}
mod prelude;
mod render {
    pub mod frame;
}
mod select {
    pub mod reconcile;
    pub mod stats;
}
mod service {
    pub mod render_service;
    pub mod var_service;
}

use catalog::countries::fetch_country_catalog;
use db::selection::SqliteSelectionStore;
use dotenv::dotenv;
use prelude::*;
use service::render_service::run_render_cycle;
use service::var_service::{get_data_dir, get_map_scope, get_selection_edit};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    dotenv().ok();

    let data_dir = get_data_dir().await?;
    let scope = get_map_scope().await?;
    let edit = get_selection_edit().await?;

    let client = reqwest::Client::new();
    let countries = fetch_country_catalog(&client).await?;

    let db_path = format!("{}/travelmap.sqlite", data_dir);
    let store = SqliteSelectionStore::open(Path::new(&db_path)).await?;

    let output = run_render_cycle(&store, &countries, scope, edit).await?;
    println!("{}", serde_json::to_string_pretty(&output.frame)?);
    tracing::info!("{}", output.summary);
    tracing::info!(
        "{} regions persisted under {}.",
        output.visited.len(),
        scope.store_key()
    );

    Ok(())
}
