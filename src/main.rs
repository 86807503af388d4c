use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hitech_homes::{
    AppConfig, FileTokenStore, FilterSpec, HttpEstateApi, PropertyRepository, SessionStore,
    FEATURED_LIMIT,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(api = %config.api_base_url, "Hi-Tech Homes catalog");

    let api = Arc::new(HttpEstateApi::new(&config)?);
    let session = SessionStore::new(api.clone(), Box::new(FileTokenStore::new(&config.token_path)));
    let catalog = PropertyRepository::new(api);

    if session.is_authenticated() {
        info!("restored admin session from persisted token");
    }

    catalog.fetch_all().await?;
    let items = catalog.items();
    info!(count = items.len(), "catalog loaded");

    println!("Featured listings:");
    for (i, property) in catalog.featured(FEATURED_LIMIT).iter().enumerate() {
        println!(
            "{}. {} ({} BHK, ₹{}) - {}",
            i + 1,
            property.title,
            property.bhk,
            property.price,
            property.city
        );
    }

    // Optional search term from the command line.
    if let Some(term) = std::env::args().nth(1) {
        let spec = FilterSpec {
            search_text: term.clone(),
            ..Default::default()
        };
        let matches = catalog.filtered(&spec);
        println!("\n{} listings matching \"{}\":", matches.len(), term);
        for property in &matches {
            println!("- {} ({}, {})", property.title, property.address, property.city);
        }
    }

    Ok(())
}
