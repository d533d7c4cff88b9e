use std::sync::Arc;
use std::time::Duration;

use tidemark::{Category, RunOutcome, Tidemark};
use tidemark_mock::{MemoryStore, MockFeed};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let store = MemoryStore::new();
    let tidemark = Tidemark::builder()
        .with_connector(Arc::new(MockFeed::new()))
        .with_store(Arc::new(store.clone()))
        .catalog(MockFeed::catalog())
        .fetch_timeout(Duration::from_secs(30))
        .build()?;

    for attempt in 1..=2 {
        match tidemark.run().await? {
            RunOutcome::Completed(report) => {
                println!("run {attempt}:");
                for category in [Category::Yield, Category::Price, Category::PoolActivity] {
                    let t = report.tally(category);
                    println!(
                        "  {category:<14} entities={} inserted={} duplicates={}",
                        t.entities, t.inserted, t.duplicates
                    );
                }
            }
            RunOutcome::Skipped => println!("run {attempt}: skipped"),
        }
    }

    println!("\nstored rows: {}", store.len().await);
    if let Some(row) = store.rows_of(Category::Price).await.first() {
        println!("first price row: {}", serde_json::to_string(row)?);
    }
    Ok(())
}
