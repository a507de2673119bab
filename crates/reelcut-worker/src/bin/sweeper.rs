//! Cleanup sweeper binary.

use tracing::{error, info};

use reelcut_media::StorageLayout;
use reelcut_store::JobStore;
use reelcut_worker::{init_tracing, Sweeper, SweeperConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SweeperConfig::from_env();
    info!("Starting reelcut-sweeper");

    let pool = match reelcut_store::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to the job store");
            std::process::exit(1);
        }
    };
    if let Err(e) = reelcut_store::ensure_schema(&pool).await {
        error!(error = %e, "Schema bootstrap failed");
        std::process::exit(1);
    }

    let layout = StorageLayout::new(&config.storage_root);
    let sweeper = Sweeper::new(JobStore::new(pool), layout, config);

    if let Err(e) = sweeper.run().await {
        error!(error = %e, "Sweeper terminated");
        std::process::exit(1);
    }
}
