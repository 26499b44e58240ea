use std::sync::Arc;

use anyhow::Context;
use tokio::sync::oneshot;
use wallet_api::{
    config::Config,
    db::Database,
    logging::init_logging,
    server::Server,
    wallet::{controller::WalletController, repo::WalletStore, service::WalletService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = Database::new_pool(&config)
        .await
        .context("Failed to create DB pool")?;
    Database::ensure_schema(&pool)
        .await
        .context("Failed to prepare user_wallet table")?;
    tracing::info!(host = %config.db_host, db = %config.db_name, "database ready");

    let store: Arc<dyn WalletStore> = Arc::new(pool);
    let controller = Arc::new(WalletController::new(WalletService::new(store)));
    let server = Server::new(config.server_addr.clone(), controller);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    server.start(shutdown_rx).await
}
