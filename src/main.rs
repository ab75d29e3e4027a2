use std::path::PathBuf;
use std::rc::Rc;

use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

use vidstream::config::Config;
use vidstream::server::listener;
use vidstream::session::ServerState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.server.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    cfg.validate()?;

    let server = Rc::new(ServerState::from_config(&cfg));
    tracing::info!(
        document_root = server.document_root(),
        "Video server starting"
    );

    let local = LocalSet::new();
    local
        .run_until(async {
            tokio::select! {
                res = listener::run(&cfg, server) => {
                    res?;
                }

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received");
                }
            }

            Ok::<(), anyhow::Error>(())
        })
        .await
}
