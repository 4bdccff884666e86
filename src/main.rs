use std::process::ExitCode;

use contactd::app;
use contactd::config::Config;
use contactd::store::MemoryDatabase;
use contactd::Server;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let db = MemoryDatabase::new(config.db_name.clone());
    let app = app::build_app(app::state_from_config(&config, &db));

    if let Err(e) = Server::bind(config.addr()).serve(app).await {
        error!(addr = %config.addr(), "server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
