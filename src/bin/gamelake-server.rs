/// GameLake Dashboard Server
///
/// Standalone server that connects to the remote query engine, loads and
/// caches the games dataset, and serves the dashboard JSON API.

use gamelake::config::LakeConfig;
use gamelake::context::DashboardContext;
use gamelake::server::run_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get host and port from environment or use defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a number");

    // Connection settings: a YAML file if GAMELAKE_CONFIG points at one,
    // otherwise straight from the environment
    let config = match std::env::var("GAMELAKE_CONFIG") {
        Ok(path) => LakeConfig::from_file(&path),
        Err(_) => LakeConfig::from_env(),
    };

    let ctx = config
        .and_then(|config| DashboardContext::connect(&config))
        .unwrap_or_else(|err| {
            eprintln!("Error connecting to the data lake: {}", err);
            if let Some(hint) = &err.hint {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        });

    // Start the server
    run_server(&host, port, ctx).await
}
