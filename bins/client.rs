use dotenvy::dotenv;
use tracing::{error, info};

/// The terminal UI owns stdout, so logs go to a file.
fn init_logging() {
    dotenv().ok();
    let path = std::env::var("WORKLOG_CLIENT_LOG").unwrap_or_else(|_| "worklog-client.log".to_string());
    if let Err(e) = common::utils::logging::init_logging_to_file(&path) {
        eprintln!("cannot open log file {path}: {e}");
    }
    info!(service = "worklog-client", event = "logger_init", log_file = %path, "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            error!(service = "worklog-client", event = "config_failed", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let api = match client::EmployeeApi::new(&cfg.client) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("cannot build HTTP client: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match client::app::run(api).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "worklog-client", event = "run_failed", error = %e, "client loop failed");
            eprintln!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
