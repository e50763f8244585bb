use tracing_subscriber::EnvFilter;

use wardwise::analytics::report::assemble_analytics_report;
use wardwise::dashboard::get_dashboard_data;
use wardwise::insights::InsightService;
use wardwise::{config, db};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = run() {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(config::app_data_dir())?;
    let conn = db::open_database(&config::database_path())?;
    let insights = InsightService::from_config();

    let dashboard = get_dashboard_data(&conn)?;
    let analytics = assemble_analytics_report(&conn, Some(&insights));

    let output = serde_json::json!({
        "dashboard": dashboard,
        "analytics": analytics,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
