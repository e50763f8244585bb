use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wardwise";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// General-ward bed capacity. Bed inventory is not tracked per ward yet, so
/// occupancy math runs against this fixed count.
pub const GENERAL_WARD_BEDS: u32 = 50;

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "wardwise=info"
}

/// Get the application data directory
/// ~/Wardwise/ on all platforms (user-visible, next to exported reports)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Wardwise")
}

/// Path of the hospital records database
pub fn database_path() -> PathBuf {
    app_data_dir().join("wardwise.db")
}

/// Base URL of the text-generation service, if one is configured.
/// None disables free-text insights; every insight falls back to its
/// fixed deterministic text.
pub fn generation_endpoint() -> Option<String> {
    std::env::var("WARDWISE_GENERATE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Model name sent to the text-generation service.
pub fn generation_model() -> String {
    std::env::var("WARDWISE_GENERATE_MODEL").unwrap_or_else(|_| "medgemma".into())
}
