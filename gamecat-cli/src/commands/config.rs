use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::CatalogConfig;

fn mask_value(s: &str) -> String {
    if s.len() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", &s[..2])
    }
}

fn log_path(label: &str, path: &Path) {
    let state = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  {:<12} {} {}",
        label,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        state,
    );
}

/// Where a token value comes from.
fn token_source(env_var: &str, from_file: Option<&String>) -> &'static str {
    if std::env::var(env_var).is_ok_and(|v| !v.is_empty()) {
        "env"
    } else if from_file.is_some_and(|v| !v.is_empty()) {
        "config file"
    } else {
        "missing"
    }
}

/// Show the effective configuration.
pub(crate) fn run_config_show(path: &Path, config: &CatalogConfig) {
    log::info!(
        "{}",
        "gamecat Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log_path("Config file:", path);
    log_path("Sheet:", &config.paths.sheet);
    log_path("Database:", &config.paths.database);
    log_path("SQL dir:", &config.paths.sql_dir);
    log_path("Work dir:", &config.paths.work_dir);
    crate::log_blank();

    let tokens = [
        (
            "steam_key",
            config.tokens.steam_key().map(|v| mask_value(&v)),
            token_source("GAMECAT_STEAM_KEY", config.tokens.steam_key.as_ref()),
        ),
        (
            "steam_id",
            config.tokens.steam_id(),
            token_source("GAMECAT_STEAM_ID", config.tokens.steam_id.as_ref()),
        ),
    ];
    for (name, value, source) in tokens {
        match value {
            Some(v) => log::info!(
                "  {:<12} {} ({})",
                name,
                v,
                source.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {:<12} {}",
                name,
                "not set".if_supports_color(Stdout, |t| t.red()),
            ),
        }
    }
    crate::log_blank();

    log::info!("  Statuses:  {}", config.status_names().join(", "));
    log::info!("  Platforms: {}", config.platform_names().join(", "));
    log::info!(
        "  Request delay: {}s, test-mode limit: {} rows",
        config.sync.request_delay_secs,
        config.sync.test_mode_limit,
    );
}

/// Print the config file path.
pub(crate) fn run_config_path(path: &Path) {
    println!("{}", path.display());
}
