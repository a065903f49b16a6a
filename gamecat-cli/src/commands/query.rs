use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamecat_catalog::CatalogConfig;
use gamecat_catalog::dates::format_hours;
use gamecat_db::{CatalogQueryRepository, SpendTimeMode};

use crate::CliError;

/// Open the repository, or `None` when no database has been built yet.
fn open_repository(config: &CatalogConfig) -> Result<Option<CatalogQueryRepository>, CliError> {
    if !config.paths.database.exists() {
        log::warn!(
            "No catalog database found at {}",
            config.paths.database.display()
        );
        log::info!("Run 'gamecat rebuild' first.");
        return Ok(None);
    }
    Ok(Some(CatalogQueryRepository::new(
        &config.paths.database,
        &config.paths.sql_dir,
    )?))
}

/// Reject platform names the vocabulary does not define.
fn check_platform(config: &CatalogConfig, platform: &str) -> Result<(), CliError> {
    if config.platform_names().contains(&platform) {
        return Ok(());
    }
    Err(CliError::unknown_platform(format!(
        "'{}' (known: {})",
        platform,
        config.platform_names().join(", ")
    )))
}

fn hours_text(hours: Option<f64>) -> String {
    hours.map(format_hours).unwrap_or_else(|| "n/a".to_string())
}

/// Search games by name.
pub(crate) fn run_query_game(config: &CatalogConfig, term: &str) -> Result<(), CliError> {
    let Some(repo) = open_repository(config)? else {
        return Ok(());
    };
    let games = repo.query_game(term)?;
    if games.is_empty() {
        log::info!("No games match '{}'", term);
        return Ok(());
    }

    for (i, game) in games.iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        log::info!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Status:        {}", game.status);
        log::info!("  Platforms:     {}", game.platforms);
        log::info!("  Release date:  {}", game.release_date);
        log::info!("  Press score:   {}", game.press_score);
        log::info!("  User score:    {}", game.user_score);
        log::info!("  My score:      {}", game.my_score);
        log::info!("  Average time:  {}", game.average_time_beat);
        log::info!("  My time:       {}", game.my_time_beat);
        log::info!("  Extra time:    {}", game.additional_time);
        log::info!("  Last launched: {}", game.last_launch_date);
        log::info!(
            "  Metacritic:    {}",
            game.metacritic_url.if_supports_color(Stdout, |t| t.cyan())
        );
        log::info!(
            "  Trailer:       {}",
            game.trailer_url.if_supports_color(Stdout, |t| t.cyan())
        );
    }
    Ok(())
}

/// Not-started games on a platform.
pub(crate) fn run_query_list(
    config: &CatalogConfig,
    platform: &str,
    offset: u32,
    limit: u32,
) -> Result<(), CliError> {
    check_platform(config, platform)?;
    let Some(repo) = open_repository(config)? else {
        return Ok(());
    };
    let games = repo.next_game_list(offset, limit, platform)?;
    if games.is_empty() {
        log::info!("No unplayed games on {}", platform);
        return Ok(());
    }

    log::info!(
        "{}",
        format!("Next games on {}", platform).if_supports_color(Stdout, |t| t.bold()),
    );
    for (i, game) in games.iter().enumerate() {
        log::info!(
            "  {:>3}. {} (press {}, {} h)",
            offset as usize + i + 1,
            game.name,
            game.press_score,
            game.average_time_beat,
        );
    }
    Ok(())
}

/// Completed-game count and play time.
pub(crate) fn run_query_stats(config: &CatalogConfig, platform: &str, all: bool) -> Result<(), CliError> {
    check_platform(config, platform)?;
    let Some(repo) = open_repository(config)? else {
        return Ok(());
    };
    let mode = if all {
        SpendTimeMode::All
    } else {
        SpendTimeMode::Completed
    };
    let completed = repo.count_complete_games(platform)?;
    let time = repo.count_spend_time(platform, mode)?;

    log::info!(
        "{}",
        format!("{} statistics", platform).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Completed games: {:>8}", completed);
    log::info!("  Expected time:   {}", hours_text(time.expected));
    log::info!("  Real time:       {}", hours_text(time.real));
    Ok(())
}

/// Platform names known to the database.
pub(crate) fn run_query_platforms(config: &CatalogConfig) -> Result<(), CliError> {
    let Some(repo) = open_repository(config)? else {
        return Ok(());
    };
    for name in repo.platforms()? {
        log::info!("  {}", name);
    }
    Ok(())
}
