//! mbp-sync
//!
//! Refreshes every team-year listed in the config file from captured
//! scraper output. The config path comes from `MBP_CONFIG`, falling back to
//! `data/config.toml`.

use std::path::PathBuf;

use mbp::{
    error::{AppError, Result},
    models::Config,
    parsers::season_label,
    pipeline::SeasonCache,
    services::ReplayScraper,
    storage::LocalStore,
};

const DEFAULT_CONFIG: &str = "data/config.toml";

/// Initialize logging with `level` unless `RUST_LOG` says otherwise.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var_os("MBP_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    // The log level lives in the config, so read it before the logger exists.
    let loaded = Config::load(&config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config.logging.level);

    match &loaded {
        Ok(_) => log::info!("Loaded configuration from {}", config_path.display()),
        Err(e) => log::warn!(
            "Failed to load config from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    if config.teams.is_empty() {
        log::warn!("No teams configured; nothing to do");
        return Ok(());
    }

    let store = LocalStore::new(&config.paths.seasons_dir);
    let scraper = ReplayScraper::new(&config.paths.capture_dir);
    let cache = SeasonCache::with_config(&store, &scraper, config.cache.clone());
    let today = chrono::Local::now().date_naive();

    let mut fetched = 0;
    let mut failed = 0;
    for entry in &config.teams {
        match cache.refresh(&entry.name, entry.year, false, today).await {
            Ok(refresh) => {
                if refresh.fetched {
                    fetched += 1;
                }
                if refresh.rejected_rows() > 0 || refresh.field_issues() > 0 {
                    log::warn!(
                        "{} {}: {} rows rejected, {} cells unreadable",
                        entry.name,
                        season_label(entry.year),
                        refresh.rejected_rows(),
                        refresh.field_issues()
                    );
                }
                if let Some(matchup) = refresh.team_year.next_game(today) {
                    log::info!("{} on {}", matchup, matchup.date);
                }
            }
            Err(e) => {
                failed += 1;
                log::error!(
                    "Refresh of {} {} failed: {}",
                    entry.name,
                    season_label(entry.year),
                    e
                );
            }
        }
    }

    log::info!(
        "Done: {} team-years, {} fetched, {} failed",
        config.teams.len(),
        fetched,
        failed
    );

    if failed > 0 {
        return Err(AppError::fetch(
            "mbp-sync",
            format!("{} of {} team-years failed", failed, config.teams.len()),
        ));
    }
    Ok(())
}
