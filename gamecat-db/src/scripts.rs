//! SQL scripts shipped with the crate.
//!
//! The files live in `sql/` and are embedded at compile time so `init` can
//! install them into the configured SQL directory. At runtime the rebuilder
//! and the query repository only ever read the installed copies.

use std::io;
use std::path::{Path, PathBuf};

pub const DROP_TABLES: &str = "drop_tables.sql";
pub const CREATE_TABLES: &str = "create_tables.sql";
pub const QUERY_GAME: &str = "query_game.sql";
pub const NEXT_GAME_LIST: &str = "get_next_game_list.sql";
pub const COUNT_COMPLETE_GAMES: &str = "count_complete_games.sql";
pub const COUNT_SPEND_TIME_COMPLETED: &str = "count_spend_time_completed.sql";
pub const COUNT_SPEND_TIME: &str = "count_spend_time.sql";

/// Generated by the rebuild, in the work directory.
pub const DML_DICTIONARIES: &str = "dml_dictionaries.sql";
pub const DML_GAMES: &str = "dml_games.sql";
pub const DML_GAMES_ON_PLATFORMS: &str = "dml_games_on_platforms.sql";

/// Every bundled script as `(file name, contents)`.
pub const BUNDLED: &[(&str, &str)] = &[
    (DROP_TABLES, include_str!("../sql/drop_tables.sql")),
    (CREATE_TABLES, include_str!("../sql/create_tables.sql")),
    (QUERY_GAME, include_str!("../sql/query_game.sql")),
    (NEXT_GAME_LIST, include_str!("../sql/get_next_game_list.sql")),
    (COUNT_COMPLETE_GAMES, include_str!("../sql/count_complete_games.sql")),
    (
        COUNT_SPEND_TIME_COMPLETED,
        include_str!("../sql/count_spend_time_completed.sql"),
    ),
    (COUNT_SPEND_TIME, include_str!("../sql/count_spend_time.sql")),
];

/// Contents of the bundled script called `name`.
pub fn bundled(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, contents)| *contents)
}

/// Write every bundled script into `dir`, leaving existing files untouched.
///
/// Returns the paths that were written.
pub fn install_scripts(dir: &Path) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for (name, contents) in BUNDLED {
        let path = dir.join(name);
        if path.exists() {
            log::debug!("Keeping existing {}", path.display());
            continue;
        }
        std::fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
