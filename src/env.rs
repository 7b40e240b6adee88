use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fumo.db?mode=rwc";
pub const DEFAULT_BACKUP_DIR: &str = "backups";
pub const DEFAULT_BACKUP_KEEP: usize = 10;

type EnvError = Box<dyn std::error::Error + Send + Sync>;
type EnvResult<T> = Result<T, EnvError>;

/// Reads an optional variable; only a missing variable maps to `None`.
fn optional(key: &str) -> EnvResult<Option<String>> {
    match dotenvy::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(e) => Err(Box::new(e) as EnvError),
    }
}

/// Gets the Discord bot token from environment
pub fn discord_token() -> EnvResult<String> {
    dotenvy::var("DISCORD_TOKEN").map_err(|e| Box::new(e) as EnvError)
}

/// Gets the database URL from environment
pub fn database_url() -> EnvResult<Option<String>> {
    optional("DATABASE_URL")
}

/// Comma-separated list of Discord user IDs allowed to run owners_only commands
pub fn owner_ids() -> EnvResult<Vec<u64>> {
    let Some(value) = optional("FUMO_OWNERS_IDS")? else {
        return Ok(Vec::new());
    };

    let mut ids = Vec::new();
    for raw in value.split(',') {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed: u64 = trimmed.parse().map_err(|err| Box::new(err) as EnvError)?;
        ids.push(parsed);
    }
    Ok(ids)
}

pub fn backup_dir() -> EnvResult<PathBuf> {
    Ok(optional("FUMO_BACKUP_DIR")?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR)))
}

/// Number of snapshots kept after each backup
pub fn backup_keep() -> EnvResult<usize> {
    match optional("FUMO_BACKUP_KEEP")? {
        Some(value) => Ok(value
            .trim()
            .parse::<usize>()
            .map_err(|err| Box::new(err) as EnvError)?
            .max(1)),
        None => Ok(DEFAULT_BACKUP_KEEP),
    }
}

/// Directory for rolling log files, if file logging is enabled
pub fn log_dir() -> EnvResult<Option<PathBuf>> {
    Ok(optional("FUMO_LOG_DIR")?.map(PathBuf::from))
}
