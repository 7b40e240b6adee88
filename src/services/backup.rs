use crate::{Error, database};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

const PREFIX: &str = "fumo-";
const EXTENSION: &str = ".db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupReport {
    pub created: Snapshot,
    pub pruned: Vec<String>,
}

pub fn file_name(at: DateTime<Utc>) -> String {
    format!("{PREFIX}{}{EXTENSION}", at.format("%Y%m%d-%H%M%S"))
}

fn is_snapshot(name: &str) -> bool {
    name.starts_with(PREFIX) && name.ends_with(EXTENSION)
}

/// Snapshots in `dir`, newest first.
pub async fn list(dir: &Path) -> Result<Vec<Snapshot>, Error> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut snapshots = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_snapshot(&name) {
            continue;
        }
        let size = entry.metadata().await.map(|meta| meta.len()).unwrap_or(0);
        snapshots.push(Snapshot {
            name,
            path: entry.path(),
            size,
        });
    }

    snapshots.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(snapshots)
}

/// Deletes all but the newest `keep` snapshots, returning the removed names.
pub async fn prune(dir: &Path, keep: usize) -> Result<Vec<String>, Error> {
    let mut removed = Vec::new();
    for snapshot in list(dir).await?.into_iter().skip(keep) {
        tokio::fs::remove_file(&snapshot.path).await?;
        removed.push(snapshot.name);
    }
    Ok(removed)
}

pub async fn create(
    pool: &SqlitePool,
    dir: &Path,
    keep: usize,
    now: DateTime<Utc>,
) -> Result<BackupReport, Error> {
    tokio::fs::create_dir_all(dir).await?;

    let name = file_name(now);
    let path = dir.join(&name);
    if tokio::fs::try_exists(&path).await? {
        tokio::fs::remove_file(&path).await?;
    }
    database::backup::vacuum_into(pool, &path).await?;
    let size = tokio::fs::metadata(&path).await?.len();

    let pruned = prune(dir, keep.max(1)).await?;
    tracing::info!(path = %path.display(), size, pruned = pruned.len(), "database backup written");

    Ok(BackupReport {
        created: Snapshot { name, path, size },
        pruned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fumobot-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    /// `VACUUM INTO` only writes a file when the source database is on disk.
    async fn file_pool(path: &Path) -> SqlitePool {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("file database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("migrations");
        pool
    }

    #[test]
    fn names_sort_by_time() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(file_name(at), "fumo-20260304-050607.db");
        assert!(file_name(at) < file_name(at + Duration::seconds(1)));
    }

    #[tokio::test]
    async fn missing_directory_has_no_snapshots() {
        let dir = scratch_dir("missing");
        assert!(list(&dir).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_writes_and_prunes() {
        let dir = scratch_dir("create");
        std::fs::create_dir_all(&dir).unwrap();
        let pool = file_pool(&dir.join("live.sqlite")).await;
        let mut conn = pool.acquire().await.unwrap();
        database::user::get_or_create(&mut conn, 1).await.unwrap();
        drop(conn);
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        for offset in 0..3 {
            create(&pool, &dir, 2, start + Duration::minutes(offset))
                .await
                .unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "keep me").unwrap();

        let snapshots = list(&dir).await.unwrap();
        let names: Vec<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["fumo-20260101-000200.db", "fumo-20260101-000100.db"]);
        assert!(snapshots.iter().all(|snapshot| snapshot.size > 0));
        assert!(dir.join("notes.txt").exists());
        assert!(dir.join("live.sqlite").exists());

        let restored = file_pool(&snapshots[0].path).await;
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&restored)
            .await
            .unwrap();
        assert_eq!(users, 1);

        restored.close().await;
        pool.close().await;
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
