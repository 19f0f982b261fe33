//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// 持有进程生命周期内共享的 SQLite 连接池
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 打开（必要时创建）数据库文件并确保表结构存在
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        info!("打开数据库: {}", config.filename);

        let options = SqliteConnectOptions::new()
            .filename(&config.filename)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        create_tables(&pool).await?;

        Ok(Self { pool })
    }

    pub fn into_pool(self) -> SqlitePool {
        self.pool
    }
}

async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("数据库表结构就绪");
    Ok(())
}
