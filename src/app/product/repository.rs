//! 产品表的数据访问
//!
//! 每个方法对应一条参数化 SQL 语句，连接按语句从池中获取和归还。

use sqlx::SqlitePool;

use super::model::Product;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 按 id 升序返回全部产品
    pub async fn select_all(&self) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>("SELECT id, name FROM product ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    /// id 已存在时返回唯一约束错误
    pub async fn insert(&self, id: i64, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO product (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 返回受影响的行数
    pub async fn update(&self, id: i64, name: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE product SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// 判断错误是否为主键/唯一约束冲突
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
