//! 产品业务服务
//!
//! 把数据库调用结果转换成纯文本响应体；所有失败都以 `CoreError` 返回给单个请求。

use tracing::{debug, error, info};

use super::{
    model::{NewProduct, Product, ProductId},
    repository::{is_unique_violation, ProductRepository},
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(repository: ProductRepository) -> Self {
        Self { repository }
    }

    /// 所有产品按 `/select` 格式首尾相接
    pub async fn select(&self) -> Result<String, CoreError> {
        let products = self.repository.select_all().await.map_err(|e| {
            error!("查询产品失败: {}", e);
            CoreError::from(e)
        })?;

        debug!("查询到 {} 个产品", products.len());
        Ok(format_products(&products))
    }

    pub async fn insert(&self, product: NewProduct) -> Result<String, CoreError> {
        if let Err(e) = self.repository.insert(product.id.value, &product.name).await {
            if is_unique_violation(&e) {
                error!(id = product.id.value, "插入产品失败，id 已存在: {}", e);
                return Err(CoreError::Conflict(format!(
                    "product {} already exists",
                    product.id
                )));
            }
            error!(id = product.id.value, "插入产品失败: {}", e);
            return Err(e.into());
        }

        info!(id = product.id.value, "已插入产品: {}", product.name);
        Ok(echo(&product))
    }

    pub async fn update(&self, product: NewProduct) -> Result<String, CoreError> {
        let affected = self
            .repository
            .update(product.id.value, &product.name)
            .await
            .map_err(|e| {
                error!(id = product.id.value, "更新产品失败: {}", e);
                CoreError::from(e)
            })?;

        if affected == 0 {
            debug!(id = product.id.value, "更新未命中任何产品");
        } else {
            info!(id = product.id.value, "已更新产品: {}", product.name);
        }
        Ok(echo(&product))
    }

    pub async fn delete(&self, id: ProductId) -> Result<String, CoreError> {
        let affected = self.repository.delete(id.value).await.map_err(|e| {
            error!(id = id.value, "删除产品失败: {}", e);
            CoreError::from(e)
        })?;

        if affected == 0 {
            debug!(id = id.value, "删除未命中任何产品");
        } else {
            info!(id = id.value, "已删除产品");
        }
        Ok(id.raw)
    }

    pub async fn delete_all(&self) -> Result<(), CoreError> {
        let affected = self.repository.delete_all().await.map_err(|e| {
            error!("删除全部产品失败: {}", e);
            CoreError::from(e)
        })?;

        info!("已删除全部产品，共 {} 个", affected);
        Ok(())
    }

    pub async fn health(&self) -> Result<(), CoreError> {
        self.repository.ping().await.map_err(|e| {
            error!("数据库健康检查失败: {}", e);
            CoreError::ServiceUnavailable(e.to_string())
        })
    }
}

/// 拼接 `/select` 的响应体，行与行之间没有分隔符
pub fn format_products(products: &[Product]) -> String {
    products.iter().map(Product::to_string).collect()
}

fn echo(product: &NewProduct) -> String {
    format!("{} {}", product.id, product.name)
}
