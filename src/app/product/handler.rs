//! 产品处理器

use axum::extract::{Query, State};
use sqlx::SqlitePool;
use tracing::warn;

use super::{
    model::{IdParams, ProductParams},
    repository::ProductRepository,
    service::ProductService,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            product_service: ProductService::new(ProductRepository::new(pool)),
        }
    }
}

fn rejected(route: &str, err: CoreError) -> CoreError {
    warn!("{} 参数无效: {}", route, err);
    err
}

pub async fn select_products(State(state): State<AppState>) -> Result<String, CoreError> {
    state.product_service.select().await
}

pub async fn insert_product(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, CoreError> {
    let product = ProductParams::from_pairs(pairs)
        .into_new_product()
        .map_err(|e| rejected("/insert", e))?;
    state.product_service.insert(product).await
}

pub async fn update_product(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, CoreError> {
    let product = ProductParams::from_pairs(pairs)
        .into_new_product()
        .map_err(|e| rejected("/update", e))?;
    state.product_service.update(product).await
}

pub async fn delete_product(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, CoreError> {
    let id = IdParams::from_pairs(pairs)
        .into_id().map_err(|e| rejected("/delete", e))?;
    state.product_service.delete(id).await
}

pub async fn delete_all_products(State(state): State<AppState>) -> Result<(), CoreError> {
    state.product_service.delete_all().await
}

pub async fn health_check(State(state): State<AppState>) -> Result<&'static str, CoreError> {
    state.product_service.health().await?;
    Ok("ok")
}
