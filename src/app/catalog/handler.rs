//! 商品目录处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::warn;

use super::{model::Product, repository::ProductRepository};
use crate::core::{error::CoreError, object_id::OBJECT_ID_LEN, response::ApiResponse};

pub const CATALOG_PATH: &str = "/api/v1/catalog";

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            CATALOG_PATH,
            get(get_products).post(create_product).put(update_product),
        )
        .route(
            &format!("{}/:id", CATALOG_PATH),
            get(get_product_by_id).delete(delete_product),
        )
        .route(
            &format!("{}/category/", CATALOG_PATH),
            get(get_uncategorized_products),
        )
        .route(
            &format!("{}/category/:category", CATALOG_PATH),
            get(get_products_by_category),
        )
}

/// 路由层约束：id 必须是 24 个字符，否则直接视为未找到
fn require_id_shape(id: &str) -> Result<(), CoreError> {
    if id.chars().count() != OBJECT_ID_LEN {
        return Err(not_found(id));
    }
    Ok(())
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound(format!("商品 {} 不存在", id))
}

pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.repository.list_all().await?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    require_id_shape(&id)?;

    match state.repository.get_by_id(&id).await? {
        Some(product) => Ok(Json(ApiResponse::success(product))),
        None => {
            warn!("商品 {} 不存在", id);
            Err(not_found(&id))
        }
    }
}

pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.repository.get_by_category(&category).await?;
    Ok(Json(ApiResponse::list(products)))
}

/// 空分类即“未分类”，路径参数无法表达空串，单独挂载
pub async fn get_uncategorized_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let products = state.repository.get_by_category("").await?;
    Ok(Json(ApiResponse::list(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<impl IntoResponse, CoreError> {
    let Json(product) = payload?;
    let created = state.repository.create(product).await?;

    let location = format!("{}/{}", CATALOG_PATH, created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(created)),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<ApiResponse<bool>>, CoreError> {
    let Json(product) = payload?;
    let id = product.id.clone();

    let updated = state.repository.update(product).await?;
    if !updated {
        warn!("商品 {} 不存在，未更新", id);
    }
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<bool>>, CoreError> {
    require_id_shape(&id)?;

    let deleted = state.repository.delete(&id).await?;
    if !deleted {
        warn!("商品 {} 不存在，未删除", id);
    }
    Ok(Json(ApiResponse::success(deleted)))
}
