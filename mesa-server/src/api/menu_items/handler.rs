//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::money;
use crate::utils::{AppError, AppResult};

/// GET /api/menu-items query parameters
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    /// `available=true` returns only orderable items (guest menu view)
    #[serde(default)]
    pub available: Option<bool>,
}

/// GET /api/menu-items - 菜单列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = if query.available.unwrap_or(false) {
        repo.find_available().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    money::validate_price(payload.price, "price")?;
    validate_modifier_prices(&payload.modifiers)?;

    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.create(payload).await?))
}

/// PUT /api/menu-items/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(price) = payload.price {
        money::validate_price(price, "price")?;
    }
    if let Some(modifiers) = &payload.modifiers {
        validate_modifier_prices(modifiers)?;
    }

    let repo = MenuItemRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, payload).await?))
}

/// DELETE /api/menu-items/:id - 删除菜品
///
/// 历史订单持有快照，不受删除影响。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Menu item {} not found", id)));
    }
    Ok(Json(true))
}

fn validate_modifier_prices(modifiers: &[crate::db::models::Modifier]) -> AppResult<()> {
    for modifier in modifiers {
        for option in &modifier.options {
            money::validate_price(option.price, "modifier option price")?;
        }
    }
    Ok(())
}
