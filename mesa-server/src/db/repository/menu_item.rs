//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_items";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Full menu grouped the way the views render it
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_items ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Only items a guest can currently order
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_items WHERE is_available = true ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = self.base.parse_id(id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Find menu item by exact name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_items WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                data.name
            )));
        }

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            is_available: data.is_available.unwrap_or(true),
            modifiers: data.modifiers,
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    ///
    /// Live edits never touch existing orders; those hold their own
    /// snapshot.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = self.base.parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(ref name) = data.name
            && name != &existing.name
            && self.find_by_name(name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                name
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let description = data.description.unwrap_or(existing.description);
        let price = data.price.unwrap_or(existing.price);
        let category = data.category.unwrap_or(existing.category);
        let image_url = data.image_url.or(existing.image_url);
        let is_available = data.is_available.unwrap_or(existing.is_available);
        let modifiers = data.modifiers.unwrap_or(existing.modifiers);

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET name = $name, description = $description, \
                 price = $price, category = $category, image_url = $image_url, \
                 is_available = $is_available, modifiers = $modifiers RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("description", description))
            .bind(("price", price))
            .bind(("category", category))
            .bind(("image_url", image_url))
            .bind(("is_available", is_available))
            .bind(("modifiers", modifiers))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to update menu item".to_string()))
    }

    /// Delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        let deleted: Option<MenuItem> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}
