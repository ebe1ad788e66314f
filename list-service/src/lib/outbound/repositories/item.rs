use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemCounts;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::ItemNotes;
use crate::domain::item::ports::ItemRepository;
use crate::domain::list::models::ListId;
use crate::domain::user::models::UserId;

const ITEM_COLUMNS: &str = "id, list_id, user_id, name, quantity, store, section, notes, \
                            priority, is_done, completed_at, created_at, updated_at";

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &PgRow) -> Result<Item, ItemError> {
        Ok(Item {
            id: ItemId(row.get("id")),
            list_id: ListId(row.get("list_id")),
            owner_id: UserId(row.get("user_id")),
            name: ItemName::new(row.get("name"))?,
            quantity: row.get("quantity"),
            store: row.get("store"),
            section: row.get("section"),
            notes: ItemNotes::new(row.get("notes"))?,
            priority: row.get("priority"),
            is_done: row.get("is_done"),
            completed_at: row.get("completed_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        sqlx::query(
            r#"
            INSERT INTO items (id, list_id, user_id, name, quantity, store, section, notes,
                               priority, is_done, completed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(item.id.0)
        .bind(item.list_id.0)
        .bind(item.owner_id.0)
        .bind(item.name.as_str())
        .bind(&item.quantity)
        .bind(&item.store)
        .bind(&item.section)
        .bind(item.notes.as_str())
        .bind(item.priority)
        .bind(item.is_done)
        .bind(item.completed_at)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(item)
    }

    async fn find_owned(&self, id: &ItemId, owner: &UserId) -> Result<Option<Item>, ItemError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM items WHERE id = $1 AND user_id = $2",
            ITEM_COLUMNS
        ))
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn find_by_list(
        &self,
        list_id: &ListId,
        is_done: Option<bool>,
    ) -> Result<Vec<Item>, ItemError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM items WHERE list_id = $1 AND ($2::BOOLEAN IS NULL OR is_done = $2)",
            ITEM_COLUMNS
        ))
        .bind(list_id.0)
        .bind(is_done)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn max_priority(&self, list_id: &ListId) -> Result<Option<i32>, ItemError> {
        let row = sqlx::query("SELECT MAX(priority) AS max_priority FROM items WHERE list_id = $1")
            .bind(list_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(row.get("max_priority"))
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = $2, quantity = $3, store = $4, section = $5, notes = $6,
                priority = $7, is_done = $8, completed_at = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(item.id.0)
        .bind(item.name.as_str())
        .bind(&item.quantity)
        .bind(&item.store)
        .bind(&item.section)
        .bind(item.notes.as_str())
        .bind(item.priority)
        .bind(item.is_done)
        .bind(item.completed_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(item.id));
        }

        Ok(item)
    }

    async fn find_owned_ids(
        &self,
        ids: &[ItemId],
        owner: &UserId,
    ) -> Result<Vec<ItemId>, ItemError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query("SELECT id FROM items WHERE id = ANY($1) AND user_id = $2")
            .bind(&uuids[..])
            .bind(owner.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(|r| ItemId(r.get("id"))).collect())
    }

    async fn update_priority(
        &self,
        id: &ItemId,
        owner: &UserId,
        priority: i32,
    ) -> Result<bool, ItemError> {
        let result = sqlx::query(
            "UPDATE items SET priority = $3, updated_at = NOW() WHERE id = $1 AND user_id = $2",
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(priority)
        .execute(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ItemError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(*id));
        }

        Ok(())
    }

    async fn count_by_lists(
        &self,
        list_ids: &[ListId],
    ) -> Result<HashMap<ListId, ItemCounts>, ItemError> {
        let uuids: Vec<Uuid> = list_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query(
            r#"
            SELECT list_id,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE is_done) AS done
            FROM items
            WHERE list_id = ANY($1)
            GROUP BY list_id
            "#,
        )
        .bind(&uuids[..])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemError::DatabaseError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|r| {
                (
                    ListId(r.get("list_id")),
                    ItemCounts {
                        total: r.get("total"),
                        done: r.get("done"),
                    },
                )
            })
            .collect())
    }
}
