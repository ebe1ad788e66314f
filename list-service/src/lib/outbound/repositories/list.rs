use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::list::errors::ListError;
use crate::domain::list::models::Budget;
use crate::domain::list::models::Currency;
use crate::domain::list::models::HexColor;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListName;
use crate::domain::list::models::ListShare;
use crate::domain::list::models::ShareRole;
use crate::domain::list::ports::ListRepository;
use crate::domain::user::models::UserId;

pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_list(row: &PgRow, shared_with: Vec<ListShare>) -> Result<List, ListError> {
        let currency: String = row.get("currency");
        let budget: Option<f64> = row.get("budget");

        Ok(List {
            id: ListId(row.get("id")),
            owner_id: UserId(row.get("user_id")),
            name: ListName::new(row.get("name"))?,
            store: row.get("store"),
            color: HexColor::new(row.get("color"))?,
            budget: budget.map(Budget::new).transpose()?,
            currency: currency.parse::<Currency>()?,
            is_archived: row.get("is_archived"),
            shared_with,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn load_shares(&self, list_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<ListShare>>, ListError> {
        let rows = sqlx::query(
            r#"
            SELECT list_id, user_id, role
            FROM list_shares
            WHERE list_id = ANY($1)
            "#,
        )
        .bind(list_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        let mut shares: HashMap<Uuid, Vec<ListShare>> = HashMap::new();
        for row in rows {
            let role: String = row.get("role");
            shares.entry(row.get("list_id")).or_default().push(ListShare {
                user_id: UserId(row.get("user_id")),
                role: role.parse::<ShareRole>()?,
            });
        }

        Ok(shares)
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn create(&self, list: List) -> Result<List, ListError> {
        sqlx::query(
            r#"
            INSERT INTO lists (id, user_id, name, store, color, budget, currency, is_archived, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(list.id.0)
        .bind(list.owner_id.0)
        .bind(list.name.as_str())
        .bind(&list.store)
        .bind(list.color.as_str())
        .bind(list.budget.map(|b| b.amount()))
        .bind(list.currency.as_str())
        .bind(list.is_archived)
        .bind(list.created_at)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        tracing::debug!(list_id = %list.id, "List row inserted");
        Ok(list)
    }

    async fn find_owned(&self, id: &ListId, owner: &UserId) -> Result<Option<List>, ListError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, store, color, budget, currency, is_archived, created_at, updated_at
            FROM lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut shares = self.load_shares(&[id.0]).await?;
        let shared_with = shares.remove(&id.0).unwrap_or_default();

        Self::row_to_list(&row, shared_with).map(Some)
    }

    async fn find_by_owner(&self, owner: &UserId, archived: bool) -> Result<Vec<List>, ListError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, store, color, budget, currency, is_archived, created_at, updated_at
            FROM lists
            WHERE user_id = $1 AND is_archived = $2
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner.0)
        .bind(archived)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.get("id")).collect();
        let mut shares = self.load_shares(&ids).await?;

        rows.iter()
            .map(|row| {
                let id: Uuid = row.get("id");
                Self::row_to_list(row, shares.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn update(&self, list: List) -> Result<List, ListError> {
        let result = sqlx::query(
            r#"
            UPDATE lists
            SET name = $2, store = $3, color = $4, budget = $5, currency = $6, is_archived = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(list.id.0)
        .bind(list.name.as_str())
        .bind(&list.store)
        .bind(list.color.as_str())
        .bind(list.budget.map(|b| b.amount()))
        .bind(list.currency.as_str())
        .bind(list.is_archived)
        .bind(list.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ListError::NotFound(list.id));
        }

        Ok(list)
    }

    async fn delete_with_items(&self, id: &ListId) -> Result<(), ListError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        let items = sqlx::query("DELETE FROM items WHERE list_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ListError::NotFound(*id));
        }

        tx.commit()
            .await
            .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        tracing::debug!(list_id = %id, items = items.rows_affected(), "List deleted with items");
        Ok(())
    }
}
