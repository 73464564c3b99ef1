use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::Cart;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;

use super::entity::{CartEntity, items_document};

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn create(&self, cart: &Cart) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO carts (id, items, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(cart.id)
        .bind(items_document(cart))
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Cart, RepositoryError> {
        let entity = sqlx::query_as::<_, CartEntity>(
            "SELECT id, items, created_at, updated_at FROM carts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE carts SET items = $2, updated_at = $3 WHERE id = $1")
            .bind(cart.id)
            .bind(items_document(cart))
            .bind(cart.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
