//! Customer 的 PostgreSQL 仓储

use async_stream::stream;
use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use sqlx::postgres::PgPool;

use super::model::CustomerEntity;
use crate::core::repository::{CrudRepository, StoreError};

const SELECT_BY_ID: &str = "SELECT id, customer_name, email, created_date, last_modified_date \
     FROM customer WHERE id = $1";

const SELECT_ALL: &str = "SELECT id, customer_name, email, created_date, last_modified_date \
     FROM customer ORDER BY id";

const INSERT: &str = "INSERT INTO customer (customer_name, email) VALUES ($1, $2) \
     RETURNING id, customer_name, email, created_date, last_modified_date";

const UPDATE: &str = "UPDATE customer SET customer_name = $1, email = $2, \
     last_modified_date = GREATEST(NOW(), last_modified_date + INTERVAL '1 microsecond') \
     WHERE id = $3 \
     RETURNING id, customer_name, email, created_date, last_modified_date";

#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<CustomerEntity> for PgCustomerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerEntity>, StoreError> {
        let customer = sqlx::query_as::<_, CustomerEntity>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    fn find_all(&self) -> BoxStream<'static, Result<CustomerEntity, StoreError>> {
        let pool = self.pool.clone();

        let customers = stream! {
            let mut rows = sqlx::query_as::<_, CustomerEntity>(SELECT_ALL).fetch(&pool);
            while let Some(row) = rows.next().await {
                yield row.map_err(StoreError::from);
            }
        };

        customers.boxed()
    }

    async fn save(&self, entity: CustomerEntity) -> Result<CustomerEntity, StoreError> {
        match entity.id {
            None => {
                let saved = sqlx::query_as::<_, CustomerEntity>(INSERT)
                    .bind(&entity.customer_name)
                    .bind(&entity.email)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(saved)
            }
            Some(id) => sqlx::query_as::<_, CustomerEntity>(UPDATE)
                .bind(&entity.customer_name)
                .bind(&entity.email)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::RowMissing(id)),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
