//! Beer 的 PostgreSQL 仓储

use async_stream::stream;
use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use sqlx::postgres::PgPool;

use super::model::BeerEntity;
use crate::core::repository::{CrudRepository, StoreError};

const SELECT_BY_ID: &str = "SELECT id, beer_name, beer_style, upc, quantity_on_hand, price, \
     created_date, last_modified_date FROM beer WHERE id = $1";

const SELECT_ALL: &str = "SELECT id, beer_name, beer_style, upc, quantity_on_hand, price, \
     created_date, last_modified_date FROM beer ORDER BY id";

const INSERT: &str = "INSERT INTO beer (beer_name, beer_style, upc, quantity_on_hand, price) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, beer_name, beer_style, upc, quantity_on_hand, price, \
     created_date, last_modified_date";

const UPDATE: &str = "UPDATE beer SET beer_name = $1, beer_style = $2, upc = $3, \
     quantity_on_hand = $4, price = $5, \
     last_modified_date = GREATEST(NOW(), last_modified_date + INTERVAL '1 microsecond') \
     WHERE id = $6 \
     RETURNING id, beer_name, beer_style, upc, quantity_on_hand, price, \
     created_date, last_modified_date";

#[derive(Clone)]
pub struct PgBeerRepository {
    pool: PgPool,
}

impl PgBeerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<BeerEntity> for PgBeerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<BeerEntity>, StoreError> {
        let beer = sqlx::query_as::<_, BeerEntity>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(beer)
    }

    fn find_all(&self) -> BoxStream<'static, Result<BeerEntity, StoreError>> {
        let pool = self.pool.clone();

        let beers = stream! {
            let mut rows = sqlx::query_as::<_, BeerEntity>(SELECT_ALL).fetch(&pool);
            while let Some(row) = rows.next().await {
                yield row.map_err(StoreError::from);
            }
        };

        beers.boxed()
    }

    async fn save(&self, entity: BeerEntity) -> Result<BeerEntity, StoreError> {
        let query = match entity.id {
            None => sqlx::query_as::<_, BeerEntity>(INSERT),
            Some(_) => sqlx::query_as::<_, BeerEntity>(UPDATE),
        };

        let query = query
            .bind(&entity.beer_name)
            .bind(&entity.beer_style)
            .bind(&entity.upc)
            .bind(entity.quantity_on_hand)
            .bind(entity.price);

        match entity.id {
            None => Ok(query.fetch_one(&self.pool).await?),
            Some(id) => query
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::RowMissing(id)),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM beer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
