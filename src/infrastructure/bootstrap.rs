//! 启动时写入示例数据

use futures::StreamExt;
use rust_decimal::Decimal;
use tracing::info;

use crate::app::{beer::BeerEntity, customer::CustomerEntity};
use crate::core::repository::{Audited, CrudRepository, StoreError};

fn sample_beers() -> Vec<BeerEntity> {
    let beer = |name: &str, style: &str, upc: &str, quantity: i32, cents: i64| BeerEntity {
        id: None,
        beer_name: name.to_string(),
        beer_style: style.to_string(),
        upc: Some(upc.to_string()),
        quantity_on_hand: Some(quantity),
        price: Some(Decimal::new(cents, 2)),
        created_date: None,
        last_modified_date: None,
    };

    vec![
        beer("Galaxy Cat", "Pale Ale", "12356", 122, 1299),
        beer("Crank", "Pale Ale", "12356222", 392, 1199),
        beer("Sunshine City", "IPA", "12356", 144, 1399),
    ]
}

fn sample_customers() -> Vec<CustomerEntity> {
    let customer = |name: &str, email: &str| CustomerEntity {
        id: None,
        customer_name: name.to_string(),
        email: Some(email.to_string()),
        created_date: None,
        last_modified_date: None,
    };

    vec![
        customer("Customer 1", "customer1@example.com"),
        customer("Customer 2", "customer2@example.com"),
    ]
}

/// 表为空时逐条插入，已有数据则跳过
async fn seed_if_empty<E: Audited>(
    repository: &dyn CrudRepository<E>,
    rows: Vec<E>,
    table: &str,
) -> Result<(), StoreError> {
    if repository.find_all().next().await.transpose()?.is_some() {
        info!("Table {} already has data, skipping sample data", table);
        return Ok(());
    }

    let count = rows.len();
    for row in rows {
        repository.save(row).await?;
    }
    info!("Loaded {} sample rows into {}", count, table);

    Ok(())
}

pub async fn load_sample_data(
    beers: &dyn CrudRepository<BeerEntity>,
    customers: &dyn CrudRepository<CustomerEntity>,
) -> Result<(), StoreError> {
    seed_if_empty(beers, sample_beers(), "beer").await?;
    seed_if_empty(customers, sample_customers(), "customer").await?;
    Ok(())
}
