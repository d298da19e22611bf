use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use brewery_reactive::{
    app::{
        beer::{BeerEntity, PgBeerRepository},
        customer::{CustomerEntity, PgCustomerRepository},
    },
    build_app,
    core::repository::CrudRepository,
    infrastructure::{
        bootstrap,
        config::{load_config, StoreBackend},
        database::DatabaseManager,
        logger::Logger,
        memory::InMemoryRepository,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("failed to load configuration")?;

    Logger::init(&config.logging);
    match source {
        Some(path) => info!("Loaded configuration from {}", path),
        None => info!("No config file found, using defaults"),
    }

    let beers: Arc<dyn CrudRepository<BeerEntity>>;
    let customers: Arc<dyn CrudRepository<CustomerEntity>>;

    match config.database.backend {
        StoreBackend::Postgres => {
            let db = DatabaseManager::new(&config.database)
                .await
                .context("failed to connect to database")?;
            db.create_tables()
                .await
                .context("failed to create tables")?;

            let pool = db.get_pool().clone();
            beers = Arc::new(PgBeerRepository::new(pool.clone()));
            customers = Arc::new(PgCustomerRepository::new(pool));
        }
        StoreBackend::Memory => {
            info!("Using in-memory store");
            beers = Arc::new(InMemoryRepository::<BeerEntity>::new());
            customers = Arc::new(InMemoryRepository::<CustomerEntity>::new());
        }
    }

    if config.database.load_sample_data {
        bootstrap::load_sample_data(beers.as_ref(), customers.as_ref())
            .await
            .context("failed to load sample data")?;
    }

    let app = build_app(&config, beers, customers);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 Brewery server running on http://{}", listener.local_addr()?);
    info!("📖 Endpoints:");
    info!("   GET            /api/v2/beer, /api/v2/customer");
    info!("   GET            /api/v2/beer/:id, /api/v2/customer/:id");
    info!("   POST           /api/v2/beer, /api/v2/customer            (bearer token)");
    info!("   PUT/PATCH/DEL  /api/v2/beer/:id, /api/v2/customer/:id    (bearer token)");

    axum::serve(listener, app).await?;

    Ok(())
}
