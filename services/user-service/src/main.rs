use crudkit::config::Config;
use crudkit::database::create_pool;
use crudkit::error::Result;
use crudkit::observability::init_tracing;
use crudkit::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_for_service("user-service")?;
    init_tracing(&config);

    let pool = create_pool(&config.database).await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Migrations applied");

    let app = user_service::app(pool);

    Server::new(config).serve(app).await
}
