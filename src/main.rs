use std::{env, sync::Arc};

use backend_blogicum::{config::Config, handlers::auth::configure_cors, init_db, routes, AppState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "backend_blogicum=debug,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::init();

    let pool = match init_db(&config.database_url, 10).await {
        Ok(pool) => {
            tracing::info!("connected to the database");
            pool
        }
        Err(err) => {
            tracing::error!("failed to open the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(pool, config));

    let app = routes::create_router(app_state).layer(configure_cors());

    let listener = tokio::net::TcpListener::bind(format!(
        "[::]:{}",
        env::var("PORT").unwrap_or_else(|_| "8080".to_string())
    ))
    .await
    .expect("failed to bind the listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
