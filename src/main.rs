use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use redis::Client as RedisClient;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repas_api::{
    config::Config, db, middleware::auth::JwtSecret, routes,
    services::assistant::AssistantService, services::metrics, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let redis_client = RedisClient::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    metrics::start(pool.clone());

    let assistant = Arc::new(AssistantService::new(config.clone()));
    if config.openrouter_api_key.is_some() {
        info!("Assistant culinaire configured");
    } else {
        info!("OpenRouter not configured — assistant disabled");
    }

    let state = AppState {
        db: pool,
        redis: redis_conn,
        redis_client: redis_client.clone(),
        config: config.clone(),
        assistant,
    };

    // Build CORS: allow the app base URL exactly; localhost is always allowed
    // for local development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Dishes
        .route(
            "/dishes",
            get(routes::dishes::list_dishes).post(routes::dishes::create_dish),
        )
        .route("/dishes/mine", get(routes::dishes::list_my_dishes))
        .route(
            "/dishes/{id}",
            put(routes::dishes::update_dish).delete(routes::dishes::delete_dish),
        )
        .route("/dishes/{id}/favorite", post(routes::dishes::toggle_favorite))
        // Ingredients
        .route(
            "/ingredients",
            get(routes::ingredients::list_ingredients).post(routes::ingredients::create_ingredient),
        )
        .route(
            "/ingredient-categories",
            get(routes::ingredients::list_categories),
        )
        // Meal planning
        .route(
            "/meal-plans",
            get(routes::meal_plans::list_plans).post(routes::meal_plans::create_plan),
        )
        .route("/meal-plans/grid", get(routes::meal_plans::get_grid))
        .route("/meal-plans/stats", get(routes::meal_plans::get_statistics))
        .route("/meal-plans/export", get(routes::meal_plans::export_grid))
        .route("/meal-plans/{id}", delete(routes::meal_plans::delete_plan))
        // Family members
        .route(
            "/family-members",
            get(routes::family::list_members).post(routes::family::create_member),
        )
        .route(
            "/family-members/{id}",
            put(routes::family::update_member).delete(routes::family::delete_member),
        )
        // Inventory
        .route(
            "/inventory",
            get(routes::inventory::list_items).post(routes::inventory::create_item),
        )
        .route("/inventory/low-stock", get(routes::inventory::list_low_stock))
        .route(
            "/inventory/{id}",
            put(routes::inventory::update_item).delete(routes::inventory::delete_item),
        )
        // Shopping lists
        .route(
            "/shopping-lists",
            get(routes::shopping::list_lists).post(routes::shopping::create_list),
        )
        .route("/shopping-lists/{id}", delete(routes::shopping::delete_list))
        .route(
            "/shopping-lists/{id}/items",
            get(routes::shopping::list_items).post(routes::shopping::add_item),
        )
        .route(
            "/shopping-items/{id}",
            put(routes::shopping::update_item).delete(routes::shopping::delete_item),
        )
        // Marketplace
        .route(
            "/marketplace",
            get(routes::marketplace::list_listings).post(routes::marketplace::create_item),
        )
        .route("/marketplace/mine", get(routes::marketplace::list_my_items))
        .route(
            "/marketplace/{id}",
            put(routes::marketplace::update_item).delete(routes::marketplace::delete_item),
        )
        .route(
            "/orders",
            get(routes::marketplace::list_orders).post(routes::marketplace::create_order),
        )
        .route("/orders/{id}/confirm", post(routes::marketplace::confirm_order))
        .route(
            "/orders/{id}/messages",
            get(routes::marketplace::list_messages).post(routes::marketplace::send_message),
        )
        // Delivery locations
        .route(
            "/locations",
            get(routes::locations::list_locations).post(routes::locations::create_location),
        )
        .route(
            "/locations/{id}",
            put(routes::locations::update_location).delete(routes::locations::delete_location),
        )
        // Profile
        .route(
            "/profile",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .route("/profile/stats", get(routes::profile::get_stats))
        // Assistant
        .route("/assistant/chat", post(routes::assistant::chat))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("repas API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
