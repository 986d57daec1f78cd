use lazy_static::lazy_static;
use prometheus::{register_counter, register_gauge, Counter, Gauge};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Event counters (increment on each event) ────────────────────────────
    pub static ref PLANS_CREATED: Counter = register_counter!(
        "api_meal_plans_created_total",
        "Entrées de planning créées"
    )
    .unwrap();

    pub static ref PLANS_REMOVED: Counter = register_counter!(
        "api_meal_plans_removed_total",
        "Entrées de planning supprimées"
    )
    .unwrap();

    pub static ref DISHES_CREATED: Counter =
        register_counter!("api_dishes_created_total", "Plats créés").unwrap();

    pub static ref ORDERS_CREATED: Counter =
        register_counter!("api_orders_created_total", "Commandes créées").unwrap();

    pub static ref ASSISTANT_REQUESTS: Counter = register_counter!(
        "api_assistant_requests_total",
        "Requêtes envoyées à l'assistant culinaire"
    )
    .unwrap();

    // ── Business metrics ────────────────────────────────────────────────────
    pub static ref DISHES_GAUGE: Gauge =
        register_gauge!("app_dishes_total", "Plats au catalogue").unwrap();

    pub static ref PLANS_GAUGE: Gauge =
        register_gauge!("app_meal_plans_total", "Entrées de planning en base").unwrap();

    pub static ref LISTINGS_GAUGE: Gauge = register_gauge!(
        "app_marketplace_listings_active_total",
        "Annonces marketplace disponibles"
    )
    .unwrap();

    pub static ref ORDERS_GAUGE: Gauge =
        register_gauge!("app_orders_total", "Commandes en base").unwrap();

    pub static ref PROFILES_GAUGE: Gauge =
        register_gauge!("app_profiles_total", "Profils utilisateurs").unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        // Initial collection on startup
        if let Err(e) = collect(&pool).await {
            warn!("Metrics: initial collection failed: {}", e);
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let dishes: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM dishes")
        .fetch_one(pool)
        .await?;
    DISHES_GAUGE.set(dishes as f64);

    let plans: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM meal_plans")
        .fetch_one(pool)
        .await?;
    PLANS_GAUGE.set(plans as f64);

    let listings: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::BIGINT FROM marketplace_items WHERE is_available = TRUE",
    )
    .fetch_one(pool)
    .await?;
    LISTINGS_GAUGE.set(listings as f64);

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM orders")
        .fetch_one(pool)
        .await?;
    ORDERS_GAUGE.set(orders as f64);

    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM profiles")
        .fetch_one(pool)
        .await?;
    PROFILES_GAUGE.set(profiles as f64);

    info!("Metrics: business gauges refreshed");
    Ok(())
}
