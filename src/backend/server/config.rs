/**
 * Server Configuration
 *
 * Loads the optional PostgreSQL pool and the JWT settings from the
 * environment.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - PostgreSQL connection string (optional)
 * - `JWT_SECRET` - HMAC secret for tokens
 * - `JWT_EXPIRES_IN` - token lifetime: `1d`, `12h`, `30m`, `45s` or bare seconds
 * - `SERVER_PORT` / `PORT` - listen port
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. A
 * missing database leaves the pool as `None` and DB-backed handlers answer 503.
 */

use std::time::Duration;

use sqlx::PgPool;

/// Secret used when `JWT_SECRET` is unset; fine for local runs only
const DEV_JWT_SECRET: &str = "parkeasy-dev-secret-change-me";

const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Port used when neither `SERVER_PORT` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 3000;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// JWT signing settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }

    /// Read `JWT_SECRET` and `JWT_EXPIRES_IN`
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl = match std::env::var("JWT_EXPIRES_IN") {
            Ok(raw) => parse_duration(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid JWT_EXPIRES_IN {:?}, using 1d", raw);
                DEFAULT_TOKEN_TTL
            }),
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        Self::new(jwt_secret, token_ttl)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEV_JWT_SECRET, DEFAULT_TOKEN_TTL)
    }
}

/// Parse `90`, `45s`, `30m`, `12h` or `7d` into a duration
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: u64 = digits.parse().ok()?;
    let seconds = match unit {
        "" | "s" => amount,
        "m" => amount.checked_mul(60)?,
        "h" => amount.checked_mul(60 * 60)?,
        "d" => amount.checked_mul(24 * 60 * 60)?,
        _ => return None,
    };
    if seconds == 0 {
        return None;
    }
    Some(Duration::from_secs(seconds))
}

/// Listen port from `SERVER_PORT`, then `PORT`
pub fn server_port() -> u16 {
    ["SERVER_PORT", "PORT"]
        .iter()
        .find_map(|key| std::env::var(key).ok()?.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs the migrations under `migrations/`
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
