use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 24;
/// Ten years.
pub const MAX_JWT_EXPIRATION_HOURS: u64 = 24 * 365 * 10;
/// The range the bcrypt crate accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Where the PostgreSQL stores live. Absent means in-memory stores.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            DatabaseConfig::Url(url) => PgConnectOptions::from_str(url),
            DatabaseConfig::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let jwt_expiration = jwt_expiration_hours(env::var("JWT_EXPIRATION").ok().as_deref());

        let jwt_secret = env::var("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(env::VarError::NotPresent);
        }

        Ok(Config {
            database: database_from_env(),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            jwt_secret,
            jwt_expiration_secs: jwt_expiration * 3600,
            bcrypt_cost: bcrypt_cost(env::var("BCRYPT_COST").ok().as_deref()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parse_or("SERVER_PORT", 8080),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
        })
    }

    pub fn jwt_expiration(&self) -> chrono::Duration {
        i64::try_from(self.jwt_expiration_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::hours(DEFAULT_JWT_EXPIRATION_HOURS as i64))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Hours, with an optional `h` suffix. Zero, unparsable and absurd values fall back to the default.
fn jwt_expiration_hours(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_JWT_EXPIRATION_HOURS;
    };
    match raw.trim().trim_end_matches('h').parse::<u64>() {
        Ok(hours) if (1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) => hours,
        _ => {
            tracing::warn!(
                "Ignoring JWT_EXPIRATION={:?}, expected 1 to {} hours; using {}h",
                raw,
                MAX_JWT_EXPIRATION_HOURS,
                DEFAULT_JWT_EXPIRATION_HOURS
            );
            DEFAULT_JWT_EXPIRATION_HOURS
        }
    }
}

fn bcrypt_cost(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return bcrypt::DEFAULT_COST;
    };
    match raw.trim().parse::<u32>() {
        Ok(cost) if BCRYPT_COST_RANGE.contains(&cost) => cost,
        _ => {
            tracing::warn!(
                "Ignoring BCRYPT_COST={:?}, expected {} to {}; using {}",
                raw,
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                bcrypt::DEFAULT_COST
            );
            bcrypt::DEFAULT_COST
        }
    }
}

fn database_from_env() -> Option<DatabaseConfig> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Some(DatabaseConfig::Url(url));
    }
    let host = env::var("DB_HOST").ok()?;
    Some(DatabaseConfig::Parts {
        host,
        port: parse_or("DB_PORT", 5432),
        username: env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
        password: env::var("DB_PASSWORD").unwrap_or_default(),
        database: env::var("DB_NAME").unwrap_or_else(|_| "booking_app".into()),
    })
}
