use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// When unset the service runs on the in-process store, which is the
    /// local development and test configuration.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL").ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let allowed_origin =
            env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        allowed_origin
            .parse::<axum::http::HeaderValue>()
            .map_err(|_| "ALLOWED_ORIGIN is not a valid header value".to_string())?;

        Ok(Self {
            database_url,
            bind_addr,
            allowed_origin,
        })
    }
}
