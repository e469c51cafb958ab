#[derive(Clone, Debug)]
pub struct QhatuConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
}

impl QhatuConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("Failed to determine DATABASE_URL from environment variables");

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(15);

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            max_connections,
            bind_addr,
        }
    }
}
