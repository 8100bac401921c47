use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_file: String,
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| "data.json".into());
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5001);
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mindfulday".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "mindfulday-users".into()),
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        Ok(Self {
            data_file,
            environment,
            host,
            port,
            jwt,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
