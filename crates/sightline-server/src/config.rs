use sightline_core::AppError;

/// Listen address for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `SIGHTLINE_HOST` (optional, defaults to `0.0.0.0`)
    /// - `SIGHTLINE_PORT` (optional, defaults to 3000)
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("SIGHTLINE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("SIGHTLINE_PORT") {
            Err(_) => 3000,
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!(
                    "Invalid SIGHTLINE_PORT '{raw}': must be an integer between 0 and 65535"
                ))
            })?,
        };

        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
