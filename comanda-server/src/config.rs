//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// JWT secret for account authentication
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require a secret value: must be present and non-empty in
    /// non-development environments.
    fn require_secret(
        name: &str,
        value: Option<String>,
        environment: &str,
    ) -> Result<String, BoxError> {
        let val = match value {
            Some(v) => v,
            None => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret(
                "JWT_SECRET",
                std::env::var("JWT_SECRET").ok(),
                &environment,
            )?,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_defaulted_in_development() {
        let val = Config::require_secret("JWT_SECRET", None, "development").unwrap();
        assert_eq!(val, "dev-JWT_SECRET-not-for-production");
    }

    #[test]
    fn missing_secret_is_rejected_in_production() {
        assert!(Config::require_secret("JWT_SECRET", None, "production").is_err());
        assert!(Config::require_secret("JWT_SECRET", Some(String::new()), "production").is_err());
    }

    #[test]
    fn present_secret_passes_through() {
        let val = Config::require_secret("JWT_SECRET", Some("s3cret".into()), "production").unwrap();
        assert_eq!(val, "s3cret");
    }
}
