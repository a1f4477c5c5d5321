//! Environment-derived configuration

use anyhow::{bail, Context};

/// Runtime configuration collected once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub image_host: Option<ImageHostConfig>,
}

/// Credentials for the external image host (Cloudinary-style API)
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_preset: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Refuses to start without a signing secret or database URL.
    /// Image host credentials are optional; uploads fail closed when
    /// they are absent.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(v) if !v.is_empty() => v,
            _ => bail!("JWT_SECRET must be set"),
        };
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(v) if !v.is_empty() => v,
            _ => bail!("DATABASE_URL must be set"),
        };

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("PORT must be a number")?;

        let image_host = match (
            std::env::var("CLOUDINARY_CLOUD_NAME"),
            std::env::var("CLOUDINARY_API_KEY"),
            std::env::var("CLOUDINARY_API_SECRET"),
            std::env::var("CLOUDINARY_UPLOAD_PRESET"),
        ) {
            (Ok(cloud_name), Ok(api_key), Ok(api_secret), Ok(upload_preset)) => {
                Some(ImageHostConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    upload_preset,
                })
            }
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            image_host,
        })
    }
}
