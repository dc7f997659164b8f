use std::env::{self, VarError};
use std::net::SocketAddr;

use crate::error::{config_error, Error};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_APP_ROOT: &str = "/DigiPinCourierApp";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Path prefix every backend endpoint lives under, e.g. `/DigiPinCourierApp`.
    pub app_root: String,
    pub backend_url: String,
    pub geocoder_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            app_root: DEFAULT_APP_ROOT.into(),
            backend_url: DEFAULT_BACKEND_URL.into(),
            geocoder_url: DEFAULT_GEOCODER_URL.into(),
        }
    }
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let var = |name: &str, default: &str| -> Result<String, Error> {
            match lookup(name) {
                Ok(value) => Ok(value),
                Err(VarError::NotPresent) => Ok(default.to_string()),
                Err(err) => Err(err.into()),
            }
        };

        let bind_addr = var("COURIER_BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let bind_addr = bind_addr
            .parse()
            .map_err(|e| config_error(format!("{} is not a valid address: {}", bind_addr, e)))?;

        Ok(Self {
            bind_addr,
            app_root: normalize_root(&var("COURIER_APP_ROOT", DEFAULT_APP_ROOT)?),
            backend_url: var("COURIER_BACKEND_URL", DEFAULT_BACKEND_URL)?
                .trim_end_matches('/')
                .to_string(),
            geocoder_url: var("GEOCODER_URL", DEFAULT_GEOCODER_URL)?
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// `""`, `"/"` and `"app/"` become `""`, `""` and `"/app"`.
fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
