use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub api_key: Option<String>,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            api_key: load_api_key(),
            data_dir: try_load("RECIPES_DATA_DIR", "recipe_data"),
        }
    }
}

fn load_api_key() -> Option<String> {
    let key = env::var("SPOONACULAR_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    if key.is_none() {
        warn!("SPOONACULAR_API_KEY not set, remote search will be unavailable");
    }

    key
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
