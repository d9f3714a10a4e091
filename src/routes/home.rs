use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::RouterResult;
use crate::router::RouteDefinition;

use super::parse_route_config;

pub const ROUTE_NAME: &str = "home";

/// Creates the home page route.
pub fn create_home_route(cfg: YamlValue) -> RouterResult<RouteDefinition> {
    let config: RouteConfig = parse_route_config(cfg, "Invalid home route config")?;

    Ok(RouteDefinition::new().on_init(move || {
        log::info!("home: {}", config.headline);
        Ok(())
    }))
}

/// Options for the home route.
#[derive(Debug, Serialize, Deserialize)]
struct RouteConfig {
    #[serde(default = "RouteConfig::default_headline")]
    headline: String,
}

impl RouteConfig {
    fn default_headline() -> String {
        "welcome".to_string()
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            headline: Self::default_headline(),
        }
    }
}
