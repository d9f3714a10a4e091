use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::RouterResult;
use crate::router::RouteDefinition;

use super::parse_route_config;

pub const ROUTE_NAME: &str = "common";

/// Creates the route that runs on every page, ahead of any page-specific
/// route.
pub fn create_common_route(cfg: YamlValue) -> RouterResult<RouteDefinition> {
    let config: RouteConfig = parse_route_config(cfg, "Invalid common route config")?;
    let site = config.site;

    Ok(RouteDefinition::new()
        .on_init(move || {
            match &site {
                Some(site) => log::info!("[{site}] page loaded"),
                None => log::info!("page loaded"),
            }
            Ok(())
        })
        .on_finalize(|| {
            log::info!("page unloading");
            Ok(())
        }))
}

/// Options for the common route.
#[derive(Default, Debug, Serialize, Deserialize)]
struct RouteConfig {
    /// Site name included in every lifecycle log line.
    site: Option<String>,
}
