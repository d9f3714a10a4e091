use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::RouterResult;
use crate::router::RouteDefinition;

use super::parse_route_config;

// Registered under the camelized key: a server-side `about-us` slug resolves
// to `aboutUs`.
pub const ROUTE_NAME: &str = "aboutUs";

/// Creates the about page route.
pub fn create_about_route(cfg: YamlValue) -> RouterResult<RouteDefinition> {
    let config: RouteConfig = parse_route_config(cfg, "Invalid about route config")?;
    let team = config.team;

    Ok(RouteDefinition::new()
        .on_init(move || {
            match &team {
                Some(team) => log::info!("about: maintained by the {team} team"),
                None => log::info!("about: init"),
            }
            Ok(())
        })
        .on_finalize(|| {
            log::debug!("about: finalize");
            Ok(())
        }))
}

/// Options for the about route.
#[derive(Default, Debug, Serialize, Deserialize)]
struct RouteConfig {
    team: Option<String>,
}
