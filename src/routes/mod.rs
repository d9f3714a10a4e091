pub mod about;
pub mod common;
pub mod home;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_yaml::Value as YamlValue;

use crate::core::{ErrorContext, RouterError, RouterResult};
use crate::router::RouteDefinition;

/// Factory signature for bundled route builders.
pub type RouteCreateFn = fn(YamlValue) -> RouterResult<RouteDefinition>;

/// Global registry mapping route names to their factory functions.
static ROUTE_BUILDER_REGISTRY: Lazy<HashMap<&'static str, RouteCreateFn>> = Lazy::new(|| {
    let arr: Vec<(&str, RouteCreateFn)> = vec![
        (common::ROUTE_NAME, common::create_common_route),
        (home::ROUTE_NAME, home::create_home_route),
        (about::ROUTE_NAME, about::create_about_route),
    ];
    arr.into_iter().collect()
});

/// Creates a route definition from configuration using a factory pattern.
///
/// Looks up the route builder in the global registry and invokes it with the
/// provided options. Fails fast for unknown route names.
pub fn build_route(name: &str, cfg: YamlValue) -> RouterResult<RouteDefinition> {
    let builder = ROUTE_BUILDER_REGISTRY
        .get(name)
        .ok_or_else(|| RouterError::Configuration(format!("Unknown route type '{name}'")))?;
    builder(cfg)
}

/// Deserialize per-route options; an absent `config` section arrives as
/// `Null` and yields the defaults.
pub(crate) fn parse_route_config<T>(cfg: YamlValue, context: &str) -> RouterResult<T>
where
    T: DeserializeOwned + Default,
{
    if cfg.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(cfg).with_context(context)
}
