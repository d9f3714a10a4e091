use std::fmt;
use std::fs;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use validator::{Validate, ValidationError};

use crate::core::{ErrorContext, RouterResult};
use crate::router::COMMON_ROUTE;

/// Host configuration: which document to read, where the page identifier
/// lives, and which page routes to enable.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Path to the server-rendered document handed to the resolver.
    pub document: String,

    /// Body attribute carrying the page identifier.
    #[serde(default = "Config::default_page_attribute")]
    pub page_attribute: String,

    #[serde(default)]
    pub log: Log,

    /// Options for the always-enabled common route.
    #[serde(default)]
    pub common: YamlValue,

    /// Page-specific routes to enable, in order.
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub pages: Vec<Page>,
}

// Config file load and validation
impl Config {
    fn default_page_attribute() -> String {
        "data-page".to_string()
    }

    pub fn load_from_yaml<P>(path: P) -> RouterResult<Self>
    where
        P: AsRef<std::path::Path> + fmt::Display,
    {
        let conf_str = fs::read_to_string(&path)
            .with_context(&format!("Unable to read conf file from {path}"))?;
        debug!("Conf file read from {path}");
        Self::from_yaml(&conf_str)
    }

    pub fn from_yaml(conf_str: &str) -> RouterResult<Self> {
        trace!("Read conf file: {conf_str}");
        let conf: Config =
            serde_yaml::from_str(conf_str).with_context("Unable to parse yaml conf")?;

        trace!("Loaded conf: {conf:?}");

        // use validator to validate conf file
        conf.validate().with_context("Conf file validation failed")?;

        Ok(conf)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[validate(schema(function = "Page::validate_name_not_reserved"))]
pub struct Page {
    /// Route key the page identifier must match; also the registry name the
    /// route definition is built from.
    #[validate(length(min = 1))]
    pub name: String,

    /// Opaque per-route options handed to the route factory.
    #[serde(default)]
    pub config: YamlValue,
}

impl Page {
    fn validate_name_not_reserved(&self) -> Result<(), ValidationError> {
        // The common route is always enabled; listing it as a page would
        // make it dispatch twice.
        if self.name == COMMON_ROUTE {
            Err(ValidationError::new("common_route_reserved"))
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Log {
    /// Level filter applied when RUST_LOG is not set.
    pub level: Option<String>,
}
