use std::fs;

use domroute::config::Config;
use domroute::logging;
use domroute::resolver::BodyAttribute;
use domroute::router::{RouteTable, Router, COMMON_ROUTE};
use domroute::routes;

fn main() {
    // Read command-line arguments
    let conf_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    // Load configuration
    let config = Config::load_from_yaml(&conf_path).expect("Failed to load configuration");

    // Initialize logging
    logging::init(&config.log);

    // Populate the route table: the reserved common route first, then the
    // configured page routes in order
    log::info!("Loading routes...");
    let mut table = RouteTable::new();
    let common =
        routes::build_route(COMMON_ROUTE, config.common.clone()).expect("Failed to build common route");
    table
        .insert(COMMON_ROUTE, common)
        .expect("Failed to register common route");

    for page in &config.pages {
        log::info!("Loading route: {}", page.name);
        let route =
            routes::build_route(&page.name, page.config.clone()).expect("Failed to build route");
        table
            .insert(page.name.clone(), route)
            .expect("Failed to register route");
    }

    let router = Router::new(table).expect("Failed to initialize router");

    // The document is fully parsed once the read completes; this stands in
    // for the host's document-ready signal
    let markup = fs::read_to_string(&config.document).expect("Failed to read document");
    let resolver =
        BodyAttribute::new(markup, &config.page_attribute).expect("Failed to build resolver");

    log::info!("Dispatching...");
    router.dispatch(&resolver).expect("Dispatch failed");
}
