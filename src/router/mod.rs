//! Route dispatch engine.
//!
//! A [`Router`] owns an ordered table of named routes and, on dispatch,
//! resolves the current page identifier and runs the matching routes'
//! lifecycle functions: the reserved `common` route always runs first, then
//! the page-specific route when the identifier matches a table key.
//!
//! The table is immutable once handed to the router. For a fixed table and a
//! fixed resolved identifier the selected sequence and invocation order are
//! identical on every call.

use std::fmt;

use log::{debug, warn};

use crate::core::{HandlerError, Phase, RouterError, RouterResult};
use crate::resolver::PageResolver;

/// Reserved route key invoked on every page, ahead of any page-specific route.
pub const COMMON_ROUTE: &str = "common";

/// Lifecycle function attached to a route. Runs synchronously within the
/// dispatch turn; an `Err` aborts the remaining sequence.
pub type LifecycleFn = Box<dyn Fn() -> Result<(), HandlerError> + Send + Sync>;

/// A named bundle of lifecycle functions. Both phases are optional; a
/// definition with neither is legal and dispatches as a no-op.
#[derive(Default)]
pub struct RouteDefinition {
    init: Option<LifecycleFn>,
    finalize: Option<LifecycleFn>,
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the function run when the route is selected for dispatch.
    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }

    /// Attach the teardown function. Never called by [`Router::dispatch`];
    /// only [`Router::dispatch_teardown`] runs it.
    pub fn on_finalize<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.finalize = Some(Box::new(f));
        self
    }

    pub fn has_init(&self) -> bool {
        self.init.is_some()
    }

    pub fn has_finalize(&self) -> bool {
        self.finalize.is_some()
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("init", &self.init.is_some())
            .field("finalize", &self.finalize.is_some())
            .finish()
    }
}

/// Insertion-ordered mapping from route name to [`RouteDefinition`].
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<(String, RouteDefinition)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route under `name`. Page keys are mutually exclusive, so a
    /// duplicate key is a configuration error.
    pub fn insert(&mut self, name: impl Into<String>, route: RouteDefinition) -> RouterResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(RouterError::Configuration(format!(
                "Duplicate route key '{name}'"
            )));
        }
        self.entries.push((name, route));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.entry(name).map(|(_, route)| route)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Option<(&str, &RouteDefinition)> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(key, route)| (key.as_str(), route))
    }
}

/// One-shot dispatcher over an immutable [`RouteTable`].
pub struct Router {
    table: RouteTable,
}

impl Router {
    /// Stores the table as provided. The reserved common entry must be
    /// present; a table without it fails fast here, before any dispatch.
    pub fn new(table: RouteTable) -> RouterResult<Self> {
        if !table.contains(COMMON_ROUTE) {
            return Err(RouterError::Configuration(format!(
                "Route table is missing the reserved '{COMMON_ROUTE}' entry"
            )));
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve the current page identifier and run `init` for the selected
    /// routes in order: common first, then the page-specific route when the
    /// identifier matches a table key. No match is not an error; only the
    /// common route runs.
    ///
    /// Handler errors are not isolated: the first `Err` propagates to the
    /// caller and any remaining route in the sequence is skipped.
    pub fn dispatch(&self, resolver: &dyn PageResolver) -> RouterResult<()> {
        for (name, route) in self.select(resolver) {
            if let Some(init) = &route.init {
                debug!("Running init for route '{name}'");
                init().map_err(|source| RouterError::Handler {
                    route: name.to_string(),
                    phase: Phase::Init,
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Teardown counterpart of [`dispatch`](Self::dispatch) for hosts with a
    /// page-unload phase: runs `finalize` for the same selected routes in
    /// reverse order, page-specific first and common last, to mirror the
    /// init nesting. Same skip and propagation rules as `dispatch`.
    pub fn dispatch_teardown(&self, resolver: &dyn PageResolver) -> RouterResult<()> {
        let mut selected = self.select(resolver);
        selected.reverse();
        for (name, route) in selected {
            if let Some(finalize) = &route.finalize {
                debug!("Running finalize for route '{name}'");
                finalize().map_err(|source| RouterError::Handler {
                    route: name.to_string(),
                    phase: Phase::Finalize,
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Build the ordered selection for one dispatch: `[common, page?]`.
    /// The identifier is read fresh from the resolver on every call.
    fn select(&self, resolver: &dyn PageResolver) -> Vec<(&str, &RouteDefinition)> {
        let mut selected = Vec::with_capacity(2);
        if let Some(common) = self.table.entry(COMMON_ROUTE) {
            selected.push(common);
        }

        match resolver.resolve() {
            Some(page) if page == COMMON_ROUTE => {
                // The reserved key is not a valid page identifier; running
                // common twice would break the once-per-dispatch guarantee.
                warn!("Page identifier collides with the reserved '{COMMON_ROUTE}' key, ignoring");
            }
            Some(page) => match self.table.entry(&page) {
                Some(entry) => selected.push(entry),
                None => debug!("No route registered for page '{page}'"),
            },
            None => debug!("No page identifier present, common-only dispatch"),
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::resolver::Fixed;

    type CallLog = Arc<Mutex<Vec<String>>>;

    fn recording_init(calls: &CallLog, tag: &str) -> RouteDefinition {
        let calls = Arc::clone(calls);
        let tag = tag.to_string();
        RouteDefinition::new().on_init(move || {
            calls.lock().unwrap().push(tag.clone());
            Ok(())
        })
    }

    fn recording_finalize(calls: &CallLog, tag: &str) -> RouteDefinition {
        let calls = Arc::clone(calls);
        let tag = tag.to_string();
        RouteDefinition::new().on_finalize(move || {
            calls.lock().unwrap().push(tag.clone());
            Ok(())
        })
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_common_only_table_runs_common_once() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "f1")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new("home")).unwrap();
        assert_eq!(calls(&log), vec!["f1"]);

        router.dispatch(&Fixed::none()).unwrap();
        assert_eq!(calls(&log), vec!["f1", "f1"]);
    }

    #[test]
    fn test_common_runs_before_page_specific() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "common")).unwrap();
        table.insert("home", recording_init(&log, "home")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new("home")).unwrap();
        assert_eq!(calls(&log), vec!["common", "home"]);
    }

    #[test]
    fn test_unmatched_identifier_runs_common_only() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "common")).unwrap();
        table.insert("home", recording_init(&log, "home")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new("about")).unwrap();
        assert_eq!(calls(&log), vec!["common"]);
    }

    #[test]
    fn test_route_without_init_is_skipped() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "common")).unwrap();
        table.insert("home", RouteDefinition::new()).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new("home")).unwrap();
        assert_eq!(calls(&log), vec!["common"]);
    }

    #[test]
    fn test_missing_common_entry_fails_construction() {
        let mut table = RouteTable::new();
        table.insert("home", RouteDefinition::new()).unwrap();

        match Router::new(table) {
            Err(RouterError::Configuration(msg)) => {
                assert!(msg.contains("common"), "unexpected message: {msg}");
            }
            Ok(_) => panic!("construction should fail without a common route"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failing_common_init_skips_page_specific() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table
            .insert(
                COMMON_ROUTE,
                RouteDefinition::new().on_init(|| Err("boom".into())),
            )
            .unwrap();
        table.insert("home", recording_init(&log, "home")).unwrap();
        let router = Router::new(table).unwrap();

        let err = router.dispatch(&Fixed::new("home")).unwrap_err();
        match err {
            RouterError::Handler {
                route,
                phase,
                source,
            } => {
                assert_eq!(route, COMMON_ROUTE);
                assert_eq!(phase, Phase::Init);
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn test_three_route_table_dispatch_order() {
        // common: f1, home: f2, aboutUs: f3; identifier aboutUs => [f1, f3]
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "f1")).unwrap();
        table.insert("home", recording_init(&log, "f2")).unwrap();
        table.insert("aboutUs", recording_init(&log, "f3")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new("aboutUs")).unwrap();
        assert_eq!(calls(&log), vec!["f1", "f3"]);
    }

    #[test]
    fn test_dispatch_never_runs_finalize() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table
            .insert(COMMON_ROUTE, recording_finalize(&log, "common"))
            .unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::none()).unwrap();
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn test_teardown_runs_page_specific_before_common() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table
            .insert(COMMON_ROUTE, recording_finalize(&log, "common"))
            .unwrap();
        table.insert("home", recording_finalize(&log, "home")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch_teardown(&Fixed::new("home")).unwrap();
        assert_eq!(calls(&log), vec!["home", "common"]);
    }

    #[test]
    fn test_identifier_matching_reserved_key_is_ignored() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "common")).unwrap();
        let router = Router::new(table).unwrap();

        router.dispatch(&Fixed::new(COMMON_ROUTE)).unwrap();
        assert_eq!(calls(&log), vec!["common"]);
    }

    #[test]
    fn test_duplicate_route_key_is_rejected() {
        let mut table = RouteTable::new();
        table.insert("home", RouteDefinition::new()).unwrap();

        match table.insert("home", RouteDefinition::new()) {
            Err(RouterError::Configuration(msg)) => {
                assert!(msg.contains("home"), "unexpected message: {msg}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_is_deterministic_across_calls() {
        let log = CallLog::default();
        let mut table = RouteTable::new();
        table.insert(COMMON_ROUTE, recording_init(&log, "f1")).unwrap();
        table.insert("home", recording_init(&log, "f2")).unwrap();
        let router = Router::new(table).unwrap();

        let resolver = Fixed::new("home");
        router.dispatch(&resolver).unwrap();
        router.dispatch(&resolver).unwrap();
        assert_eq!(calls(&log), vec!["f1", "f2", "f1", "f2"]);
    }
}
