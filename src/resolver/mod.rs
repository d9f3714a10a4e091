//! Page identifier resolution.
//!
//! A [`PageResolver`] reads the current page's identifier from the host
//! environment, typically a designated attribute on the document's `<body>`
//! element. Resolvers know nothing about the route table; an absent
//! identifier resolves to `None` and means common-only dispatch, never an
//! error.

use log::debug;
use regex::Regex;

use crate::core::{ErrorContext, RouterResult};

/// Source of the current page identifier.
pub trait PageResolver {
    /// Read the identifier from the environment. `None` means no
    /// page-specific route participates in dispatch.
    fn resolve(&self) -> Option<String>;
}

/// Resolver backed by the server-rendered markup: extracts a designated
/// attribute from the document's `<body>` tag and normalizes it with
/// [`camelize`], so a server-side `data-page="about-us"` selects the
/// `aboutUs` route.
pub struct BodyAttribute {
    markup: String,
    pattern: Regex,
}

impl BodyAttribute {
    pub fn new(markup: impl Into<String>, attribute: &str) -> RouterResult<Self> {
        let pattern = Regex::new(&format!(
            r#"(?is)<body\b[^>]*?\s{}\s*=\s*["']([^"']*)["']"#,
            regex::escape(attribute)
        ))
        .with_context("Invalid page attribute pattern")?;

        Ok(Self {
            markup: markup.into(),
            pattern,
        })
    }
}

impl PageResolver for BodyAttribute {
    fn resolve(&self) -> Option<String> {
        let raw = self.pattern.captures(&self.markup)?.get(1)?.as_str().trim();
        if raw.is_empty() {
            return None;
        }

        let token = camelize(raw);
        debug!("Resolved page identifier '{token}' from raw value '{raw}'");
        Some(token)
    }
}

/// Resolver with a preconfigured identifier. Lets hosts that already know
/// the current page skip document parsing, and keeps the router testable
/// without a live document.
pub struct Fixed {
    identifier: Option<String>,
}

impl Fixed {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    /// A resolver that never yields an identifier.
    pub fn none() -> Self {
        Self { identifier: None }
    }
}

impl PageResolver for Fixed {
    fn resolve(&self) -> Option<String> {
        self.identifier.clone()
    }
}

/// Normalize a server-side page slug to the camelCase form used as a route
/// key: `about-us` becomes `aboutUs`, `about_us` likewise.
pub fn camelize(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut upper_next = false;
    for ch in token.chars() {
        if ch == '-' || ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
