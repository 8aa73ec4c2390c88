//! Translation namespaces: the closed set of resource documents the site knows.
//!
//! Every user-facing string lives in exactly one namespace, and each namespace
//! maps one-to-one onto a JSON document under `public/locales/de/`. The set is
//! closed on purpose: loading is only defined for the members below, so a typo
//! in a page can never silently fetch a document that does not exist. Foreign
//! input (file names, URL segments) enters through [`Namespace::from_code`].

use anyhow::{bail, Result};
use std::fmt;

/// A translation namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Strings shared across all pages (`common.json`)
    Common,
    /// Site navigation labels (`navigation.json`)
    Navigation,
    /// Contact form labels and validation messages (`forms.json`)
    Forms,
    /// Product page strings (`products.json`)
    Products,
}

impl Namespace {
    /// Every supported namespace, in the order the request hook loads them.
    pub const ALL: [Namespace; 4] = [
        Namespace::Common,
        Namespace::Navigation,
        Namespace::Forms,
        Namespace::Products,
    ];

    /// Resolve a namespace from its wire name.
    ///
    /// # Arguments
    /// * `code` - The namespace name as it appears in file names and URLs
    ///
    /// # Returns
    /// * `Ok(Namespace)` if the code names a supported namespace
    /// * `Err` for anything outside the closed set
    pub fn from_code(code: &str) -> Result<Namespace> {
        match code {
            "common" => Ok(Namespace::Common),
            "navigation" => Ok(Namespace::Navigation),
            "forms" => Ok(Namespace::Forms),
            "products" => Ok(Namespace::Products),
            _ => bail!("Unknown translation namespace: '{}'", code),
        }
    }

    /// The name used in file paths, URLs and merged message keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Common => "common",
            Namespace::Navigation => "navigation",
            Namespace::Forms => "forms",
            Namespace::Products => "products",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
