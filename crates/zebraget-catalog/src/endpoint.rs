//! # Server Endpoint
//!
//! Base address of the product server, normalized for path joining.
//!
//! ```text
//! "http://h:3000"      ──normalize──►  "http://h:3000/"  ──join──►  http://h:3000/products
//! "http://h:3000/"     ──normalize──►  "http://h:3000/"  ──join──►  http://h:3000/products
//! "http://h:3000/api"  ──normalize──►  "http://h:3000/api/" ─join─► http://h:3000/api/products
//! ```
//!
//! Without the trailing slash, `Url::join` would replace the last path segment
//! (`/api` + `products` → `/products`).

use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Path of the product resource relative to the base.
pub const PRODUCTS_PATH: &str = "products";

/// Appends a trailing `/` if missing.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// A validated, normalized server base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parses and normalizes a base address.
    ///
    /// Only `http` and `https` are accepted.
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        let base = Url::parse(&normalize_base_url(raw))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(format!(
                "Server URL must start with http:// or https://, got: {}",
                raw
            )));
        }

        Ok(Endpoint { base })
    }

    /// The normalized base address (always ends with `/`).
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of the product list.
    pub fn products_url(&self) -> CatalogResult<Url> {
        Ok(self.base.join(PRODUCTS_PATH)?)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::parse(s)
    }
}
