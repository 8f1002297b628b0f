//! Product mapping configuration
//!
//! The product table is an operator-maintained mapping from provider product
//! ids to repository resource ids. It is injected into webhook ingestion as
//! a value, so deployments and tests can swap it without a rebuild.

use serde::Deserialize;
use std::collections::HashMap;

use super::error::ValidationError;
use super::server::Environment;

/// Product mapping configuration
///
/// The table arrives as one JSON object in the environment, e.g.
/// `{"1": "com/example/product1", "2": "com/example/product2"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsConfig {
    /// JSON object mapping provider product id to resource id
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
        }
    }
}

impl ProductsConfig {
    /// Parse the configured table into a [`ProductMap`].
    pub fn parse(&self) -> Result<ProductMap, ValidationError> {
        let raw: HashMap<String, String> = serde_json::from_str(&self.table)
            .map_err(|e| ValidationError::InvalidProductTable(e.to_string()))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (id, resource) in raw {
            let id: i64 = id
                .parse()
                .map_err(|_| ValidationError::InvalidProductTable(format!("non-numeric id '{}'", id)))?;
            entries.insert(id, resource);
        }
        Ok(ProductMap { entries })
    }

    /// Validate products configuration
    ///
    /// An empty table is allowed in development (nothing maps, every paid
    /// event alerts) but is a startup error in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let map = self.parse()?;
        if map.is_empty() && *environment == Environment::Production {
            return Err(ValidationError::EmptyProductTable);
        }
        Ok(())
    }
}

fn default_table() -> String {
    "{}".to_string()
}

/// Static product id to resource id table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMap {
    entries: HashMap<i64, String>,
}

impl ProductMap {
    /// Build a map directly from entries (used by tests and embedding code).
    pub fn from_entries(entries: impl IntoIterator<Item = (i64, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resource id for a product, if mapped.
    pub fn resource_for(&self, product_id: i64) -> Option<&str> {
        self.entries.get(&product_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
