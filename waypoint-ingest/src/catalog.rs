//! Destination catalog loaded from a CSV export (`id,name,category[,city]`).

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use waypoint_core::DestinationLookup;

use crate::types::Destination;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: HashMap<String, Destination>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("opening {}", path.as_ref().display()))?;
        Self::from_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut catalog = Catalog::new();
        for (i, result) in rdr.deserialize::<Destination>().enumerate() {
            let dest = result.with_context(|| format!("line {}: malformed destination", i + 2))?;
            if dest.id.is_empty() {
                continue;
            }
            catalog.insert(dest);
        }
        tracing::debug!(destinations = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Insert or replace by id.
    pub fn insert(&mut self, dest: Destination) {
        self.destinations.insert(dest.id.clone(), dest);
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.get(id)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl DestinationLookup for Catalog {
    fn category_of(&self, destination_id: &str) -> Option<String> {
        self.get(destination_id)
            .map(|d| d.category.clone())
            .filter(|c| !c.trim().is_empty())
    }
}
