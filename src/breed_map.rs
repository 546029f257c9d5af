use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};

use crate::parser::document::{Document, Predicate};
use crate::parser::selector::{Locator, Step};

pub type BreedId = u32;

/// Breed id → display name, in the order the site lists them.
#[derive(Debug, Clone, Default)]
pub struct BreedMap {
    entries: Vec<(BreedId, String)>,
    index: HashMap<BreedId, usize>,
}

impl BreedMap {
    pub fn from_entries(entries: impl IntoIterator<Item = (BreedId, String)>) -> Self {
        let mut map = Self::default();
        for (id, name) in entries {
            map.insert(id, name);
        }
        map
    }

    fn insert(&mut self, id: BreedId, name: String) {
        match self.index.get(&id) {
            Some(&i) => self.entries[i].1 = name,
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push((id, name));
            }
        }
    }

    pub fn name(&self, id: BreedId) -> Option<&str> {
        self.index.get(&id).map(|&i| self.entries[i].1.as_str())
    }

    pub fn ids(&self) -> Vec<BreedId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `{"<id>": "<name>", ...}`, keeping key order.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json).context("Breed map is not a JSON object")?;
        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let id: BreedId = key
                .trim()
                .parse()
                .with_context(|| format!("Breed id `{}` is not an integer", key))?;
            let name = value
                .as_str()
                .ok_or_else(|| anyhow!("Name for breed {} is not a string", id))?;
            entries.push((id, name.to_string()));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn to_json(&self) -> Result<String> {
        let obj: Map<String, Value> = self
            .entries
            .iter()
            .map(|(id, name)| (id.to_string(), Value::String(name.clone())))
            .collect();
        Ok(serde_json::to_string_pretty(&obj)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).with_context(|| format!("Failed to write {:?}", path))
    }
}

/// Breed picker on the compare page:
/// `.breed-comparison-wrap-fixed > div:nth-child(1) > div:nth-child(1) > div:nth-child(2) > div:nth-child(2) > div:nth-child(2)`
fn picker_locator() -> Locator {
    let div = |n| Step::Child(Predicate::tag("div").nth_child(n));
    Locator {
        anchor: Predicate::class("breed-comparison-wrap-fixed"),
        steps: vec![div(1), div(1), div(2), div(2), div(2)],
    }
}

/// Read every `data-id`/`data-title` option out of the compare page picker.
pub fn scrape_breed_map(doc: &Document) -> Result<BreedMap> {
    let picker = picker_locator()
        .resolve(doc)
        .ok_or_else(|| anyhow!("Breed picker not found on compare page"))?;

    let entries = picker
        .element_children()
        .filter_map(|opt| {
            let id = opt.attr("data-id")?.trim().parse::<BreedId>().ok()?;
            let title = opt.attr("data-title")?;
            Some((id, title.to_string()))
        })
        .collect::<Vec<_>>();

    if entries.is_empty() {
        return Err(anyhow!("Breed picker has no entries"));
    }
    Ok(BreedMap::from_entries(entries))
}
