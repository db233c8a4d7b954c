//! Icon and emoji tables.
//!
//! Both tables are flat maps from a dotted semantic key (`"clear.day"`,
//! `"clock.3"`, `"wind_dir.up_right"`) to the string that gets printed.
//! They are loaded once, checked for completeness, and then only read.

use std::{collections::HashMap, fs, path::Path};

use crate::{
    error::{Result, WttrError},
    lookup,
};

const BUILTIN_ICONS: &str = include_str!("../resources/icons.json");
const BUILTIN_EMOJIS: &str = include_str!("../resources/emojis.json");

#[derive(Debug, Clone)]
pub struct GlyphTable {
    name: &'static str,
    entries: HashMap<String, String>,
}

impl GlyphTable {
    pub fn from_json(name: &'static str, json: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| WttrError::Resource(format!("{name} table is not valid JSON: {e}")))?;

        Ok(Self { name, entries })
    }

    fn from_file(name: &'static str, path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            WttrError::Resource(format!("failed to open {name} table {}: {e}", path.display()))
        })?;

        log::info!("using {name} table from {}", path.display());
        Self::from_json(name, &json)
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| WttrError::Resource(format!("{} table has no '{key}' entry", self.name)))
    }

    fn check(&self, keys: impl IntoIterator<Item = String>) -> Result<()> {
        let mut missing: Vec<String> =
            keys.into_iter().filter(|k| !self.entries.contains_key(k)).collect();

        if missing.is_empty() {
            return Ok(());
        }

        missing.sort();
        missing.dedup();
        Err(WttrError::Resource(format!("{} table is missing: {}", self.name, missing.join(", "))))
    }
}

/// The pair of tables every formatter draws from.
#[derive(Debug, Clone)]
pub struct Glyphs {
    icons: GlyphTable,
    emojis: GlyphTable,
}

impl Glyphs {
    /// Tables compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::new(
            GlyphTable::from_json("icons", BUILTIN_ICONS)?,
            GlyphTable::from_json("emojis", BUILTIN_EMOJIS)?,
        )
    }

    /// Built-in tables, each optionally replaced by a file on disk.
    pub fn load(icons_path: Option<&Path>, emojis_path: Option<&Path>) -> Result<Self> {
        let icons = match icons_path {
            Some(path) => GlyphTable::from_file("icons", path)?,
            None => GlyphTable::from_json("icons", BUILTIN_ICONS)?,
        };
        let emojis = match emojis_path {
            Some(path) => GlyphTable::from_file("emojis", path)?,
            None => GlyphTable::from_json("emojis", BUILTIN_EMOJIS)?,
        };

        Self::new(icons, emojis)
    }

    /// Rejects tables that lack any key a lookup can ask for.
    pub fn new(icons: GlyphTable, emojis: GlyphTable) -> Result<Self> {
        icons.check(lookup::required_keys(false))?;
        emojis.check(lookup::required_keys(true))?;
        Ok(Self { icons, emojis })
    }

    pub fn table(&self, emoji: bool) -> &GlyphTable {
        if emoji { &self.emojis } else { &self.icons }
    }

    pub fn icons(&self) -> &GlyphTable {
        &self.icons
    }

    pub fn emojis(&self) -> &GlyphTable {
        &self.emojis
    }

    /// Degree sign appended to temperatures, angles and coordinates.
    pub fn degree(&self) -> Result<&str> {
        self.emojis.get("degree")
    }
}
