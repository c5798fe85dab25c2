//! Skill keyword table: lowercase keyword → display name, category and weight.
//!
//! The built-in table is embedded JSON; `SKILL_TABLE_PATH` swaps in a file with the
//! same shape at startup. A keyword declared twice keeps its first position and the
//! later declaration's values.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::text::tr_lowercase;

const BUILTIN_TABLE: &str = include_str!("skills.json");

/// Weight used when a keyword is not in the table.
pub const DEFAULT_WEIGHT: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub keyword: String,
    pub name: String,
    pub category: String,
    /// Importance, 1–10.
    pub weight: u8,
}

#[derive(Debug, Clone, Default)]
pub struct SkillTable {
    entries: Vec<SkillInfo>,
}

static BUILTIN: LazyLock<SkillTable> = LazyLock::new(|| {
    SkillTable::from_json(BUILTIN_TABLE).expect("Should compile: BUILTIN skill table")
});

impl SkillTable {
    pub fn from_json(raw: &str) -> Result<Self> {
        let declared: Vec<SkillInfo> =
            serde_json::from_str(raw).context("Skill table must be a JSON array of entries")?;

        let mut entries: Vec<SkillInfo> = Vec::with_capacity(declared.len());
        for mut info in declared {
            info.keyword = tr_lowercase(info.keyword.trim());
            if info.keyword.is_empty() {
                continue;
            }
            info.weight = info.weight.clamp(1, 10);
            match entries.iter_mut().find(|e| e.keyword == info.keyword) {
                Some(existing) => *existing = info,
                None => entries.push(info),
            }
        }
        Ok(Self { entries })
    }

    /// Reads a table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill table {}", path.display()))?;
        let table = Self::from_json(&raw)?;
        info!("Loaded {} skill keywords from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// The file at `path` when given and readable, else the built-in table.
    pub fn load_or_builtin(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load(p).unwrap_or_else(|e| {
                warn!("Falling back to built-in skill table: {e:#}");
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&SkillInfo> {
        let key = tr_lowercase(keyword.trim());
        self.entries.iter().find(|e| e.keyword == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for `keyword`, or the keyword itself when unknown.
    pub fn display_name(&self, keyword: &str) -> String {
        self.get(keyword)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| keyword.to_string())
    }

    pub fn weight(&self, keyword: &str) -> u8 {
        self.get(keyword).map_or(DEFAULT_WEIGHT, |s| s.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = SkillTable::builtin();
        assert!(table.len() > 30);
        assert_eq!(table.get("Python").map(|s| s.weight), Some(8));
        assert_eq!(table.display_name("react"), "React.js");
    }

    #[test]
    fn test_later_declaration_wins() {
        let table = SkillTable::builtin();
        let oracle = table.get("oracle").expect("oracle is declared");
        assert_eq!(oracle.name, "Oracle Database");
        assert_eq!(oracle.category, "Veritabanı");
        assert_eq!(table.iter().filter(|s| s.keyword == "oracle").count(), 1);
    }

    #[test]
    fn test_unknown_keyword_defaults() {
        let table = SkillTable::builtin();
        assert_eq!(table.display_name("cobol"), "cobol");
        assert_eq!(table.weight("cobol"), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_from_json_normalizes_keywords() {
        let table = SkillTable::from_json(
            r#"[{"keyword":" İZMİR ","name":"İzmir","category":"Şehir","weight":42}]"#,
        )
        .unwrap();
        let entry = table.get("izmir").unwrap();
        assert_eq!(entry.weight, 10);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SkillTable::from_json("{\"not\":\"a list\"}").is_err());
    }

    #[test]
    fn test_load_or_builtin_missing_file() {
        let table = SkillTable::load_or_builtin(Some("/definitely/not/here.json"));
        assert_eq!(table.len(), SkillTable::builtin().len());
    }
}
