//! RON catalog loader

use crate::error::{Error, Result};
use crate::schema::{AchievementFile, ToolFile};
use std::fs;
use std::path::Path;
use vibebuff_core::{AchievementDef, AchievementId, ToolId, ToolSnapshot};

/// Loaded catalog data
#[derive(Debug, Default)]
pub struct Catalog {
    /// Achievement definitions, in file order
    pub achievements: Vec<AchievementDef>,
    /// Tool seeds, in file order
    pub tools: Vec<ToolSnapshot>,
}

impl Catalog {
    /// Look up an achievement by slug
    pub fn achievement(&self, slug: &AchievementId) -> Option<&AchievementDef> {
        self.achievements.iter().find(|def| &def.slug == slug)
    }

    /// Look up a tool by id
    pub fn tool(&self, id: &ToolId) -> Option<&ToolSnapshot> {
        self.tools.iter().find(|tool| &tool.id == id)
    }
}

/// Loader for RON catalog files
///
/// Tool entries carry relative freshness, so the loader is constructed
/// with the timestamp to resolve them against.
pub struct Loader {
    now_ms: i64,
    catalog: Catalog,
}

impl Loader {
    /// Create a new loader resolving freshness against `now_ms`
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms,
            catalog: Catalog::default(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        // Determine the type from the filename or the top-level field
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filename.contains("achievement") || content.contains("achievements:") {
            self.load_achievements_str(&content)
        } else if filename.contains("tool") || content.contains("tools:") {
            self.load_tools_str(&content)
        } else {
            Err(Error::InvalidCatalog(format!(
                "could not determine catalog type of {:?}",
                path
            )))
        }
    }

    /// Load achievements from a RON string
    pub fn load_achievements_str(&mut self, content: &str) -> Result<()> {
        let file: AchievementFile = ron::from_str(content)?;
        for entry in file.achievements {
            let def = entry.into_def();
            if self.catalog.achievement(&def.slug).is_some() {
                return Err(Error::DuplicateDefinition(def.slug.to_string()));
            }
            self.catalog.achievements.push(def);
        }
        Ok(())
    }

    /// Load tools from a RON string
    pub fn load_tools_str(&mut self, content: &str) -> Result<()> {
        let file: ToolFile = ron::from_str(content)?;
        for entry in file.tools {
            let tool = entry.into_snapshot(self.now_ms);
            if self.catalog.tool(&tool.id).is_some() {
                return Err(Error::DuplicateDefinition(tool.id.to_string()));
            }
            self.catalog.tools.push(tool);
        }
        Ok(())
    }

    /// Load all RON files from a directory, recursively
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the catalog
    pub fn finish(self) -> Catalog {
        self.catalog
    }
}

/// The catalog data files compiled into this crate
pub fn builtin(now_ms: i64) -> Result<Catalog> {
    let mut loader = Loader::new(now_ms);
    loader.load_achievements_str(include_str!("../data/achievements.ron"))?;
    loader.load_tools_str(include_str!("../data/tools.ron"))?;
    Ok(loader.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibebuff_core::{ActionType, PowerLevel, Rarity};

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_load_achievements() {
        let content = r#"
        (
            achievements: [
                (
                    slug: "first-blood",
                    name: "First Blood",
                    description: "Win your first battle",
                    icon: "swords",
                    category: mastery,
                    action: battles_won,
                    threshold: 1,
                    xp_reward: 100,
                    rarity: common,
                ),
                (
                    slug: "battle-veteran",
                    name: "Battle Veteran",
                    description: "Win 10 battles",
                    icon: "shield",
                    category: mastery,
                    action: battles_won,
                    threshold: 10,
                    xp_reward: 400,
                    rarity: uncommon,
                ),
            ]
        )
        "#;

        let mut loader = Loader::new(NOW);
        loader.load_achievements_str(content).unwrap();

        let catalog = loader.finish();
        assert_eq!(catalog.achievements.len(), 2);
        let veteran = catalog
            .achievement(&AchievementId::new("battle-veteran"))
            .unwrap();
        assert_eq!(veteran.requirement.threshold, 10);
        assert_eq!(veteran.rarity, Rarity::Uncommon);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let content = r#"
        (
            achievements: [
                (slug: "dup", name: "Dup", category: mastery, action: battles_won,
                 threshold: 1, xp_reward: 10, rarity: common),
                (slug: "dup", name: "Dup Again", category: mastery, action: battles_won,
                 threshold: 2, xp_reward: 20, rarity: common),
            ]
        )
        "#;

        let mut loader = Loader::new(NOW);
        assert!(matches!(
            loader.load_achievements_str(content),
            Err(Error::DuplicateDefinition(_))
        ));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = builtin(NOW).unwrap();
        assert!(!catalog.achievements.is_empty());
        assert!(!catalog.tools.is_empty());

        // The battle ladder from the original seed data survives.
        for slug in ["first-blood", "battle-veteran", "champion"] {
            let def = catalog.achievement(&AchievementId::new(slug)).unwrap();
            assert_eq!(def.requirement.action, ActionType::BattlesWon);
        }

        // Seed tools stay inside stat bounds and cover several tiers.
        let mut tiers = std::collections::HashSet::new();
        for tool in &catalog.tools {
            let stats = vibebuff_core::compute_stats(tool, NOW);
            assert!(stats.total() >= 5 && stats.total() <= 500);
            tiers.insert(PowerLevel::classify(stats.total()));
        }
        assert!(tiers.len() >= 2);
    }
}
