//! Tool catalog entry schema

use serde::{Deserialize, Serialize};
use vibebuff_core::{PricingModel, ToolId, ToolSnapshot};

const MS_PER_DAY: i64 = 86_400_000;

/// One tool as written in a RON catalog file
///
/// Freshness is relative (`days_since_update`) so seed data does not bake
/// in absolute dates; the loader resolves it against load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Unique slug
    pub slug: String,
    /// Display name
    pub name: String,
    /// GitHub stargazer count, if the tool has a public repo
    #[serde(default)]
    pub github_stars: Option<u64>,
    /// Weekly npm downloads, if distributed via npm
    #[serde(default)]
    pub npm_downloads_weekly: Option<u64>,
    /// Pricing model
    pub pricing: PricingModel,
    /// Open-source flag
    #[serde(default)]
    pub open_source: bool,
    /// Featured flag
    #[serde(default)]
    pub featured: bool,
    /// Days since the tool last shipped an update; omitted means stale
    #[serde(default)]
    pub days_since_update: Option<u32>,
}

impl ToolEntry {
    /// Convert to a core snapshot, resolving freshness against `now_ms`
    pub fn into_snapshot(self, now_ms: i64) -> ToolSnapshot {
        let updated_at = match self.days_since_update {
            Some(days) => now_ms - days as i64 * MS_PER_DAY,
            None => 0,
        };
        ToolSnapshot {
            id: ToolId::new(self.slug),
            name: self.name,
            github_stars: self.github_stars,
            npm_downloads_weekly: self.npm_downloads_weekly,
            pricing: self.pricing,
            open_source: self.open_source,
            featured: self.featured,
            created_at: now_ms,
            updated_at,
        }
    }
}

/// A collection of tool entries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolFile {
    pub tools: Vec<ToolEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_entry_ron() {
        let ron_str = r#"
        (
            slug: "vite",
            name: "Vite",
            github_stars: Some(70000),
            npm_downloads_weekly: Some(16000000),
            pricing: open_source,
            open_source: true,
            featured: true,
            days_since_update: Some(7),
        )
        "#;

        let entry: ToolEntry = ron::from_str(ron_str).unwrap();
        let now = 1_700_000_000_000;
        let tool = entry.into_snapshot(now);
        assert_eq!(tool.id.as_str(), "vite");
        assert_eq!(tool.pricing, PricingModel::OpenSource);
        assert_eq!(tool.updated_at, now - 7 * MS_PER_DAY);
    }

    #[test]
    fn test_minimal_tool_entry() {
        let ron_str = r#"
        (
            slug: "mystery",
            name: "Mystery Tool",
            pricing: paid,
        )
        "#;

        let entry: ToolEntry = ron::from_str(ron_str).unwrap();
        let tool = entry.into_snapshot(1_700_000_000_000);
        assert!(tool.github_stars.is_none());
        assert_eq!(tool.updated_at, 0);
    }
}
