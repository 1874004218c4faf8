//! Tool catalog read model
//!
//! The tool catalog is owned elsewhere; the battle engine only reads it.
//! `ToolSnapshot` carries the popularity and classification signals the
//! stat calculator derives from.

use crate::identity::ToolId;
use serde::{Deserialize, Serialize};

/// How a tool is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    OpenSource,
    Enterprise,
}

impl PricingModel {
    /// Stable string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Free => "free",
            PricingModel::Freemium => "freemium",
            PricingModel::Paid => "paid",
            PricingModel::OpenSource => "open_source",
            PricingModel::Enterprise => "enterprise",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PricingModel::Free),
            "freemium" => Some(PricingModel::Freemium),
            "paid" => Some(PricingModel::Paid),
            "open_source" => Some(PricingModel::OpenSource),
            "enterprise" => Some(PricingModel::Enterprise),
            _ => None,
        }
    }
}

/// A point-in-time view of one catalog tool
///
/// Popularity signals are optional: a freshly listed tool may have no
/// GitHub or npm presence at all. The stat calculator resolves missing
/// signals to documented baselines rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSnapshot {
    /// Catalog identity (slug)
    pub id: ToolId,
    /// Display name
    pub name: String,
    /// GitHub stargazer count, if the tool has a public repo
    pub github_stars: Option<u64>,
    /// Weekly npm downloads, if the tool is distributed via npm
    pub npm_downloads_weekly: Option<u64>,
    /// Pricing model
    pub pricing: PricingModel,
    /// Whether the source is open
    pub open_source: bool,
    /// Whether the catalog currently features this tool
    pub featured: bool,
    /// Catalog insertion time (ms since epoch)
    pub created_at: i64,
    /// Last observed update to the tool (ms since epoch)
    pub updated_at: i64,
}

impl ToolSnapshot {
    /// Create a snapshot with no popularity signals
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>, pricing: PricingModel) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            github_stars: None,
            npm_downloads_weekly: None,
            pricing,
            open_source: false,
            featured: false,
            created_at: 0,
            updated_at: 0,
        }
    }
}
