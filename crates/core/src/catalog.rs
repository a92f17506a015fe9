use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when the catalog has no dominant category yet.
pub const NO_TOP_CATEGORY: &str = "N/A";

/// Label for categories the API reports without a name.
pub const UNCATEGORIZED: &str = "Uncategorized";

const DEFAULT_CATEGORY_LABEL: &str = "General AI";
const DEFAULT_DESCRIPTION: &str = "No description available";
const UNKNOWN_PRICING_LABEL: &str = "unknown";
const UNKNOWN_SOURCE: &str = "unknown";
const HEADLINE_USE_CASES: usize = 3;

/// Pricing tier of a tool.
///
/// Known tiers are parsed case-insensitively. Anything else is preserved verbatim as
/// `Other` so it can still be matched against a filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pricing {
    Free,
    Freemium,
    Paid,
    Other(String),
}

impl Pricing {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Pricing::Free,
            "freemium" => Pricing::Freemium,
            "paid" => Pricing::Paid,
            _ => Pricing::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pricing::Free => "free",
            Pricing::Freemium => "freemium",
            Pricing::Paid => "paid",
            Pricing::Other(value) => value,
        }
    }

    /// Case-insensitive exact comparison against a user-supplied tier.
    pub fn matches(&self, tier: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(tier.trim())
    }
}

impl From<String> for Pricing {
    fn from(value: String) -> Self {
        Pricing::parse(&value)
    }
}

impl From<Pricing> for String {
    fn from(value: Pricing) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Pricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool entry exactly as the API sends it. Every field may be missing.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawTool {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub hype_score: Option<f64>,
    pub github_stars: Option<i64>,
    pub pricing: Option<String>,
    pub use_cases: Option<Vec<String>>,
    pub source: Option<String>,
}

/// Normalized catalog entry. Optional wire fields have already been resolved to their
/// documented defaults, so nothing downstream needs to re-check them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tool {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub category: Option<String>,
    pub hype_score: f64,
    pub github_stars: Option<u64>,
    pub pricing: Option<Pricing>,
    pub use_cases: Vec<String>,
    pub source: String,
}

/// Visual bucket for a hype score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypeTier {
    Blazing,
    Hot,
    Warm,
    Cool,
}

impl HypeTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HypeTier::Blazing
        } else if score >= 60.0 {
            HypeTier::Hot
        } else if score >= 40.0 {
            HypeTier::Warm
        } else {
            HypeTier::Cool
        }
    }
}

impl Tool {
    pub fn display_category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY_LABEL)
    }

    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn pricing_label(&self) -> &str {
        self.pricing
            .as_ref()
            .map(Pricing::as_str)
            .unwrap_or(UNKNOWN_PRICING_LABEL)
    }

    pub fn headline_use_cases(&self) -> &[String] {
        let end = self.use_cases.len().min(HEADLINE_USE_CASES);
        &self.use_cases[..end]
    }

    pub fn hype_tier(&self) -> HypeTier {
        HypeTier::from_score(self.hype_score)
    }

    pub fn is_high_hype(&self) -> bool {
        self.hype_score >= 70.0
    }
}

/// Category with its server-computed tool count.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// Category entry as the API sends it. Tools without a category are grouped under a
/// null name.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawCategory {
    pub name: Option<String>,
    pub count: Option<u64>,
}

/// Aggregate catalog statistics. Missing fields take their defaults, so a
/// deserialized value is never partial.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Stats {
    pub total_tools: u64,
    pub new_today: u64,
    pub avg_hype_score: f64,
    pub top_category: String,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_tools: 0,
            new_today: 0,
            avg_hype_score: 0.0,
            top_category: NO_TOP_CATEGORY.to_string(),
        }
    }
}

/// Stats payload as the API sends it. Any field may be missing or null.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct RawStats {
    pub total_tools: Option<u64>,
    pub new_today: Option<u64>,
    pub avg_hype_score: Option<f64>,
    pub top_category: Option<String>,
}

/// Response of the API root endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ApiHealth {
    pub message: String,
    pub status: String,
    pub version: String,
    pub timestamp: Option<String>,
}

impl ApiHealth {
    pub fn is_running(&self) -> bool {
        self.status.eq_ignore_ascii_case("running")
    }
}

/// Normalize a single wire entry. Returns `None` when the entry has no id.
pub fn normalize_tool(raw: RawTool) -> Option<Tool> {
    let id = raw.id?;

    let hype_score = raw
        .hype_score
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, 100.0))
        .unwrap_or(0.0);

    Some(Tool {
        id,
        name: raw.name.unwrap_or_default(),
        description: raw.description.filter(|d| !d.trim().is_empty()),
        url: raw.url.unwrap_or_default(),
        category: raw.category.filter(|c| !c.trim().is_empty()),
        hype_score,
        github_stars: raw.github_stars.and_then(|stars| u64::try_from(stars).ok()),
        pricing: raw
            .pricing
            .filter(|p| !p.trim().is_empty())
            .map(|p| Pricing::parse(&p)),
        use_cases: raw.use_cases.unwrap_or_default(),
        source: raw
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
    })
}

/// Normalize a wire list, preserving order and dropping entries that cannot be keyed.
pub fn normalize_tools(raw: Vec<RawTool>) -> Vec<Tool> {
    raw.into_iter().filter_map(normalize_tool).collect()
}

/// Normalize category entries. A null or blank name becomes [`UNCATEGORIZED`].
pub fn normalize_categories(raw: Vec<RawCategory>) -> Vec<Category> {
    raw.into_iter()
        .map(|category| Category {
            name: category
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            count: category.count.unwrap_or(0),
        })
        .collect()
}

pub fn normalize_stats(raw: RawStats) -> Stats {
    let defaults = Stats::default();
    Stats {
        total_tools: raw.total_tools.unwrap_or(defaults.total_tools),
        new_today: raw.new_today.unwrap_or(defaults.new_today),
        avg_hype_score: raw
            .avg_hype_score
            .filter(|score| score.is_finite())
            .unwrap_or(defaults.avg_hype_score),
        top_category: raw
            .top_category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(defaults.top_category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_raw_tool(id: u64) -> RawTool {
        RawTool {
            id: Some(id),
            name: Some(format!("Tool {id}")),
            description: Some("Writes things".to_string()),
            url: Some(format!("https://example.com/{id}")),
            category: Some("Writing".to_string()),
            hype_score: Some(72.0),
            github_stars: Some(1200),
            pricing: Some("free".to_string()),
            use_cases: Some(vec!["drafting".to_string()]),
            source: Some("github".to_string()),
        }
    }

    #[test]
    fn test_pricing_parse_is_case_insensitive() {
        assert_eq!(Pricing::parse("FREE"), Pricing::Free);
        assert_eq!(Pricing::parse("Freemium"), Pricing::Freemium);
        assert_eq!(Pricing::parse(" paid "), Pricing::Paid);
        assert_eq!(
            Pricing::parse("Enterprise"),
            Pricing::Other("Enterprise".to_string())
        );
    }

    #[test]
    fn test_pricing_matches_other_tiers() {
        let tier = Pricing::parse("Enterprise");
        assert!(tier.matches("enterprise"));
        assert!(!tier.matches("paid"));
        assert!(Pricing::Free.matches("Free"));
    }

    #[test]
    fn test_pricing_serde_uses_plain_strings() {
        let json = serde_json::to_string(&Pricing::Freemium).unwrap();
        assert_eq!(json, "\"freemium\"");

        let parsed: Pricing = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(parsed, Pricing::Paid);
    }

    #[test]
    fn test_normalize_tool_full_entry() {
        let tool = normalize_tool(create_raw_tool(7)).unwrap();

        assert_eq!(tool.id, 7);
        assert_eq!(tool.name, "Tool 7");
        assert_eq!(tool.category.as_deref(), Some("Writing"));
        assert_eq!(tool.hype_score, 72.0);
        assert_eq!(tool.github_stars, Some(1200));
        assert_eq!(tool.pricing, Some(Pricing::Free));
        assert_eq!(tool.source, "github");
    }

    #[test]
    fn test_normalize_tool_defaults_missing_fields() {
        let raw = RawTool {
            id: Some(1),
            ..Default::default()
        };

        let tool = normalize_tool(raw).unwrap();

        assert_eq!(tool.name, "");
        assert_eq!(tool.description, None);
        assert_eq!(tool.url, "");
        assert_eq!(tool.category, None);
        assert_eq!(tool.hype_score, 0.0);
        assert_eq!(tool.github_stars, None);
        assert_eq!(tool.pricing, None);
        assert!(tool.use_cases.is_empty());
        assert_eq!(tool.source, "unknown");
    }

    #[test]
    fn test_normalize_tool_without_id_is_dropped() {
        let raw = RawTool {
            name: Some("Nameless".to_string()),
            ..Default::default()
        };
        assert!(normalize_tool(raw).is_none());
    }

    #[test]
    fn test_normalize_tool_clamps_and_sanitizes() {
        let mut raw = create_raw_tool(3);
        raw.hype_score = Some(140.0);
        raw.github_stars = Some(-5);
        raw.pricing = Some("  ".to_string());
        raw.category = Some(String::new());

        let tool = normalize_tool(raw).unwrap();

        assert_eq!(tool.hype_score, 100.0);
        assert_eq!(tool.github_stars, None);
        assert_eq!(tool.pricing, None);
        assert_eq!(tool.category, None);
    }

    #[test]
    fn test_normalize_tools_preserves_order() {
        let raw = vec![
            create_raw_tool(3),
            RawTool::default(),
            create_raw_tool(1),
            create_raw_tool(2),
        ];

        let ids: Vec<u64> = normalize_tools(raw).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_raw_tool_deserializes_sparse_json() {
        let raw: Vec<RawTool> = serde_json::from_str(
            r#"[{"id": 5, "name": "Sparse"}, {"id": 6, "hype_score": 55, "pricing": null}]"#,
        )
        .unwrap();

        let tools = normalize_tools(raw);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[1].hype_score, 55.0);
    }

    #[test]
    fn test_tool_display_defaults() {
        let tool = normalize_tool(RawTool {
            id: Some(9),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(tool.display_category(), "General AI");
        assert_eq!(tool.display_description(), "No description available");
        assert_eq!(tool.pricing_label(), "unknown");
    }

    #[test]
    fn test_tool_headline_use_cases_caps_at_three() {
        let mut raw = create_raw_tool(4);
        raw.use_cases = Some(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ]);
        let tool = normalize_tool(raw).unwrap();

        assert_eq!(tool.headline_use_cases(), &["a", "b", "c"]);
    }

    #[test]
    fn test_hype_tiers() {
        assert_eq!(HypeTier::from_score(95.0), HypeTier::Blazing);
        assert_eq!(HypeTier::from_score(80.0), HypeTier::Blazing);
        assert_eq!(HypeTier::from_score(61.0), HypeTier::Hot);
        assert_eq!(HypeTier::from_score(40.0), HypeTier::Warm);
        assert_eq!(HypeTier::from_score(12.0), HypeTier::Cool);
        assert_eq!(HypeTier::from_score(0.0), HypeTier::Cool);
    }

    #[test]
    fn test_stats_default_and_partial_payload() {
        assert_eq!(Stats::default().top_category, "N/A");

        let stats: Stats = serde_json::from_str(r#"{"total_tools": 12}"#).unwrap();
        assert_eq!(stats.total_tools, 12);
        assert_eq!(stats.new_today, 0);
        assert_eq!(stats.avg_hype_score, 0.0);
        assert_eq!(stats.top_category, "N/A");
    }

    #[test]
    fn test_stats_with_null_fields() {
        let raw: RawStats = serde_json::from_str(
            r#"{"total_tools": 4, "new_today": null, "avg_hype_score": null, "top_category": null}"#,
        )
        .unwrap();

        let stats = normalize_stats(raw);
        assert_eq!(stats.total_tools, 4);
        assert_eq!(stats.new_today, 0);
        assert_eq!(stats.avg_hype_score, 0.0);
        assert_eq!(stats.top_category, "N/A");
    }

    #[test]
    fn test_categories_with_null_name() {
        let raw: Vec<RawCategory> = serde_json::from_str(
            r#"[{"name": "NLP", "count": 4}, {"name": null, "count": 2}, {"name": "  "}]"#,
        )
        .unwrap();

        let categories = normalize_categories(raw);
        assert_eq!(
            categories,
            vec![
                Category {
                    name: "NLP".to_string(),
                    count: 4,
                },
                Category {
                    name: UNCATEGORIZED.to_string(),
                    count: 2,
                },
                Category {
                    name: UNCATEGORIZED.to_string(),
                    count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_category_count_defaults_to_zero() {
        let category: Category = serde_json::from_str(r#"{"name": "NLP"}"#).unwrap();
        assert_eq!(category.count, 0);
    }

    #[test]
    fn test_api_health_is_running() {
        let health: ApiHealth =
            serde_json::from_str(r#"{"message": "AI Tool Tracker API", "status": "running"}"#)
                .unwrap();
        assert!(health.is_running());
        assert!(health.timestamp.is_none());
    }
}
