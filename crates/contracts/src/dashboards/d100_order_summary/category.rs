use serde::{Deserialize, Serialize};
use std::fmt;

/// Category keys offered by the sales dashboard, in display order
pub const CATEGORY_KEYS: [&str; 6] = [
    "Domestic Layout",
    "Export Layout",
    "ONSITE",
    "Analysis",
    "VA",
    "NPI",
];

/// Tokens recognised as the market-type half of a key
const TYPE_TOKENS: [&str; 2] = ["Domestic", "Export"];

/// Category key split into its market type and service category.
///
/// `"Export Layout"` becomes type `Export`, category `Layout`. A key whose
/// first token is not a market type is read the other way round, so
/// `"Analysis"` has category `Analysis` and no type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategoryKey {
    raw: String,
    type_filter: Option<String>,
    category_filter: Option<String>,
}

impl CategoryKey {
    pub fn parse(raw: &str) -> Self {
        let mut tokens = raw.split_whitespace();
        let first = tokens.next().map(str::to_string);
        let second = tokens.next().map(str::to_string);

        let first_is_type = first
            .as_deref()
            .map(|token| TYPE_TOKENS.contains(&token))
            .unwrap_or(false);

        let (type_filter, category_filter) = if first_is_type {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            raw: raw.to_string(),
            type_filter,
            category_filter,
        }
    }

    /// All dashboard keys in display order
    pub fn all() -> Vec<CategoryKey> {
        CATEGORY_KEYS.iter().map(|key| CategoryKey::parse(key)).collect()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `Domestic` / `Export`, when present
    pub fn type_filter(&self) -> Option<&str> {
        self.type_filter.as_deref()
    }

    pub fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref()
    }

    /// Trimmed, lowercased category, empty when the key has none
    pub fn normalized_category(&self) -> String {
        self.category_filter
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn is_onsite(&self) -> bool {
        self.raw.trim().to_uppercase() == "ONSITE"
    }

    /// Whether the key is one of [`CATEGORY_KEYS`]
    pub fn is_known(&self) -> bool {
        CATEGORY_KEYS.contains(&self.raw.as_str())
    }
}

impl From<String> for CategoryKey {
    fn from(raw: String) -> Self {
        CategoryKey::parse(&raw)
    }
}

impl From<CategoryKey> for String {
    fn from(key: CategoryKey) -> Self {
        key.raw
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_first() {
        let key = CategoryKey::parse("Export Layout");
        assert_eq!(key.type_filter(), Some("Export"));
        assert_eq!(key.category_filter(), Some("Layout"));
        assert_eq!(key.normalized_category(), "layout");
    }

    #[test]
    fn test_parse_category_only() {
        let key = CategoryKey::parse("Analysis");
        assert_eq!(key.type_filter(), None);
        assert_eq!(key.category_filter(), Some("Analysis"));
    }

    #[test]
    fn test_parse_category_first() {
        let key = CategoryKey::parse("Layout Domestic");
        assert_eq!(key.type_filter(), Some("Domestic"));
        assert_eq!(key.category_filter(), Some("Layout"));
    }

    #[test]
    fn test_onsite_detection() {
        assert!(CategoryKey::parse("ONSITE").is_onsite());
        assert!(CategoryKey::parse(" onsite ").is_onsite());
        assert!(!CategoryKey::parse("Export Layout").is_onsite());
    }

    #[test]
    fn test_empty_key() {
        let key = CategoryKey::parse("");
        assert_eq!(key.type_filter(), None);
        assert_eq!(key.category_filter(), None);
        assert_eq!(key.normalized_category(), "");
        assert!(!key.is_known());
    }

    #[test]
    fn test_all_keys_known() {
        let keys = CategoryKey::all();
        assert_eq!(keys.len(), 6);
        assert!(keys.iter().all(CategoryKey::is_known));
    }

    #[test]
    fn test_serde_as_string() {
        let key: CategoryKey = serde_json::from_str("\"Domestic Layout\"").unwrap();
        assert_eq!(key.type_filter(), Some("Domestic"));
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"Domestic Layout\"");
    }
}
