use serde::{Deserialize, Serialize};

/// One user-configured threshold: rolls of `name` at or above
/// `percentage` percent of their min-max range get highlighted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatRule {
    pub name: String,
    pub percentage: f64,
}

/// Immutable snapshot of the configured rules.
///
/// Names are case-insensitive unique keys; duplicates keep the first
/// occurrence. The whole set is replaced wholesale when the user edits
/// the configuration, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<StatRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<StatRule>) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut unique = Vec::with_capacity(rules.len());

        for rule in rules {
            let name = rule.name.trim();
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            unique.push(StatRule {
                name: name.to_string(),
                percentage: rule.percentage.clamp(0.0, 100.0),
            });
        }

        Self { rules: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &[StatRule] {
        &self.rules
    }

    /// Case-insensitive lookup by stat name
    pub fn find(&self, name: &str) -> Option<&StatRule> {
        self.rules
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Escaped `name1|name2|...` alternation for the extraction regex
    pub fn names_pattern(&self) -> String {
        self.rules
            .iter()
            .map(|r| regex::escape(&r.name))
            .collect::<Vec<_>>()
            .join("|")
    }
}
