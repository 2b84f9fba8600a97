use crate::models::stat_rule::{RuleSet, StatRule};
use parking_lot::RwLock;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared rule snapshot with wholesale replacement.
///
/// The parser reads a snapshot every frame while an external edit may
/// land between frames; readers always see either the old or the new
/// complete list, never a partial one.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    pub fn new(initial: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current.read().clone()
    }

    pub fn replace(&self, rules: RuleSet) {
        *self.current.write() = Arc::new(rules);
    }
}

/// Manager for the threshold configuration file
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager rooted at the platform config directory
    pub fn new() -> Result<Self, String> {
        let config_dir = dirs::config_dir()
            .ok_or("Failed to determine config directory")?
            .join("roll-overlay");
        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let config_path = config_dir.join("rules.json");
        Self {
            config_dir,
            config_path,
        }
    }

    /// Save the rule list to disk (pretty printed for hand editing)
    pub fn save(&self, rules: &[StatRule]) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;

        let json = serde_json::to_string_pretty(rules)
            .map_err(|e| format!("Failed to serialize rules: {}", e))?;

        fs::write(&self.config_path, json)
            .map_err(|e| format!("Failed to write rules file: {}", e))?;

        Ok(())
    }

    /// Load the rule list; a missing file yields an empty list
    pub fn load(&self) -> Result<Vec<StatRule>, String> {
        if !self.config_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| format!("Failed to read rules file: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse rules file: {}", e))
    }

    pub fn config_file_path(&self) -> &PathBuf {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> ConfigManager {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "roll-overlay-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&dir);
        ConfigManager::with_dir(dir)
    }

    fn sample_rules() -> Vec<StatRule> {
        vec![
            StatRule {
                name: "Critical Strike Chance".to_string(),
                percentage: 60.0,
            },
            StatRule {
                name: "Vulnerable Damage".to_string(),
                percentage: 75.0,
            },
        ]
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let manager = test_manager();
        let rules = sample_rules();

        manager.save(&rules).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded, rules);

        let _ = fs::remove_dir_all(&manager.config_dir);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let manager = test_manager();
        assert!(manager.load().unwrap().is_empty());
    }

    #[test]
    fn test_store_snapshot_survives_replace() {
        let store = RuleStore::new(RuleSet::new(sample_rules()));

        let before = store.snapshot();
        store.replace(RuleSet::new(Vec::new()));
        let after = store.snapshot();

        // the old snapshot stays complete for the pass holding it
        assert_eq!(before.len(), 2);
        assert!(after.is_empty());
    }
}
