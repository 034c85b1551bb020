//! Report configuration: input/output locations with environment overrides.

use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/netflix_titles.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";
pub const SUMMARY_FILE: &str = "summary.json";

pub const ENV_DATA_PATH: &str = "CATALOG_DATA_PATH";
pub const ENV_OUTPUT_DIR: &str = "CATALOG_OUTPUT_DIR";
pub const ENV_WRITE_SUMMARY: &str = "CATALOG_WRITE_SUMMARY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub write_summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            write_summary: true,
        }
    }
}

impl ReportConfig {
    /// Defaults overridden by `CATALOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(ENV_WRITE_SUMMARY) {
            config.write_summary = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        config
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_overrides() {
        let config = ReportConfig::from_lookup(|_| None);
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.summary_path(), PathBuf::from("charts/summary.json"));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATA_PATH, "/tmp/titles.csv"),
            (ENV_OUTPUT_DIR, "out"),
            (ENV_WRITE_SUMMARY, "False"),
        ]
        .into_iter()
        .collect();
        let config = ReportConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.data_path, PathBuf::from("/tmp/titles.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.write_summary);
    }
}
