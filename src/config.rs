use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "str-intel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var: placeholder recognition confidence (0-100) for engines without one.
pub const ENV_PLACEHOLDER_CONFIDENCE: &str = "STR_INTEL_PLACEHOLDER_CONFIDENCE";
/// Env var: drop fallback-dated entries from timespan/frequency math.
pub const ENV_EXCLUDE_FALLBACK_DATES: &str = "STR_INTEL_EXCLUDE_FALLBACK_DATES";
/// Env var: directory for per-stage diagnostic dumps. Disabled when unset.
pub const ENV_DUMP_DIR: &str = "STR_INTEL_DUMP_DIR";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "str_intel=info,warn"
}

/// Progress checkpoints published at each stage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressMilestones {
    pub started: u8,
    pub recognized: u8,
    pub extracted: u8,
    pub analyzed: u8,
}

impl Default for ProgressMilestones {
    fn default() -> Self {
        Self {
            started: 10,
            recognized: 30,
            extracted: 60,
            analyzed: 90,
        }
    }
}

/// Tunables for the processing pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub progress: ProgressMilestones,
    /// Confidence assigned to pages by engines that report none.
    pub placeholder_confidence: u8,
    /// Subtracted from an entry's confidence when its date fell back to
    /// the extraction time.
    pub date_fallback_penalty: u8,
    /// Off by default: fallback dates still count toward chronicity.
    pub exclude_fallback_dates: bool,
    pub dump_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            progress: ProgressMilestones::default(),
            placeholder_confidence: 75,
            date_fallback_penalty: 15,
            exclude_fallback_dates: false,
            dump_dir: None,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `STR_INTEL_*` environment variables.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_PLACEHOLDER_CONFIDENCE) {
            match raw.trim().parse::<u8>() {
                Ok(value) if value <= 100 => config.placeholder_confidence = value,
                _ => tracing::warn!(
                    var = ENV_PLACEHOLDER_CONFIDENCE,
                    value = %raw,
                    "Ignoring invalid confidence override"
                ),
            }
        }

        if let Ok(raw) = std::env::var(ENV_EXCLUDE_FALLBACK_DATES) {
            match parse_flag(&raw) {
                Some(flag) => config.exclude_fallback_dates = flag,
                None => tracing::warn!(
                    var = ENV_EXCLUDE_FALLBACK_DATES,
                    value = %raw,
                    "Ignoring invalid boolean override"
                ),
            }
        }

        if let Ok(dir) = std::env::var(ENV_DUMP_DIR) {
            if !dir.trim().is_empty() {
                config.dump_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestones_are_increasing() {
        let p = ProgressMilestones::default();
        assert!(p.started < p.recognized);
        assert!(p.recognized < p.extracted);
        assert!(p.extracted < p.analyzed);
        assert!(p.analyzed < 100);
    }

    #[test]
    fn defaults_keep_fallback_dates() {
        let config = PipelineConfig::default();
        assert!(!config.exclude_fallback_dates);
        assert_eq!(config.placeholder_confidence, 75);
        assert!(config.dump_dir.is_none());
    }

    #[test]
    fn parse_flag_variants() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
