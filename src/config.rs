use serde::{Deserialize, Serialize};

/// Maximum edit distance a single Myers pass explores before giving up.
pub const DEFAULT_SCAN_LIMIT: usize = 1000;
/// Bytes of unchanged context re-diffed on each side of an edit.
pub const DEFAULT_MARGIN: usize = 1000;
/// Unchanged lines allowed between two changes that still share a chunk.
pub const DEFAULT_COALESCE_LINES: usize = 1;

/// Tuning knobs for building and updating chunks.
///
/// Every field falls back to its default when missing, so a host can load a
/// partial table from its own settings file:
///
/// ```
/// use chunkdiff::DiffConfig;
///
/// let config: DiffConfig = serde_json::from_str(r#"{ "margin": 200 }"#).unwrap();
/// assert_eq!(config.margin, 200);
/// assert_eq!(config.scan_limit, chunkdiff::config::DEFAULT_SCAN_LIMIT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub scan_limit: usize,
    pub margin: usize,
    pub coalesce_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            scan_limit: DEFAULT_SCAN_LIMIT,
            margin: DEFAULT_MARGIN,
            coalesce_lines: DEFAULT_COALESCE_LINES,
        }
    }
}

impl DiffConfig {
    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_coalesce_lines(mut self, coalesce_lines: usize) -> Self {
        self.coalesce_lines = coalesce_lines;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiffConfig::default();
        assert_eq!(config.scan_limit, 1000);
        assert_eq!(config.margin, 1000);
        assert_eq!(config.coalesce_lines, 1);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: DiffConfig = serde_json::from_str(r#"{ "scan_limit": 50 }"#).unwrap();
        assert_eq!(config, DiffConfig::default().with_scan_limit(50));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = DiffConfig::default().with_margin(10).with_coalesce_lines(0);
        let json = serde_json::to_string(&config).unwrap();
        let back: DiffConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
