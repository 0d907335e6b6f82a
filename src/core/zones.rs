use crate::utils::error::{Result, SightError};

pub const DEFAULT_ZONES: [&str; 7] = ["中正", "仁愛", "信義", "中山", "安樂", "暖暖", "七堵"];
pub const DEFAULT_ZONE_SUFFIX: &str = "區";

/// The fixed, ordered set of zones a refresh walks, plus the marker
/// persisted zone names carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCatalog {
    zones: Vec<String>,
    suffix: String,
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_ZONES.iter().map(|z| z.to_string()).collect(),
            DEFAULT_ZONE_SUFFIX,
        )
    }
}

impl ZoneCatalog {
    pub fn new(zones: Vec<String>, suffix: impl Into<String>) -> Self {
        Self {
            zones,
            suffix: suffix.into(),
        }
    }

    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Rejects blank input and appends the suffix when it is missing.
    ///
    /// Non-blank input is not trimmed.
    pub fn normalize(&self, input: &str) -> Result<String> {
        if input.trim().is_empty() {
            return Err(SightError::invalid_argument("區域名稱不能為空"));
        }

        if input.ends_with(self.suffix.as_str()) {
            Ok(input.to_string())
        } else {
            Ok(format!("{}{}", input, self.suffix))
        }
    }

    /// True for both the bare and the suffixed form of a listed zone.
    pub fn contains(&self, zone: &str) -> bool {
        let bare = zone.strip_suffix(self.suffix.as_str()).unwrap_or(zone);
        self.zones.iter().any(|z| z == bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let catalog = ZoneCatalog::default();
        assert_eq!(
            catalog.zones(),
            &["中正", "仁愛", "信義", "中山", "安樂", "暖暖", "七堵"]
        );
        assert_eq!(catalog.suffix(), "區");
    }

    #[test]
    fn test_normalize_appends_suffix() {
        let catalog = ZoneCatalog::default();
        assert_eq!(catalog.normalize("中正").unwrap(), "中正區");
        assert_eq!(catalog.normalize("七堵區").unwrap(), "七堵區");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        let catalog = ZoneCatalog::default();
        for input in ["", " ", "\t\n", "　"] {
            assert!(matches!(
                catalog.normalize(input),
                Err(SightError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_normalize_keeps_surrounding_text() {
        let catalog = ZoneCatalog::default();
        assert_eq!(catalog.normalize(" 中正").unwrap(), " 中正區");
    }

    #[test]
    fn test_contains() {
        let catalog = ZoneCatalog::default();
        assert!(catalog.contains("暖暖"));
        assert!(catalog.contains("暖暖區"));
        assert!(!catalog.contains("大安區"));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ZoneCatalog::new(vec!["North".to_string()], "#");
        assert_eq!(catalog.normalize("North").unwrap(), "North#");
        assert!(catalog.contains("North#"));
    }
}
