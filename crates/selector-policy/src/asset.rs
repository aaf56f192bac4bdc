//! Asset attributes that selections are evaluated against.

use selector_core::registry::{IntField, KeyValueField, Rating, RatingField, StringField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The attributes of one candidate asset.
///
/// Absent attributes never satisfy a condition, whatever its operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAttributes {
    /// Asset identifier, used only for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<Rating>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl AssetAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(&self, field: StringField) -> Option<&str> {
        match field {
            StringField::Platform => self.platform.as_deref(),
            StringField::PlatformVersion => self.platform_version.as_deref(),
            StringField::AssetName => self.asset_name.as_deref(),
            StringField::AssetKind => self.asset_kind.as_deref(),
            StringField::Technology => self.technology.as_deref(),
        }
    }

    pub fn int(&self, field: IntField) -> Option<i32> {
        match field {
            IntField::RiskScore => self.risk_score,
        }
    }

    pub fn rating(&self, field: RatingField) -> Option<Rating> {
        match field {
            RatingField::Risk => self.risk,
        }
    }

    pub fn key_values(&self, field: KeyValueField) -> &BTreeMap<String, String> {
        match field {
            KeyValueField::Labels => &self.labels,
            KeyValueField::Annotations => &self.annotations,
        }
    }

    /// Display name for reports: the MRN, else the asset name, else `<unnamed>`.
    pub fn display_name(&self) -> &str {
        self.mrn
            .as_deref()
            .or(self.asset_name.as_deref())
            .unwrap_or("<unnamed>")
    }

    pub fn with_string(mut self, field: StringField, value: impl Into<String>) -> Self {
        let slot = match field {
            StringField::Platform => &mut self.platform,
            StringField::PlatformVersion => &mut self.platform_version,
            StringField::AssetName => &mut self.asset_name,
            StringField::AssetKind => &mut self.asset_kind,
            StringField::Technology => &mut self.technology,
        };
        *slot = Some(value.into());
        self
    }

    pub fn with_risk_score(mut self, score: i32) -> Self {
        self.risk_score = Some(score);
        self
    }

    pub fn with_risk(mut self, rating: Rating) -> Self {
        self.risk = Some(rating);
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asset() {
        let asset: AssetAttributes = serde_json::from_str(
            r#"{
                "mrn": "//assets/vm-1",
                "asset_kind": "vm",
                "risk_score": 42,
                "risk": "high",
                "labels": {"environment": "production"}
            }"#,
        )
        .unwrap();

        assert_eq!(asset.string(StringField::AssetKind), Some("vm"));
        assert_eq!(asset.string(StringField::Platform), None);
        assert_eq!(asset.int(IntField::RiskScore), Some(42));
        assert_eq!(asset.rating(RatingField::Risk), Some(Rating::High));
        assert_eq!(
            asset.key_values(KeyValueField::Labels).get("environment"),
            Some(&"production".to_string())
        );
        assert!(asset.key_values(KeyValueField::Annotations).is_empty());
        assert_eq!(asset.display_name(), "//assets/vm-1");
    }

    #[test]
    fn test_builders() {
        let asset = AssetAttributes::new()
            .with_string(StringField::AssetName, "db-01")
            .with_risk_score(7)
            .with_annotation("owner", "dba");
        assert_eq!(asset.display_name(), "db-01");
        assert_eq!(asset.asset_name.as_deref(), Some("db-01"));
        assert_eq!(asset.annotations.len(), 1);
    }
}
