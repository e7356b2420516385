//! Price and valuation alert rules.
use crate::core::error::{StoreError, ValidationError, normalize_symbol};
use crate::core::security::Security;
use crate::core::storage::{KeyValueCollection, get_json, put_json};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

pub const ALERTS_COLLECTION: &str = "alerts";
const RULES_KEY: &str = "rules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Price,
    #[serde(rename = "pe")]
    PeRatio,
    Volume,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Price => "Price",
            AlertKind::PeRatio => "P/E Ratio",
            AlertKind::Volume => "Trading Volume",
        }
    }
}

impl FromStr for AlertKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(AlertKind::Price),
            "pe" | "p/e" => Ok(AlertKind::PeRatio),
            "volume" => Ok(AlertKind::Volume),
            _ => Err(ValidationError::InvalidAlertKind {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Above,
    Below,
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Above => write!(f, "above"),
            Condition::Below => write!(f, "below"),
        }
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(Condition::Above),
            "below" => Ok(Condition::Below),
            _ => Err(ValidationError::InvalidCondition {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: u64,
    pub symbol: String,
    pub kind: AlertKind,
    pub condition: Condition,
    pub threshold: f64,
}

impl AlertRule {
    /// Builds a rule from raw user input. The id is assigned when the rule is
    /// added to an [`AlertBook`].
    pub fn parse(
        symbol: &str,
        kind: &str,
        condition: &str,
        value: &str,
    ) -> Result<Self, ValidationError> {
        let symbol = normalize_symbol(symbol)?;
        let kind: AlertKind = kind.parse()?;
        let condition: Condition = condition.parse()?;
        let threshold = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| ValidationError::InvalidThreshold {
                value: value.to_string(),
            })?;

        Ok(AlertRule {
            id: 0,
            symbol,
            kind,
            condition,
            threshold,
        })
    }

    /// Whether the rule is triggered by `security`, or `None` when the
    /// watched metric is not available.
    pub fn evaluate(&self, security: &Security) -> Option<bool> {
        let observed = match self.kind {
            AlertKind::Price => Some(security.price),
            AlertKind::PeRatio => security.pe_ratio,
            AlertKind::Volume => None,
        }?;

        Some(match self.condition {
            Condition::Above => observed > self.threshold,
            Condition::Below => observed < self.threshold,
        })
    }

    pub fn describe(&self) -> String {
        let unit = if self.kind == AlertKind::Price {
            " USD"
        } else {
            ""
        };
        format!(
            "{} {} {}{}",
            self.kind.label(),
            self.condition,
            self.threshold,
            unit
        )
    }
}

/// Persisted list of alert rules.
pub struct AlertBook {
    collection: Arc<dyn KeyValueCollection>,
}

impl AlertBook {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self { collection }
    }

    async fn read(&self) -> Result<Vec<AlertRule>, StoreError> {
        Ok(get_json(self.collection.as_ref(), RULES_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Stores `rule` under the next free id and returns the stored rule.
    pub async fn add(&self, mut rule: AlertRule) -> Result<AlertRule, StoreError> {
        let _guard = self.collection.write_lock().lock().await;
        let mut rules = self.read().await?;
        rule.id = rules.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rules.push(rule.clone());
        put_json(self.collection.as_ref(), RULES_KEY, &rules).await?;
        info!("Alert {} created for {}", rule.id, rule.symbol);
        Ok(rule)
    }

    pub async fn remove(&self, id: u64) -> Result<bool, StoreError> {
        let _guard = self.collection.write_lock().lock().await;
        let mut rules = self.read().await?;
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Ok(false);
        }
        put_json(self.collection.as_ref(), RULES_KEY, &rules).await?;
        info!("Alert {} removed", id);
        Ok(true)
    }

    pub async fn list(&self) -> Vec<AlertRule> {
        self.read().await.unwrap_or_else(|e| {
            warn!("Failed to read alerts: {}", e);
            Vec::new()
        })
    }
}
