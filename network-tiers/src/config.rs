//! Tier configuration
//!
//! The month thresholds and the privilege table are the only tunables of the
//! tier engine. They are loaded once at process start, validated, and then
//! shared read-only (by reference or `Arc`) for the life of the process.

use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::privileges::{PrivilegeSet, PrivilegeTable};
use crate::tier::Tier;

/// Month counts at which each tier opens (inclusive lower bounds).
///
/// The lowest tier always opens at month zero, so only the three upper bounds
/// are configurable. They must be strictly ascending and non-zero.
///
/// # Examples
///
/// ```
/// use network_tiers::{Tier, TierThresholds};
///
/// let thresholds = TierThresholds::default();
/// assert_eq!(thresholds.lower_bound(Tier::Explorer), 0);
/// assert_eq!(thresholds.lower_bound(Tier::Contributor), 12);
/// assert_eq!(thresholds.tier_for_months(11), Tier::Participant);
/// assert_eq!(thresholds.tier_for_months(12), Tier::Contributor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdsRepr", into = "ThresholdsRepr")]
pub struct TierThresholds {
    bounds: [u32; Tier::COUNT],
}

/// Wire shape of [`TierThresholds`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ThresholdsRepr {
    participant: u32,
    contributor: u32,
    champion: u32,
}

impl TierThresholds {
    /// Create validated thresholds.
    ///
    /// # Arguments
    ///
    /// * `participant` - Months at which Participant opens
    /// * `contributor` - Months at which Contributor opens
    /// * `champion` - Months at which Champion opens
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidThresholds`] unless `0 < participant < contributor < champion`
    pub fn new(participant: u32, contributor: u32, champion: u32) -> ConfigResult<Self> {
        if participant == 0 {
            return Err(ConfigError::InvalidThresholds(
                "participant threshold must be at least one month".to_string(),
            ));
        }
        if participant >= contributor || contributor >= champion {
            return Err(ConfigError::InvalidThresholds(format!(
                "thresholds must be strictly ascending, got {participant}, {contributor}, {champion}"
            )));
        }

        Ok(Self {
            bounds: [0, participant, contributor, champion],
        })
    }

    /// Months at which `tier` opens.
    pub fn lower_bound(&self, tier: Tier) -> u32 {
        self.bounds[tier.rank()]
    }

    /// The highest tier whose lower bound `months` has reached.
    ///
    /// A month count equal to a threshold lands in the tier that threshold opens.
    pub fn tier_for_months(&self, months: u32) -> Tier {
        Tier::all()
            .into_iter()
            .rev()
            .find(|tier| months >= self.lower_bound(*tier))
            .unwrap_or(Tier::lowest())
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            bounds: [0, 3, 12, 36],
        }
    }
}

impl TryFrom<ThresholdsRepr> for TierThresholds {
    type Error = ConfigError;

    fn try_from(repr: ThresholdsRepr) -> Result<Self, Self::Error> {
        TierThresholds::new(repr.participant, repr.contributor, repr.champion)
    }
}

impl From<TierThresholds> for ThresholdsRepr {
    fn from(thresholds: TierThresholds) -> Self {
        Self {
            participant: thresholds.lower_bound(Tier::Participant),
            contributor: thresholds.lower_bound(Tier::Contributor),
            champion: thresholds.lower_bound(Tier::Champion),
        }
    }
}

/// Complete tier engine configuration.
///
/// Every way of obtaining a `TierConfig` validates it, so request-time code
/// never sees an incomplete or non-monotonic rule set.
///
/// # Examples
///
/// ```
/// use network_tiers::TierConfig;
///
/// let config = TierConfig::from_json(r#"{
///     "thresholds": { "participant": 6, "contributor": 12, "champion": 24 }
/// }"#).unwrap();
/// assert_eq!(config.thresholds().tier_for_months(6), network_tiers::Tier::Participant);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Month thresholds per tier
    #[serde(default)]
    thresholds: TierThresholds,

    /// Privileges per tier
    #[serde(default)]
    privileges: PrivilegeTable,
}

impl TierConfig {
    /// Build a configuration from already-validated parts.
    pub fn new(thresholds: TierThresholds, privileges: PrivilegeTable) -> Self {
        Self {
            thresholds,
            privileges,
        }
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing sections fall back to the defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config = serde_json::from_str::<TierConfig>(json).inspect_err(|e| {
            warn!(error = %e, "Rejected tier configuration");
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidValue {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents)
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TIER_CONFIG_PATH`: JSON configuration file (default: built-in rules)
    /// - `TIER_THRESHOLDS`: `participant,contributor,champion` month counts,
    ///   overriding the thresholds of the file or defaults (e.g. `3,12,36`)
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either variable is set to something
    /// unusable, including a value that is not valid Unicode. Callers should
    /// treat this as fatal at startup.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = match env_var("TIER_CONFIG_PATH")? {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(raw) = env_var("TIER_THRESHOLDS")? {
            config.thresholds = parse_thresholds(&raw).inspect_err(|e| {
                warn!(error = %e, value = %raw, "Rejected TIER_THRESHOLDS");
            })?;
        }

        config.validate()?;
        info!(
            participant = config.thresholds.lower_bound(Tier::Participant),
            contributor = config.thresholds.lower_bound(Tier::Contributor),
            champion = config.thresholds.lower_bound(Tier::Champion),
            "Loaded tier configuration"
        );
        Ok(config)
    }

    /// Re-check every invariant of the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        TierThresholds::new(
            self.thresholds.lower_bound(Tier::Participant),
            self.thresholds.lower_bound(Tier::Contributor),
            self.thresholds.lower_bound(Tier::Champion),
        )?;
        self.privileges.validate()
    }

    /// Month thresholds.
    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Privilege table.
    pub fn privilege_table(&self) -> &PrivilegeTable {
        &self.privileges
    }

    /// Privileges granted at `tier`.
    pub fn privileges_for(&self, tier: Tier) -> &PrivilegeSet {
        self.privileges.get(tier)
    }
}

/// Read an environment variable; only an unset variable counts as absent.
fn env_var(key: &str) -> ConfigResult<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e @ VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

fn parse_thresholds(raw: &str) -> ConfigResult<TierThresholds> {
    let parts = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TIER_THRESHOLDS".to_string(),
                    message: format!("{part:?}: {e}"),
                })
        })
        .collect::<ConfigResult<Vec<u32>>>()?;

    match parts.as_slice() {
        [participant, contributor, champion] => {
            TierThresholds::new(*participant, *contributor, *champion)
        }
        _ => Err(ConfigError::InvalidValue {
            key: "TIER_THRESHOLDS".to_string(),
            message: format!("expected 3 month counts, got {}", parts.len()),
        }),
    }
}
