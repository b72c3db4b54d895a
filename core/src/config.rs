use serde::{Deserialize, Serialize};

/// How the resolver grades covered trainees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePolicy {
    /// A trainee covered by a backup is `at_risk` when at most this many
    /// entries remain after the covering backup in its chain.
    /// 0 means only the last backup counts as at-risk coverage.
    pub at_risk_remaining_backups: usize,
}

impl Default for CascadePolicy {
    fn default() -> Self {
        Self { at_risk_remaining_backups: 0 }
    }
}

/// Most decimal places `coverage_percentage` is ever rounded to.
pub const MAX_COVERAGE_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Decimal places kept in `coverage_percentage`.
    /// Anything above MAX_COVERAGE_PRECISION is rounded as the maximum.
    pub coverage_precision: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { coverage_precision: 1 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub policy:  CascadePolicy,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl SimConfig {
    /// Load from `{data_dir}/policy.json`. Missing sections fall back to defaults.
    /// In tests, use SimConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/policy.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid {path}: {e}"))?;
        if config.metrics.coverage_precision > MAX_COVERAGE_PRECISION {
            anyhow::bail!(
                "{path}: coverage_precision {} is out of range (0..={MAX_COVERAGE_PRECISION})",
                config.metrics.coverage_precision
            );
        }
        log::debug!("Loaded config from {path}: {config:?}");
        Ok(config)
    }

    /// Load from `data_dir` if a policy file exists there, else use defaults.
    pub fn load_or_default(data_dir: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(&format!("{data_dir}/policy.json")).exists() {
            Self::load(data_dir)
        } else {
            log::info!("No policy.json under {data_dir}; using default config");
            Ok(Self::default())
        }
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }
}
