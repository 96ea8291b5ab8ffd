//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Value resolution engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Account codes of the summary metrics.
    #[serde(default)]
    pub metrics: MetricCodes,
    /// Report formatting configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Value resolution engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of full re-evaluation passes over the derived rows.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    /// Stop before `max_passes` once a pass changes nothing.
    #[serde(default = "default_stop_when_stable")]
    pub stop_when_stable: bool,
}

fn default_max_passes() -> usize {
    10
}

fn default_stop_when_stable() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
            stop_when_stable: default_stop_when_stable(),
        }
    }
}

/// Tenant-convention account codes for the income statement summary lines.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricCodes {
    /// Gross revenue.
    #[serde(default = "default_gross_revenue")]
    pub gross_revenue: String,
    /// Deductions from gross revenue.
    #[serde(default = "default_deductions")]
    pub deductions: String,
    /// Net revenue.
    #[serde(default = "default_net_revenue")]
    pub net_revenue: String,
    /// Operational costs.
    #[serde(default = "default_operational_costs")]
    pub operational_costs: String,
    /// Gross margin.
    #[serde(default = "default_gross_margin")]
    pub gross_margin: String,
    /// Operating expenses.
    #[serde(default = "default_operating_expenses")]
    pub operating_expenses: String,
    /// Gross profit.
    #[serde(default = "default_gross_profit")]
    pub gross_profit: String,
    /// Administrative expenses.
    #[serde(default = "default_admin_expenses")]
    pub admin_expenses: String,
    /// EBITDA.
    #[serde(default = "default_ebitda")]
    pub ebitda: String,
    /// Financial expenses.
    #[serde(default = "default_financial_expenses")]
    pub financial_expenses: String,
    /// Net profit.
    #[serde(default = "default_net_profit")]
    pub net_profit: String,
}

fn default_gross_revenue() -> String {
    "1".to_string()
}

fn default_deductions() -> String {
    "2".to_string()
}

fn default_net_revenue() -> String {
    "3".to_string()
}

fn default_operational_costs() -> String {
    "4".to_string()
}

fn default_gross_margin() -> String {
    "5".to_string()
}

fn default_operating_expenses() -> String {
    "6".to_string()
}

fn default_gross_profit() -> String {
    "7".to_string()
}

fn default_admin_expenses() -> String {
    "8".to_string()
}

fn default_ebitda() -> String {
    "9".to_string()
}

fn default_financial_expenses() -> String {
    "10".to_string()
}

fn default_net_profit() -> String {
    "11".to_string()
}

impl Default for MetricCodes {
    fn default() -> Self {
        Self {
            gross_revenue: default_gross_revenue(),
            deductions: default_deductions(),
            net_revenue: default_net_revenue(),
            operational_costs: default_operational_costs(),
            gross_margin: default_gross_margin(),
            operating_expenses: default_operating_expenses(),
            gross_profit: default_gross_profit(),
            admin_expenses: default_admin_expenses(),
            ebitda: default_ebitda(),
            financial_expenses: default_financial_expenses(),
            net_profit: default_net_profit(),
        }
    }
}

/// Report formatting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Decimal places kept on vertical-analysis percentages.
    #[serde(default = "default_percent_scale")]
    pub percent_scale: u32,
}

fn default_percent_scale() -> u32 {
    2
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            percent_scale: default_percent_scale(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUDGETRY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
