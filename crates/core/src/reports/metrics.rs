//! Summary metrics and vertical analysis.

use budgetry_shared::{MetricCodes, ReportConfig};
use budgetry_shared::types::MonthlyValues;
use rust_decimal::Decimal;

use super::types::{MetricKind, MetricSeries, MetricSummary, MetricValue, Statement};

/// Reads the fixed summary lines out of a resolved statement.
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    codes: MetricCodes,
    percent_scale: u32,
}

impl MetricExtractor {
    /// Creates an extractor for a tenant's metric codes.
    #[must_use]
    pub fn new(codes: MetricCodes, report: &ReportConfig) -> Self {
        Self {
            codes,
            percent_scale: report.percent_scale,
        }
    }

    /// Year totals of every metric with their percent of gross revenue.
    #[must_use]
    pub fn summarize(&self, statement: &Statement) -> MetricSummary {
        let gross_revenue = statement.year_total(MetricKind::GrossRevenue.code(&self.codes));

        let metrics = MetricKind::ALL
            .iter()
            .map(|&metric| {
                let code = metric.code(&self.codes);
                let total = statement.year_total(code);
                MetricValue {
                    metric,
                    code: code.to_string(),
                    total,
                    vertical_percent: self.vertical_percent(total, gross_revenue),
                }
            })
            .collect();

        MetricSummary { metrics }
    }

    /// Monthly values of every metric.
    #[must_use]
    pub fn series(&self, statement: &Statement) -> Vec<MetricSeries> {
        MetricKind::ALL
            .iter()
            .map(|&metric| {
                let code = metric.code(&self.codes);
                MetricSeries {
                    metric,
                    code: code.to_string(),
                    values: statement
                        .values_of(code)
                        .copied()
                        .unwrap_or(MonthlyValues::ZERO),
                }
            })
            .collect()
    }

    /// `total / base * 100`, rounded; zero when the base is zero.
    #[must_use]
    pub fn vertical_percent(&self, total: Decimal, base: Decimal) -> Decimal {
        if base.is_zero() {
            return Decimal::ZERO;
        }
        total
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(base))
            .map_or(Decimal::ZERO, |percent| percent.round_dp(self.percent_scale))
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new(MetricCodes::default(), &ReportConfig::default())
    }
}
