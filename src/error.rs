// ❗ Dashboard errors
// Every failure a render pass or an export can hit has a named variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unknown dashboard: {0}")]
    UnknownDashboard(String),

    #[error("Unknown view '{view}' for dashboard '{dashboard}'")]
    UnknownView { dashboard: String, view: String },

    #[error("Unknown table '{table}' for dashboard '{dashboard}'")]
    UnknownTable { dashboard: String, table: String },

    #[error("Invalid value '{value}' for filter '{key}'")]
    InvalidFilter { key: String, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// True for lookups of things that do not exist (dashboards, views, tables)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DashboardError::UnknownDashboard(_)
                | DashboardError::UnknownView { .. }
                | DashboardError::UnknownTable { .. }
        )
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(DashboardError::UnknownDashboard("x".into()).is_not_found());
        assert!(DashboardError::UnknownView {
            dashboard: "sales".into(),
            view: "nope".into()
        }
        .is_not_found());
        assert!(!DashboardError::InvalidFilter {
            key: "period".into(),
            value: "decade".into()
        }
        .is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = DashboardError::InvalidFilter {
            key: "severity".into(),
            value: "Extremo".into(),
        };
        assert_eq!(err.to_string(), "Invalid value 'Extremo' for filter 'severity'");
    }
}
