// Kepler Dashboards - Core Library
// Exposes all modules for use in CLI, web server, and tests

pub mod error;
pub mod config;
pub mod stats;
pub mod format;
pub mod charts;     // Chart adapters
pub mod widgets;    // Page model
pub mod dashboard;  // Views, controls, registry
pub mod sales;      // Ferretería sales & inventory
pub mod audit;      // Technical audit report
pub mod text;       // Plain-text page rendering

#[cfg(feature = "server")]
pub mod html;
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use config::DashboardConfig;
pub use charts::{Chart, ChartKind, Series};
pub use widgets::{Card, MetricCard, Notice, Page, Section, Table, Widget};
pub use dashboard::{Control, Dashboard, Registry, Selection, Sidebar, ViewInfo};
pub use sales::SalesDashboard;
pub use audit::AuditDashboard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
