// 💰 Sales & Inventory Dashboard
// Monthly sales, product catalog, stock alerts and recent customer sales for
// a small hardware store.

pub mod data;
mod views;

use crate::config::{DashboardConfig, FooterConfig, SalesConfig};
use crate::dashboard::{timestamp, unknown_table, unknown_view, write_csv, Control, Dashboard, Selection, Sidebar, ViewInfo};
use crate::error::{DashboardError, Result};
use crate::widgets::{Indicator, Notice, Page};
use std::io;

pub use data::{dataset, AlertLevel, MonthlySales, Product, RecentSale, SalesData, StockAlert};

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesView {
    General,
    Sales,
    Products,
    Customers,
}

impl SalesView {
    pub const ALL: [SalesView; 4] = [
        SalesView::General,
        SalesView::Sales,
        SalesView::Products,
        SalesView::Customers,
    ];

    pub fn info(&self) -> ViewInfo {
        match self {
            SalesView::General => ViewInfo { slug: "general", label: "General", icon: "🏠" },
            SalesView::Sales => ViewInfo { slug: "ventas", label: "Ventas", icon: "💰" },
            SalesView::Products => ViewInfo { slug: "productos", label: "Productos", icon: "📦" },
            SalesView::Customers => ViewInfo { slug: "clientes", label: "Clientes", icon: "👥" },
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.info().slug == slug)
    }
}

// ============================================================================
// PERIOD
// ============================================================================

/// Reporting period; selects the trailing window of the monthly table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastSixMonths,
    LastQuarter,
    LastMonth,
    FullYear,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::LastSixMonths,
        Period::LastQuarter,
        Period::LastMonth,
        Period::FullYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::LastSixMonths => "Últimos 6 meses",
            Period::LastQuarter => "Último trimestre",
            Period::LastMonth => "Último mes",
            Period::FullYear => "Año completo",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Number of trailing months covered; `None` means everything available
    pub fn months(&self) -> Option<usize> {
        match self {
            Period::LastSixMonths => Some(6),
            Period::LastQuarter => Some(3),
            Period::LastMonth => Some(1),
            Period::FullYear => None,
        }
    }

    pub fn window<'a>(&self, monthly: &'a [MonthlySales]) -> &'a [MonthlySales] {
        match self.months() {
            Some(n) if n < monthly.len() => &monthly[monthly.len() - n..],
            _ => monthly,
        }
    }
}

// ============================================================================
// STOCK STATUS
// ============================================================================

/// Inventory health of a product by units in stock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Low,
    Medium,
    Good,
}

impl StockStatus {
    pub fn classify(stock: u32) -> Self {
        if stock < 30 {
            StockStatus::Low
        } else if stock < 50 {
            StockStatus::Medium
        } else {
            StockStatus::Good
        }
    }

    pub fn indicator(&self) -> Indicator {
        match self {
            StockStatus::Low => Indicator::Red,
            StockStatus::Medium => Indicator::Yellow,
            StockStatus::Good => Indicator::Green,
        }
    }

    pub fn label(&self) -> String {
        let name = match self {
            StockStatus::Low => "Bajo",
            StockStatus::Medium => "Medio",
            StockStatus::Good => "Bueno",
        };
        format!("{} {}", self.indicator().icon(), name)
    }
}

impl AlertLevel {
    pub fn indicator(&self) -> Indicator {
        match self {
            AlertLevel::Critical => Indicator::Red,
            AlertLevel::Low => Indicator::Yellow,
            AlertLevel::Medium => Indicator::Blue,
        }
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub const TABLES: [&str; 5] = ["ventas", "productos", "categorias", "alertas", "ultimas_ventas"];

pub struct SalesDashboard {
    branding: SalesConfig,
    footer: FooterConfig,
}

impl SalesDashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        SalesDashboard {
            branding: config.sales.clone(),
            footer: config.footer.clone(),
        }
    }

    /// The selected view, General when nothing is selected
    fn selected_view(&self, selection: &Selection) -> Result<SalesView> {
        match selection.view.as_deref() {
            None => Ok(SalesView::General),
            Some(slug) => SalesView::from_slug(slug).ok_or_else(|| unknown_view(self, slug)),
        }
    }

    fn period(&self, view: SalesView, selection: &Selection) -> Result<Period> {
        let values = self.control_values(view.info().slug, selection, "period")?;
        let label = values.first().map(String::as_str).unwrap_or(Period::LastSixMonths.label());
        Period::from_label(label).ok_or_else(|| DashboardError::InvalidFilter {
            key: "period".to_string(),
            value: label.to_string(),
        })
    }
}

impl Dashboard for SalesDashboard {
    fn id(&self) -> &'static str {
        "sales"
    }

    fn title(&self) -> &'static str {
        "Dashboard BI PyME"
    }

    fn views(&self) -> Vec<ViewInfo> {
        SalesView::ALL.iter().map(|v| v.info()).collect()
    }

    fn controls(&self) -> Vec<Control> {
        vec![Control::single(
            "period",
            "Período",
            Period::ALL.iter().map(|p| p.label().to_string()).collect(),
            Period::LastSixMonths.label(),
        )]
    }

    fn sidebar(&self, selection: &Selection) -> Result<Sidebar> {
        let view = self.selected_view(selection)?.info();
        Ok(Sidebar {
            brand: format!("🏗️ {}", self.branding.business_name),
            caption: self.branding.tagline.clone(),
            nav_title: "🎯 Navegación".to_string(),
            views: self.views(),
            selected_view: view.slug,
            controls: self.resolve_controls(view.slug, selection)?,
            info_title: None,
            info: Vec::new(),
            notice: Notice::info("Demo Portfolio: Dashboard BI para centralizar datos de PyMEs"),
            generated_at: format!("Última actualización: {}", timestamp(true)),
        })
    }

    fn render(&self, selection: &Selection) -> Result<Page> {
        let view = self.selected_view(selection)?;
        let period = self.period(view, selection)?;
        let data = dataset();
        tracing::debug!(view = view.info().slug, period = period.label(), "rendering sales view");

        let body = match view {
            SalesView::General => views::general(data, period),
            SalesView::Sales => views::sales(data, period),
            SalesView::Products => views::products(data),
            SalesView::Customers => views::customers(data),
        };

        let mut page = body.subtitle("Sistema de análisis centralizado de datos empresariales");
        page.footer = vec![
            "📊 Dashboard BI para PyMEs".to_string(),
            format!("Desarrollado por {}", self.footer.company),
            "Sistema de análisis empresarial centralizado © 2024".to_string(),
        ];
        Ok(page)
    }

    fn tables(&self) -> Vec<&'static str> {
        TABLES.to_vec()
    }

    fn export_csv(&self, table: &str, out: &mut dyn io::Write) -> Result<()> {
        let data = dataset();
        match table {
            "ventas" => write_csv(&data.monthly, out),
            "productos" => write_csv(&data.products, out),
            "categorias" => write_csv(&data.categories, out),
            "alertas" => write_csv(&data.alerts, out),
            "ultimas_ventas" => write_csv(&data.recent_sales, out),
            _ => Err(unknown_table(self, table)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::classify(12), StockStatus::Low);
        assert_eq!(StockStatus::classify(29), StockStatus::Low);
        assert_eq!(StockStatus::classify(30), StockStatus::Medium);
        assert_eq!(StockStatus::classify(49), StockStatus::Medium);
        assert_eq!(StockStatus::classify(50), StockStatus::Good);
        assert_eq!(StockStatus::classify(89).label(), "🟢 Bueno");
    }

    #[test]
    fn test_period_window() {
        let monthly = &dataset().monthly;
        assert_eq!(Period::LastSixMonths.window(monthly).len(), 6);
        assert_eq!(Period::FullYear.window(monthly).len(), 6);
        let quarter = Period::LastQuarter.window(monthly);
        assert_eq!(quarter.len(), 3);
        assert_eq!(quarter[0].month, "Abril");
        assert_eq!(Period::LastMonth.window(monthly)[0].month, "Junio");
        assert_eq!(Period::LastQuarter.window(&monthly[..2]).len(), 2);
    }

    #[test]
    fn test_view_slugs() {
        for view in SalesView::ALL {
            assert_eq!(SalesView::from_slug(view.info().slug), Some(view));
        }
        assert_eq!(SalesView::from_slug("hallazgos"), None);
    }

    #[test]
    fn test_alert_indicators() {
        assert_eq!(AlertLevel::Critical.indicator().icon(), "🔴");
        assert_eq!(AlertLevel::Low.indicator().icon(), "🟡");
        assert_eq!(AlertLevel::Medium.indicator().icon(), "🔵");
    }

    #[test]
    fn test_export_csv() {
        let dashboard = SalesDashboard::new(&DashboardConfig::default());
        let mut out = Vec::new();
        dashboard.export_csv("ultimas_ventas", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID,Cliente,Monto,Fecha"));
        assert_eq!(lines.next(), Some("V-1245,Constructora Lopez,12500,15/06/2024"));

        let mut out = Vec::new();
        dashboard.export_csv("ventas", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Mes,Ventas,Costos,Clientes,Margen\nEnero,45000,28000,120,37.8\n"));

        let err = dashboard.export_csv("hallazgos", &mut Vec::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let dashboard = SalesDashboard::new(&DashboardConfig::default());
        let sel = Selection::new().with_filter("period", &["Década"]);
        assert!(matches!(dashboard.render(&sel), Err(DashboardError::InvalidFilter { .. })));
    }
}
