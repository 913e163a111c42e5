// 🔍 Technical Audit Report Dashboard
// Executive summary, findings, technical debt, prioritized action plan and
// current system metrics from a technical audit.

pub mod data;
mod views;

use crate::config::{AuditConfig, DashboardConfig, FooterConfig};
use crate::dashboard::{timestamp, unknown_table, unknown_view, write_csv, Control, Dashboard, Selection, Sidebar, ViewInfo};
use crate::error::{DashboardError, Result};
use crate::widgets::{Indicator, Notice, Page};
use std::io;

pub use data::{
    dataset, AuditData, Benchmark, CategoryScore, Effort, Finding, Priority, Recommendation,
    Severity, SystemMetrics, TechDebt,
};

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditView {
    Summary,
    Findings,
    TechDebt,
    Recommendations,
    Metrics,
}

impl AuditView {
    pub const ALL: [AuditView; 5] = [
        AuditView::Summary,
        AuditView::Findings,
        AuditView::TechDebt,
        AuditView::Recommendations,
        AuditView::Metrics,
    ];

    pub fn info(&self) -> ViewInfo {
        match self {
            AuditView::Summary => ViewInfo { slug: "resumen", label: "Resumen Ejecutivo", icon: "📊" },
            AuditView::Findings => ViewInfo { slug: "hallazgos", label: "Hallazgos", icon: "⚠️" },
            AuditView::TechDebt => ViewInfo { slug: "deuda", label: "Deuda Técnica", icon: "💰" },
            AuditView::Recommendations => {
                ViewInfo { slug: "recomendaciones", label: "Recomendaciones", icon: "🎯" }
            }
            AuditView::Metrics => ViewInfo { slug: "metricas", label: "Métricas Actuales", icon: "📈" },
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.info().slug == slug)
    }
}

// ============================================================================
// CLASSIFICATION RULES
// ============================================================================

/// Overall health from a 0–100 score: red below 50, yellow below 70
pub fn score_health(score: f64) -> Indicator {
    if score < 50.0 {
        Indicator::Red
    } else if score < 70.0 {
        Indicator::Yellow
    } else {
        Indicator::Green
    }
}

/// Uptime health: red below 95 %, yellow below 99 %
pub fn uptime_health(uptime: f64) -> Indicator {
    if uptime < 95.0 {
        Indicator::Red
    } else if uptime < 99.0 {
        Indicator::Yellow
    } else {
        Indicator::Green
    }
}

impl Severity {
    pub fn indicator(&self) -> Indicator {
        match self {
            Severity::Critical => Indicator::Red,
            Severity::High => Indicator::Orange,
            Severity::Medium => Indicator::Yellow,
            Severity::Low => Indicator::Blue,
        }
    }
}

impl Priority {
    pub fn indicator(&self) -> Indicator {
        match self {
            Priority::P0 => Indicator::Red,
            Priority::P1 => Indicator::Orange,
            Priority::P2 => Indicator::Yellow,
            Priority::P3 => Indicator::Blue,
        }
    }
}

/// Active findings filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingFilter {
    pub severities: Vec<Severity>,
    pub areas: Vec<String>,
}

impl FindingFilter {
    pub fn matches(&self, finding: &Finding) -> bool {
        self.severities.contains(&finding.severity) && self.areas.iter().any(|a| a == finding.area)
    }

    pub fn apply<'a>(&self, findings: &'a [Finding]) -> Vec<&'a Finding> {
        findings.iter().filter(|f| self.matches(f)).collect()
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub const TABLES: [&str; 6] = [
    "evaluacion",
    "hallazgos",
    "deuda_tecnica",
    "recomendaciones",
    "benchmarks",
    "roadmap",
];

pub struct AuditDashboard {
    project: AuditConfig,
    footer: FooterConfig,
}

impl AuditDashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        AuditDashboard {
            project: config.audit.clone(),
            footer: config.footer.clone(),
        }
    }

    /// The selected view, Resumen when nothing is selected
    fn selected_view(&self, selection: &Selection) -> Result<AuditView> {
        match selection.view.as_deref() {
            None => Ok(AuditView::Summary),
            Some(slug) => AuditView::from_slug(slug).ok_or_else(|| unknown_view(self, slug)),
        }
    }

    fn finding_filter(&self, selection: &Selection) -> Result<FindingFilter> {
        let findings = AuditView::Findings.info().slug;
        let severities = self
            .control_values(findings, selection, "severity")?
            .iter()
            .map(|label| {
                Severity::from_label(label).ok_or_else(|| DashboardError::InvalidFilter {
                    key: "severity".to_string(),
                    value: label.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let areas = self.control_values(findings, selection, "area")?;
        Ok(FindingFilter { severities, areas })
    }
}

impl Dashboard for AuditDashboard {
    fn id(&self) -> &'static str {
        "audit"
    }

    fn title(&self) -> &'static str {
        "Auditoría Técnica - Kepler Labs"
    }

    fn views(&self) -> Vec<ViewInfo> {
        AuditView::ALL.iter().map(|v| v.info()).collect()
    }

    fn controls(&self) -> Vec<Control> {
        let areas: Vec<String> = dataset().finding_areas().iter().map(|a| a.to_string()).collect();
        vec![
            Control::multi(
                "severity",
                "Filtrar por severidad:",
                Severity::ALL.iter().map(|s| s.as_str().to_string()).collect(),
                vec![Severity::Critical.as_str().to_string(), Severity::High.as_str().to_string()],
            )
            .scoped_to("hallazgos"),
            Control::multi("area", "Filtrar por área:", areas.clone(), areas).scoped_to("hallazgos"),
        ]
    }

    fn sidebar(&self, selection: &Selection) -> Result<Sidebar> {
        let view = self.selected_view(selection)?.info();
        Ok(Sidebar {
            brand: format!("🔍 {}", self.footer.company),
            caption: "Auditoría Técnica de Sistemas".to_string(),
            nav_title: "📋 Secciones".to_string(),
            views: self.views(),
            selected_view: view.slug,
            controls: self.resolve_controls(view.slug, selection)?,
            info_title: Some("📄 Información del Proyecto".to_string()),
            info: vec![
                format!("Cliente: {}", self.project.client),
                format!("Fecha: {}", self.project.date),
                format!("Auditor: {}", self.project.auditor),
                format!("Sistemas: {}", self.project.systems),
            ],
            notice: Notice::info(
                "Nota: Esta es una demo de reporte de auditoría técnica con datos simulados.",
            ),
            generated_at: format!("Generado: {}", timestamp(false)),
        })
    }

    fn render(&self, selection: &Selection) -> Result<Page> {
        let view = self.selected_view(selection)?;
        let data = dataset();
        tracing::debug!(view = view.info().slug, "rendering audit view");

        let body = match view {
            AuditView::Summary => views::summary(data),
            AuditView::Findings => views::findings(data, &self.finding_filter(selection)?),
            AuditView::TechDebt => views::tech_debt(data),
            AuditView::Recommendations => views::recommendations(data),
            AuditView::Metrics => views::metrics(data),
        };

        let mut page = body.subtitle("Análisis integral de sistemas, infraestructura y procesos técnicos");
        page.footer = vec![
            "🔍 Auditoría Técnica".to_string(),
            format!("Desarrollado por {}", self.footer.company),
            "Consultoría tecnológica y soluciones de software © 2024".to_string(),
            self.footer.contact.clone(),
        ];
        Ok(page)
    }

    fn tables(&self) -> Vec<&'static str> {
        TABLES.to_vec()
    }

    fn export_csv(&self, table: &str, out: &mut dyn io::Write) -> Result<()> {
        let data = dataset();
        match table {
            "evaluacion" => write_csv(&data.scores, out),
            "hallazgos" => write_csv(&data.findings, out),
            "deuda_tecnica" => write_csv(&data.debt, out),
            "recomendaciones" => write_csv(&data.recommendations, out),
            "benchmarks" => write_csv(&data.benchmarks(), out),
            "roadmap" => write_csv(&data.roadmap, out),
            _ => Err(unknown_table(self, table)),
        }
    }
}
