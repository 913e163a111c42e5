// View renderers for the audit report

use super::data::{AuditData, Priority, COVERAGE_STANDARD, RESPONSE_BENCHMARK_MS, UPTIME_TARGET};
use super::{score_health, uptime_health, FindingFilter};
use crate::charts::{self, ColorScale, Series, RDBU, SCORE_AMBER, SCORE_GREEN, SCORE_RED, SEVERITY_BLUE};
use crate::format::{money, signed, thousands};
use crate::stats;
use crate::widgets::{
    Card, ColumnKind, Delta, Indicator, MetricCard, Notice, Page, Section, Table, TableCell, Widget,
};

/// Hours in a 30-day month, used to turn uptime into downtime
const HOURS_PER_MONTH: f64 = 720.0;

const NO_DETAIL: &str =
    "Descripción detallada y recomendaciones técnicas disponibles en el reporte completo.";

// ============================================================================
// RESUMEN EJECUTIVO
// ============================================================================

pub fn summary(data: &AuditData) -> Page {
    let scores: Vec<f64> = data.scores.iter().map(|s| s.score as f64).collect();
    let overall = stats::mean(&scores).unwrap_or(0.0);
    let critical: u32 = data.scores.iter().map(|s| s.critical).sum();
    let medium: u32 = data.scores.iter().map(|s| s.medium).sum();
    let low: u32 = data.scores.iter().map(|s| s.low).sum();
    let debt: u32 = data.debt.iter().map(|d| d.cost_usd).sum();

    let kpis = vec![
        MetricCard::new(
            "Estado General",
            format!("{} {:.0}/100", score_health(overall).icon(), overall),
        ),
        MetricCard::new("Hallazgos Críticos", critical.to_string())
            .delta(Delta::inverse("Requieren atención inmediata")),
        MetricCard::new("Deuda Técnica Estimada", format!("{} USD", money(debt as f64))),
    ];

    let categories: Vec<&str> = data.scores.iter().map(|s| s.category).collect();
    let colors = scores.iter().map(|&s| charts::score_color(s).to_string()).collect();
    let by_category = charts::hbar(&categories, vec![Series::per_point("Puntuación", scores, colors).labelled()])
        .range(0.0, 100.0)
        .x_title("Puntuación")
        .height(400)
        .no_legend();

    let severity_colors = vec![SCORE_RED.to_string(), SCORE_AMBER.to_string(), SEVERITY_BLUE.to_string()];
    let distribution = charts::bar(
        &["Crítico", "Medio", "Bajo"],
        vec![Series::per_point("Cantidad", vec![critical as f64, medium as f64, low as f64], severity_colors).labelled()],
    )
    .y_title("Cantidad")
    .height(400)
    .no_legend();

    let mut weak: Vec<_> = data.scores.iter().filter(|s| s.score < 50).collect();
    weak.sort_by_key(|s| s.score);
    let attention: Vec<Card> = weak
        .iter()
        .map(|s| {
            Card::new(s.category)
                .indicator(Indicator::Red)
                .metric(MetricCard::new("Puntuación", format!("{}/100", s.score)))
                .metric(MetricCard::new("Críticos", s.critical.to_string()))
                .line(format!(
                    "Problemas identificados: {} críticos, {} medios, {} bajos",
                    s.critical, s.medium, s.low
                ))
        })
        .collect();

    Page::new("📊 Resumen Ejecutivo")
        .section(Section::new().with(Widget::Metrics(kpis)))
        .row(vec![
            Section::titled("🎯 Evaluación por Categoría").with(Widget::Chart(by_category)),
            Section::titled("📊 Distribución de Hallazgos").with(Widget::Chart(distribution)),
        ])
        .section(Section::titled("🚨 Áreas que Requieren Atención Inmediata").with(Widget::Cards(attention)))
}

// ============================================================================
// HALLAZGOS
// ============================================================================

pub fn findings(data: &AuditData, filter: &FindingFilter) -> Page {
    let selected = filter.apply(&data.findings);

    let mut section = Section::new();
    if selected.is_empty() {
        section = section.with(Widget::Notice(Notice::info(
            "Ningún hallazgo coincide con los filtros seleccionados.",
        )));
    } else {
        let cards = selected
            .iter()
            .map(|f| {
                let mut card = Card::new(format!("{}: {}", f.id, f.title))
                    .indicator(f.severity.indicator())
                    .metric(MetricCard::new("Severidad", f.severity.as_str()))
                    .line(format!(
                        "Área: {} | Impacto: {} | Esfuerzo estimado: {}",
                        f.area,
                        f.impact.as_str(),
                        f.effort
                    ));
                card = match &f.detail {
                    Some(d) => card
                        .line(format!("Descripción: {}", d.description))
                        .line(format!("Riesgo: {}", d.risk))
                        .line(format!("Recomendación: {}", d.recommendation)),
                    None => card.line(NO_DETAIL),
                };
                card
            })
            .collect();
        section = section.with(Widget::Cards(cards));
    }

    Page::new("⚠️ Hallazgos Detallados").section(section)
}

// ============================================================================
// DEUDA TÉCNICA
// ============================================================================

pub fn tech_debt(data: &AuditData) -> Page {
    let components: Vec<&str> = data.debt.iter().map(|d| d.component).collect();
    let hours: Vec<f64> = data.debt.iter().map(|d| d.hours as f64).collect();
    let by_component = charts::pie(&components, hours, 0.4, RDBU).height(400);

    let mut by_cost: Vec<_> = data.debt.iter().collect();
    by_cost.sort_by_key(|d| d.cost_usd);
    let names: Vec<&str> = by_cost.iter().map(|d| d.component).collect();
    let costs: Vec<f64> = by_cost.iter().map(|d| d.cost_usd as f64).collect();
    let colors = ColorScale::Reds.colors(&costs);
    let cost_chart = charts::hbar(&names, vec![Series::per_point("Costo_USD", costs, colors)])
        .x_title("USD")
        .height(400)
        .no_legend();

    let mut breakdown = Table::text(&["Componente del Sistema", "Esfuerzo Estimado", "Costo (USD)"]);
    for d in &data.debt {
        breakdown = breakdown.row(vec![
            d.component.into(),
            format!("{}h", d.hours).into(),
            money(d.cost_usd as f64).into(),
        ]);
    }

    let total_hours: u32 = data.debt.iter().map(|d| d.hours).sum();
    let total_cost: u32 = data.debt.iter().map(|d| d.cost_usd).sum();
    let totals = vec![
        MetricCard::new("Total Horas de Trabajo", format!("{}h", total_hours))
            .help("Aproximadamente 5-6 meses de trabajo de 1 desarrollador"),
        MetricCard::new("Inversión Total Estimada", format!("{} USD", money(total_cost as f64))),
    ];

    Page::new("💰 Análisis de Deuda Técnica")
        .row(vec![
            Section::titled("📊 Distribución por Componente").with(Widget::Chart(by_component)),
            Section::titled("💵 Costo Estimado por Área").with(Widget::Chart(cost_chart)),
        ])
        .section(Section::titled("📋 Desglose Detallado").with(Widget::Table(breakdown)))
        .section(Section::new().with(Widget::Metrics(totals)))
}

// ============================================================================
// RECOMENDACIONES
// ============================================================================

pub fn recommendations(data: &AuditData) -> Page {
    let mut legend = vec!["Las siguientes recomendaciones están priorizadas según impacto y urgencia:".to_string()];
    legend.extend(Priority::ALL.iter().map(|p| format!("• {}: {}", p.as_str(), p.horizon())));

    let mut page = Page::new("🎯 Plan de Acción Recomendado").section(Section::new().with(Widget::Text(legend)));

    for priority in Priority::ALL {
        let recs: Vec<_> = data.recommendations.iter().filter(|r| r.priority == priority).collect();
        if recs.is_empty() {
            continue;
        }
        let mut table = Table::text(&["Acción", "Impacto", "Esfuerzo"]);
        for r in recs {
            table = table.row(vec![
                r.action.into(),
                r.impact.as_str().into(),
                r.effort.as_str().into(),
            ]);
        }
        let title = format!("{} {}: {}", priority.indicator().icon(), priority.as_str(), priority.title());
        page = page.section(Section::titled(title).with(Widget::Table(table)));
    }

    let mut roadmap = Table::text(&["Período", "Acciones Principales"])
        .column("Progreso", ColumnKind::Progress { min: 0.0, max: 100.0 });
    for phase in &data.roadmap {
        roadmap = roadmap.row(vec![
            phase.phase.into(),
            phase.actions.into(),
            TableCell::Progress(phase.progress as f64),
        ]);
    }

    page.section(Section::titled("🗓️ Roadmap Sugerido").with(Widget::Table(roadmap)))
}

// ============================================================================
// MÉTRICAS ACTUALES
// ============================================================================

pub fn metrics(data: &AuditData) -> Page {
    let m = &data.metrics;
    let uptime_gap = m.uptime - UPTIME_TARGET;
    let response_gap = m.avg_response_ms as i64 - RESPONSE_BENCHMARK_MS as i64;
    let coverage_gap = m.test_coverage as i64 - COVERAGE_STANDARD as i64;
    let incident_change = m.monthly_incidents as i64 - m.previous_monthly_incidents as i64;

    let availability = vec![
        MetricCard::new("Uptime", format!("{} {}%", uptime_health(m.uptime).icon(), m.uptime))
            .delta(Delta::inverse(format!("{:.1}% vs objetivo", uptime_gap))),
        MetricCard::new("Tiempo de Respuesta", format!("{}ms", m.avg_response_ms))
            .delta(Delta::inverse(format!("{}ms vs benchmark", signed(response_gap)))),
        MetricCard::new("Cobertura de Tests", format!("{}%", m.test_coverage)).delta(Delta::inverse(
            format!("{}% vs estándar ({}%)", coverage_gap, COVERAGE_STANDARD),
        )),
    ];

    let operations = vec![
        MetricCard::new("Errores Mensuales", thousands(m.monthly_errors as u64))
            .help("Errores 5xx registrados en el último mes"),
        MetricCard::new("Incidentes/Mes", m.monthly_incidents.to_string())
            .delta(Delta::inverse(format!("{} vs mes anterior", signed(incident_change)))),
        MetricCard::new("Tiempo Resolución", format!("{}h", m.avg_resolution_hours))
            .help("Tiempo promedio de resolución de incidentes"),
    ];

    let benchmarks = data.benchmarks();
    let names: Vec<&str> = benchmarks.iter().map(|b| b.metric).collect();
    let comparison = charts::bar(
        &names,
        vec![
            Series::new("Actual", benchmarks.iter().map(|b| b.actual).collect(), SCORE_RED),
            Series::new("Estándar", benchmarks.iter().map(|b| b.standard).collect(), SCORE_GREEN),
        ],
    )
    .y_title("Valor")
    .height(400);

    let downtime_hours = ((100.0 - m.uptime) / 100.0 * HOURS_PER_MONTH).round();
    let notices = vec![
        Widget::Notice(Notice::warning(format!(
            "Uptime por debajo del SLA: El sistema tiene un uptime de {}%, significativamente inferior al objetivo de {}%. Esto representa aproximadamente {} horas de downtime al mes.",
            m.uptime, UPTIME_TARGET, downtime_hours
        ))),
        Widget::Notice(Notice::error(format!(
            "Cobertura de tests crítica: Con solo {}% de cobertura, el sistema está altamente expuesto a regresiones y errores en producción.",
            m.test_coverage
        ))),
        Widget::Notice(Notice::info(format!(
            "Tiempo de respuesta elevado: Los {}ms promedio sugieren problemas de rendimiento o queries ineficientes que afectan la experiencia de usuario.",
            m.avg_response_ms
        ))),
    ];

    let mut observations = Section::titled("⚠️ Observaciones Clave");
    observations.widgets = notices;

    Page::new("📈 Estado Actual del Sistema")
        .section(Section::new().with(Widget::Metrics(availability)))
        .section(Section::new().with(Widget::Metrics(operations)))
        .section(Section::titled("📊 Comparación con Estándares de la Industria").with(Widget::Chart(comparison)))
        .section(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::data::{dataset, Severity};
    use crate::widgets::{NoticeKind, Tone};

    fn default_filter() -> FindingFilter {
        FindingFilter {
            severities: vec![Severity::Critical, Severity::High],
            areas: dataset().finding_areas().iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_kpis() {
        let page = summary(dataset());
        assert_eq!(page.metric("Estado General").unwrap().value, "🔴 49/100");
        assert_eq!(page.metric("Hallazgos Críticos").unwrap().value, "24");
        assert_eq!(page.metric("Deuda Técnica Estimada").unwrap().value, "$60,000 USD");
    }

    #[test]
    fn test_summary_charts() {
        let page = summary(dataset());
        let charts = page.charts();
        assert_eq!(charts[0].value_range, Some((0.0, 100.0)));
        assert_eq!(charts[0].series[0].color(3), SCORE_RED);
        assert_eq!(charts[0].series[0].color(4), SCORE_GREEN);
        assert_eq!(charts[1].series[0].values, vec![24.0, 25.0, 14.0]);
    }

    #[test]
    fn test_attention_areas_sorted_by_score() {
        let page = summary(dataset());
        let titles: Vec<&str> = page.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Documentación", "Monitoreo", "Mantenibilidad", "Seguridad"]);
        assert_eq!(
            page.cards()[0].lines[0],
            "Problemas identificados: 5 críticos, 3 medios, 1 bajos"
        );
    }

    #[test]
    fn test_findings_default_filter() {
        let page = findings(dataset(), &default_filter());
        let cards = page.cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].heading(), "🔴 HAL-001: Credenciales hardcodeadas en repositorio");
        assert!(cards[0].lines.iter().any(|l| l.starts_with("Riesgo: ")));
        assert_eq!(cards[2].heading(), "🟠 HAL-003: API sin rate limiting");
        assert_eq!(cards[2].lines.last().map(String::as_str), Some(NO_DETAIL));
    }

    #[test]
    fn test_findings_empty_filter() {
        let filter = FindingFilter { severities: vec![], areas: vec!["Seguridad".into()] };
        let page = findings(dataset(), &filter);
        assert!(page.cards().is_empty());
        assert_eq!(page.notices()[0].kind, NoticeKind::Info);
    }

    #[test]
    fn test_tech_debt_view() {
        let page = tech_debt(dataset());
        assert_eq!(page.metric("Total Horas de Trabajo").unwrap().value, "800h");
        assert_eq!(page.metric("Inversión Total Estimada").unwrap().value, "$60,000 USD");
        let table = page.tables()[0];
        assert_eq!(table.rows[0][1].display(), "240h");
        assert_eq!(table.rows[0][2].display(), "$18,000");
        let cost_chart = page.charts()[1];
        assert_eq!(cost_chart.categories.first().map(String::as_str), Some("Infraestructura"));
        assert_eq!(cost_chart.categories.last().map(String::as_str), Some("Sistema Legacy"));
        let shares = page.charts()[0].shares();
        assert!((shares[0] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommendations_grouped_by_priority() {
        let page = recommendations(dataset());
        let titled: Vec<&str> = page
            .rows
            .iter()
            .flatten()
            .filter_map(|s| s.title.as_deref())
            .collect();
        assert_eq!(
            titled,
            vec![
                "🔴 P0: Crítico - Acción Inmediata",
                "🟠 P1: Alta - Corto Plazo",
                "🟡 P2: Media - Mediano Plazo",
                "🔵 P3: Baja - Largo Plazo",
                "🗓️ Roadmap Sugerido",
            ]
        );
        let tables = page.tables();
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[0][1].display(), "Crítico");
        assert_eq!(tables[0].rows[0][2].display(), "Corto");
        assert_eq!(tables[3].rows.len(), 1);
        assert_eq!(tables[4].rows[0][2], TableCell::Progress(0.0));
    }

    #[test]
    fn test_metrics_view() {
        let page = metrics(dataset());
        let uptime = page.metric("Uptime").unwrap();
        assert_eq!(uptime.value, "🔴 94.2%");
        let delta = uptime.delta.as_ref().unwrap();
        assert_eq!(delta.text, "-5.7% vs objetivo");
        assert_eq!(delta.tone(), Tone::Good, "inverse color on a falling delta");
        assert_eq!(page.metric("Tiempo de Respuesta").unwrap().delta.as_ref().unwrap().text, "+350ms vs benchmark");
        assert_eq!(page.metric("Cobertura de Tests").unwrap().delta.as_ref().unwrap().text, "-57% vs estándar (80%)");
        assert_eq!(page.metric("Errores Mensuales").unwrap().value, "1,247");
        assert_eq!(page.metric("Incidentes/Mes").unwrap().delta.as_ref().unwrap().text, "+3 vs mes anterior");
        assert_eq!(page.metric("Tiempo Resolución").unwrap().value, "6.5h");

        let notices = page.notices();
        assert_eq!(notices.len(), 3);
        assert!(notices[0].text.contains("aproximadamente 42 horas"));
        assert_eq!(notices[1].kind, NoticeKind::Error);
    }
}
