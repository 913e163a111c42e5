// 📝 Plain-text rendering
// Used by `kepler-dash render` to print one view without a terminal UI.

use crate::charts::{Chart, ChartKind};
use crate::dashboard::Sidebar;
use crate::widgets::{Card, MetricCard, NoticeKind, Page, Table, Widget};
use std::fmt::Write;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Chart values: integers get thousands separators, the rest one decimal
pub fn chart_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        let s = crate::format::thousands(v.abs() as u64);
        if v < 0.0 {
            format!("-{}", s)
        } else {
            s
        }
    } else {
        format!("{:.1}", v)
    }
}

pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.title);
    if let Some(subtitle) = &page.subtitle {
        let _ = writeln!(out, "{}", subtitle);
    }
    let _ = writeln!(out, "{}", RULE);

    for section in page.rows.iter().flatten() {
        if let Some(title) = &section.title {
            let _ = writeln!(out, "\n## {}", title);
        } else {
            out.push('\n');
        }
        for widget in &section.widgets {
            write_widget(&mut out, widget);
        }
    }

    if !page.footer.is_empty() {
        let _ = writeln!(out, "\n{}", RULE);
        for line in &page.footer {
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

pub fn render_sidebar(sidebar: &Sidebar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n{}\n", sidebar.brand, sidebar.caption);
    let _ = writeln!(out, "{}", sidebar.nav_title);
    for view in &sidebar.views {
        let marker = if view.slug == sidebar.selected_view { "→" } else { " " };
        let _ = writeln!(out, " {} {}", marker, view.nav_label());
    }
    for control in sidebar.controls.iter().filter(|c| c.applies_to(sidebar.selected_view)) {
        let _ = writeln!(out, "\n{} {}", control.label, control.selected.join(", "));
    }
    if let Some(title) = &sidebar.info_title {
        let _ = writeln!(out, "\n{}", title);
    }
    for line in &sidebar.info {
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(out, "\nℹ️  {}", sidebar.notice.text);
    let _ = writeln!(out, "{}", sidebar.generated_at);
    out
}

fn write_widget(out: &mut String, widget: &Widget) {
    match widget {
        Widget::Metrics(metrics) => {
            for m in metrics {
                write_metric(out, m, "");
            }
        }
        Widget::Chart(chart) => write_chart(out, chart),
        Widget::Table(table) => write_table(out, table),
        Widget::Cards(cards) => {
            for card in cards {
                write_card(out, card);
            }
        }
        Widget::Notice(notice) => {
            let icon = match notice.kind {
                NoticeKind::Info => "ℹ️ ",
                NoticeKind::Warning => "⚠️ ",
                NoticeKind::Error => "❌",
            };
            let _ = writeln!(out, "{} {}", icon, notice.text);
        }
        Widget::Text(lines) => {
            for line in lines {
                let _ = writeln!(out, "{}", line);
            }
        }
    }
}

fn write_metric(out: &mut String, m: &MetricCard, indent: &str) {
    let _ = write!(out, "{}{}: {}", indent, m.label, m.value);
    if let Some(delta) = &m.delta {
        let _ = write!(out, "  ({} {})", delta.arrow(), delta.text);
    }
    out.push('\n');
    if let Some(help) = &m.help {
        let _ = writeln!(out, "{}  ? {}", indent, help);
    }
}

fn write_card(out: &mut String, card: &Card) {
    let _ = writeln!(out, "• {}", card.heading());
    for m in &card.metrics {
        write_metric(out, m, "    ");
    }
    for line in &card.lines {
        let _ = writeln!(out, "    {}", line);
    }
}

fn write_chart(out: &mut String, chart: &Chart) {
    match chart.kind {
        ChartKind::Pie { .. } => {
            let values = chart.series.first().map(|s| s.values.as_slice()).unwrap_or(&[]);
            for ((name, v), share) in chart.categories.iter().zip(values).zip(chart.shares()) {
                let _ = writeln!(out, "  {}: {} ({:.1}%)", name, chart_value(*v), share);
            }
        }
        _ => {
            let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
            if chart.series.len() > 1 {
                let _ = writeln!(out, "  [{}]", names.join(" / "));
            }
            for (i, category) in chart.categories.iter().enumerate() {
                let values: Vec<String> = chart
                    .series
                    .iter()
                    .map(|s| s.values.get(i).map(|v| chart_value(*v)).unwrap_or_default())
                    .collect();
                let _ = writeln!(out, "  {}: {}", category, values.join(" / "));
            }
        }
    }
}

fn write_table(out: &mut String, table: &Table) {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| r.iter().map(|c| c.display()).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(col.label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let pad = |s: &str, w: usize| format!("{}{}", s, " ".repeat(w.saturating_sub(s.chars().count())));
    let header: Vec<String> = table.columns.iter().zip(&widths).map(|(c, w)| pad(&c.label, *w)).collect();
    let _ = writeln!(out, "  {}", header.join(" │ "));
    for row in &rows {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        let _ = writeln!(out, "  {}", cells.join(" │ "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dashboard::{Registry, Selection};

    #[test]
    fn test_chart_value() {
        assert_eq!(chart_value(45000.0), "45,000");
        assert_eq!(chart_value(37.8), "37.8");
        assert_eq!(chart_value(-3.0), "-3");
    }

    #[test]
    fn test_render_sales_general() {
        let registry = Registry::new(&DashboardConfig::default());
        let page = registry.get("sales").unwrap().render(&Selection::new()).unwrap();
        let text = render_page(&page);
        assert!(text.starts_with("📊 Dashboard BI - PyME\n"));
        assert!(text.contains("💵 Ventas Totales: $331,000"));
        assert!(text.contains("• 🔴 Alambre tejido"));
        assert!(text.contains("Junio: 67,000 / 38,000"));
        assert!(text.contains("Desarrollado por Kepler Labs"));
    }

    #[test]
    fn test_render_table_and_notice() {
        let registry = Registry::new(&DashboardConfig::default());
        let audit = registry.get("audit").unwrap();
        let debt = render_page(&audit.render(&Selection::view("deuda")).unwrap());
        assert!(debt.contains("Sistema Legacy"));
        assert!(debt.contains("240h"));
        let metrics = render_page(&audit.render(&Selection::view("metricas")).unwrap());
        assert!(metrics.contains("⚠️  Uptime por debajo del SLA"));
    }

    #[test]
    fn test_render_sidebar_marks_selected_view() {
        let registry = Registry::new(&DashboardConfig::default());
        let audit = registry.get("audit").unwrap();
        let text = render_sidebar(&audit.sidebar(&Selection::view("hallazgos")).unwrap());
        assert!(text.contains("→ ⚠️ Hallazgos"));
        assert!(text.contains("Filtrar por severidad: Crítico, Alto"));
        assert!(text.contains("Cliente: EmpresaTech SRL"));
    }
}
