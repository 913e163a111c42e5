//! HTML dashboard rendering
//!
//! Turns a rendered page plus its sidebar into a self-contained HTML document
//! with inline CSS and SVG charts. Navigation entries are plain links and the
//! filter controls are a GET form, so every interaction is a fresh render.

use crate::charts::{Chart, ChartKind, Series};
use crate::dashboard::{Control, Dashboard, Registry, Selection, Sidebar};
use crate::error::Result;
use crate::text::chart_value;
use crate::widgets::{Card, ColumnKind, MetricCard, Notice, NoticeKind, Page, Section, Table, TableCell, Tone, Widget};
use std::fmt::Write;

/// Full document for one dashboard and selection
pub fn render_dashboard(registry: &Registry, dashboard: &dyn Dashboard, selection: &Selection) -> Result<String> {
    let page = dashboard.render(selection)?;
    let sidebar = dashboard.sidebar(selection)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    {topbar}
    <div class="layout">
        {sidebar}
        <main>
            {page}
        </main>
    </div>
</body>
</html>"#,
        title = html_escape(dashboard.title()),
        css = inline_css(),
        topbar = render_topbar(registry, dashboard.id()),
        sidebar = render_sidebar(dashboard.id(), &sidebar, selection),
        page = render_page(&page),
    ))
}

/// Landing page listing every dashboard
pub fn render_index(registry: &Registry) -> String {
    let mut items = String::new();
    for d in registry.dashboards() {
        let views: Vec<String> = d.views().iter().map(|v| html_escape(&v.nav_label())).collect();
        let _ = write!(
            items,
            r#"<a class="dash-link" href="/d/{id}"><h2>{title}</h2><p>{views}</p></a>"#,
            id = d.id(),
            title = html_escape(d.title()),
            views = views.join(" · "),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <title>Kepler Labs - Dashboards</title>
    <style>{css}</style>
</head>
<body>
    <main class="index">
        <h1>📊 Kepler Labs - Dashboards</h1>
        {items}
    </main>
</body>
</html>"#,
        css = inline_css(),
        items = items,
    )
}

// ============================================================================
// CHROME
// ============================================================================

fn render_topbar(registry: &Registry, current: &str) -> String {
    let tabs: Vec<String> = registry
        .dashboards()
        .iter()
        .map(|d| {
            let class = if d.id() == current { "tab active" } else { "tab" };
            format!(r#"<a class="{}" href="/d/{}">{}</a>"#, class, d.id(), html_escape(d.title()))
        })
        .collect();
    format!(r#"<nav class="topbar">{}</nav>"#, tabs.join(""))
}

/// Query string for `pairs`, starting with '?' (empty when there are none)
pub fn query_string(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("?{}", encoded.join("&"))
}

fn render_sidebar(id: &str, sidebar: &Sidebar, selection: &Selection) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<h2 class="brand">{}</h2><p class="caption">{}</p><h3>{}</h3><ul class="nav">"#,
        html_escape(&sidebar.brand),
        html_escape(&sidebar.caption),
        html_escape(&sidebar.nav_title),
    );

    for view in &sidebar.views {
        // keep the filter state when switching views
        let mut target = selection.clone();
        target.view = Some(view.slug.to_string());
        let class = if view.slug == sidebar.selected_view { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            r#"<li{}><a href="/d/{}{}">{}</a></li>"#,
            class,
            id,
            html_escape(&query_string(&target.to_pairs())),
            html_escape(&view.nav_label()),
        );
    }
    html.push_str("</ul>");

    let visible: Vec<&Control> = sidebar
        .controls
        .iter()
        .filter(|c| c.applies_to(sidebar.selected_view))
        .collect();
    if !visible.is_empty() {
        let _ = write!(
            html,
            r#"<form method="get" action="/d/{}"><input type="hidden" name="view" value="{}">"#,
            id,
            html_escape(sidebar.selected_view),
        );
        for control in visible {
            html.push_str(&render_control(control));
        }
        html.push_str(r#"<button type="submit">Aplicar</button></form>"#);
    }

    if let Some(title) = &sidebar.info_title {
        let _ = write!(html, "<h3>{}</h3>", html_escape(title));
    }
    if !sidebar.info.is_empty() {
        html.push_str(r#"<ul class="info">"#);
        for line in &sidebar.info {
            let _ = write!(html, "<li>{}</li>", html_escape(line));
        }
        html.push_str("</ul>");
    }

    let _ = write!(
        html,
        r#"{}<p class="generated">{}</p>"#,
        render_notice(&sidebar.notice),
        html_escape(&sidebar.generated_at),
    );
    format!(r#"<aside class="sidebar">{}</aside>"#, html)
}

fn render_control(control: &Control) -> String {
    let key = html_escape(control.key);
    let mut html = format!(r#"<fieldset><legend>{}</legend>"#, html_escape(control.label));

    if control.multi {
        // an empty value keeps the key present when every box is unchecked
        let _ = write!(html, r#"<input type="hidden" name="{}" value="">"#, key);
        for option in &control.options {
            let checked = if control.is_selected(option) { " checked" } else { "" };
            let _ = write!(
                html,
                r#"<label><input type="checkbox" name="{key}" value="{value}"{checked}> {value}</label>"#,
                key = key,
                value = html_escape(option),
                checked = checked,
            );
        }
    } else {
        let _ = write!(html, r#"<select name="{}">"#, key);
        for option in &control.options {
            let selected = if control.is_selected(option) { " selected" } else { "" };
            let _ = write!(html, r#"<option{}>{}</option>"#, selected, html_escape(option));
        }
        html.push_str("</select>");
    }
    html.push_str("</fieldset>");
    html
}

// ============================================================================
// PAGE
// ============================================================================

pub fn render_page(page: &Page) -> String {
    let mut html = format!("<h1>{}</h1>", html_escape(&page.title));
    if let Some(subtitle) = &page.subtitle {
        let _ = write!(html, r#"<p class="subtitle">{}</p>"#, html_escape(subtitle));
    }

    for row in &page.rows {
        html.push_str(r#"<div class="row">"#);
        for section in row {
            html.push_str(&render_section(section));
        }
        html.push_str("</div>");
    }

    if !page.footer.is_empty() {
        html.push_str("<footer>");
        for line in &page.footer {
            let _ = write!(html, "<p>{}</p>", html_escape(line));
        }
        html.push_str("</footer>");
    }
    html
}

fn render_section(section: &Section) -> String {
    let mut html = format!(r#"<section style="flex:{}">"#, section.weight);
    if let Some(title) = &section.title {
        let _ = write!(html, "<h3>{}</h3>", html_escape(title));
    }
    for widget in &section.widgets {
        html.push_str(&render_widget(widget));
    }
    html.push_str("</section>");
    html
}

fn render_widget(widget: &Widget) -> String {
    match widget {
        Widget::Metrics(metrics) => {
            let cards: String = metrics.iter().map(render_metric).collect();
            format!(r#"<div class="metrics">{}</div>"#, cards)
        }
        Widget::Chart(chart) => render_chart(chart),
        Widget::Table(table) => render_table(table),
        Widget::Cards(cards) => cards.iter().map(render_card).collect(),
        Widget::Notice(notice) => render_notice(notice),
        Widget::Text(lines) => lines.iter().map(|l| format!("<p>{}</p>", html_escape(l))).collect(),
    }
}

fn render_metric(m: &MetricCard) -> String {
    let help = m
        .help
        .as_ref()
        .map(|h| format!(r#" title="{}""#, html_escape(h)))
        .unwrap_or_default();
    let delta = m
        .delta
        .as_ref()
        .map(|d| {
            let class = match d.tone() {
                Tone::Good => "good",
                Tone::Bad => "bad",
                Tone::Neutral => "neutral",
            };
            format!(r#"<div class="delta {}">{} {}</div>"#, class, d.arrow(), html_escape(&d.text))
        })
        .unwrap_or_default();
    format!(
        r#"<div class="metric"{}><div class="label">{}</div><div class="value">{}</div>{}</div>"#,
        help,
        html_escape(&m.label),
        html_escape(&m.value),
        delta,
    )
}

fn render_card(card: &Card) -> String {
    let color = card.indicator.map_or("#d1d5db", |i| i.hex());
    let mut html = format!(
        r#"<div class="card" style="border-left-color:{}"><h4>{}</h4>"#,
        color,
        html_escape(&card.heading()),
    );
    for m in &card.metrics {
        let _ = write!(
            html,
            r#"<p><span class="label">{}:</span> <strong>{}</strong></p>"#,
            html_escape(&m.label),
            html_escape(&m.value),
        );
    }
    for line in &card.lines {
        let _ = write!(html, "<p>{}</p>", html_escape(line));
    }
    html.push_str("</div>");
    html
}

fn render_notice(notice: &Notice) -> String {
    let kind = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Warning => "warning",
        NoticeKind::Error => "error",
    };
    format!(r#"<div class="notice {}">{}</div>"#, kind, html_escape(&notice.text))
}

fn render_table(table: &Table) -> String {
    let mut html = String::from("<table><thead><tr>");
    for col in &table.columns {
        let _ = write!(html, "<th>{}</th>", html_escape(&col.label));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for (cell, col) in row.iter().zip(&table.columns) {
            match (cell, &col.kind) {
                (TableCell::Progress(v), ColumnKind::Progress { min, max }) => {
                    let pct = if max > min { ((v - min) / (max - min) * 100.0).clamp(0.0, 100.0) } else { 0.0 };
                    let _ = write!(
                        html,
                        r#"<td><div class="progress"><div style="width:{:.0}%"></div></div>{}</td>"#,
                        pct,
                        cell.display(),
                    );
                }
                _ => {
                    let _ = write!(html, "<td>{}</td>", html_escape(&cell.display()));
                }
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

// ============================================================================
// SVG CHARTS
// ============================================================================

const WIDTH: f64 = 640.0;
const LEFT: f64 = 64.0;
const RIGHT: f64 = 16.0;
const TOP: f64 = 28.0;
const BOTTOM: f64 = 44.0;

pub fn render_chart(chart: &Chart) -> String {
    let body = match chart.kind {
        ChartKind::Line { smooth, markers } => svg_line(chart, smooth, markers),
        ChartKind::Bar { horizontal: true } => svg_hbar(chart),
        ChartKind::Bar { horizontal: false } => svg_bars(chart, 0.2),
        ChartKind::Histogram => svg_bars(chart, 0.02),
        ChartKind::Pie { hole } => svg_pie(chart, hole),
    };
    format!(
        r#"<div class="chart"><svg viewBox="0 0 {w} {h}" width="100%" role="img">{body}</svg></div>"#,
        w = WIDTH,
        h = chart.height,
        body = body,
    )
}

fn axis_titles(chart: &Chart, h: f64) -> String {
    let mut svg = String::new();
    if let Some(x) = &chart.x_title {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="axis-title" text-anchor="middle">{}</text>"#,
            LEFT + (WIDTH - LEFT - RIGHT) / 2.0,
            h - 4.0,
            html_escape(x),
        );
    }
    if let Some(y) = &chart.y_title {
        let _ = write!(
            svg,
            r#"<text x="12" y="{:.1}" class="axis-title" text-anchor="middle" transform="rotate(-90 12 {:.1})">{}</text>"#,
            h / 2.0,
            h / 2.0,
            html_escape(y),
        );
    }
    svg
}

fn legend(series: &[Series]) -> String {
    let mut svg = String::new();
    let mut x = WIDTH - RIGHT;
    for s in series.iter().rev() {
        x -= 12.0 + s.name.chars().count() as f64 * 7.0 + 16.0;
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="6" width="12" height="12" fill="{}"/><text x="{:.1}" y="16" class="legend">{}</text>"#,
            x,
            s.color(0),
            x + 16.0,
            html_escape(&s.name),
        );
    }
    svg
}

/// Horizontal gridlines with value labels for a [0, max] axis
fn value_grid(max: f64, plot_h: f64) -> String {
    let mut svg = String::new();
    for i in 0..=4 {
        let v = max * i as f64 / 4.0;
        let y = TOP + plot_h - plot_h * i as f64 / 4.0;
        let _ = write!(
            svg,
            r#"<line x1="{l:.1}" x2="{r:.1}" y1="{y:.1}" y2="{y:.1}" class="grid"/><text x="{tx:.1}" y="{ty:.1}" class="tick" text-anchor="end">{label}</text>"#,
            l = LEFT,
            r = WIDTH - RIGHT,
            y = y,
            tx = LEFT - 6.0,
            ty = y + 4.0,
            label = chart_value(v.round()),
        );
    }
    svg
}

fn svg_bars(chart: &Chart, gap: f64) -> String {
    let h = chart.height as f64;
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = h - TOP - BOTTOM;
    let max = chart.value_max().max(1.0);
    let n = chart.categories.len().max(1) as f64;
    let m = chart.series.len().max(1) as f64;
    let group_w = plot_w / n;
    let bar_w = group_w * (1.0 - gap) / m;

    let mut svg = value_grid(max, plot_h);
    for (i, category) in chart.categories.iter().enumerate() {
        let group_x = LEFT + group_w * i as f64 + group_w * gap / 2.0;
        for (j, s) in chart.series.iter().enumerate() {
            let v = s.values.get(i).copied().unwrap_or(0.0).max(0.0);
            let bh = plot_h * v / max;
            let x = group_x + bar_w * j as f64;
            let y = TOP + plot_h - bh;
            let _ = write!(
                svg,
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                x,
                y,
                bar_w,
                bh,
                s.color(i),
                html_escape(category),
                chart_value(v),
            );
            if s.value_labels {
                let _ = write!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" class="value" text-anchor="middle">{}</text>"#,
                    x + bar_w / 2.0,
                    y - 4.0,
                    chart_value(v),
                );
            }
        }
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="tick" text-anchor="middle">{}</text>"#,
            LEFT + group_w * (i as f64 + 0.5),
            TOP + plot_h + 16.0,
            html_escape(category),
        );
    }
    if chart.legend {
        svg.push_str(&legend(&chart.series));
    }
    svg.push_str(&axis_titles(chart, h));
    svg
}

fn svg_hbar(chart: &Chart) -> String {
    let h = chart.height as f64;
    let left = 150.0;
    let plot_w = WIDTH - left - RIGHT - 40.0;
    let plot_h = h - TOP - BOTTOM;
    let max = chart.value_max().max(1.0);
    let n = chart.categories.len().max(1) as f64;
    let m = chart.series.len().max(1) as f64;
    let band = plot_h / n;
    let bar_h = band * 0.8 / m;

    let mut svg = String::new();
    for (i, category) in chart.categories.iter().enumerate() {
        // first category at the bottom, as on a value axis
        let band_y = TOP + plot_h - band * (i as f64 + 1.0) + band * 0.1;
        for (j, s) in chart.series.iter().enumerate() {
            let v = s.values.get(i).copied().unwrap_or(0.0).max(0.0);
            let bw = plot_w * v / max;
            let y = band_y + bar_h * j as f64;
            let _ = write!(
                svg,
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                left,
                y,
                bw,
                bar_h,
                s.color(i),
                html_escape(category),
                chart_value(v),
            );
            if s.value_labels {
                let _ = write!(
                    svg,
                    r#"<text x="{:.1}" y="{:.1}" class="value">{}</text>"#,
                    left + bw + 4.0,
                    y + bar_h / 2.0 + 4.0,
                    chart_value(v),
                );
            }
        }
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="tick" text-anchor="end">{}</text>"#,
            left - 6.0,
            band_y + band * 0.4 + 4.0,
            html_escape(category),
        );
    }
    if chart.legend {
        svg.push_str(&legend(&chart.series));
    }
    svg.push_str(&axis_titles(chart, h));
    svg
}

fn svg_line(chart: &Chart, smooth: bool, markers: bool) -> String {
    let h = chart.height as f64;
    let plot_w = WIDTH - LEFT - RIGHT;
    let plot_h = h - TOP - BOTTOM;
    let max = (chart.value_max() * 1.1).max(1.0);
    let n = chart.categories.len();
    let step = if n > 1 { plot_w / (n - 1) as f64 } else { 0.0 };
    let point = |i: usize, v: f64| (LEFT + step * i as f64, TOP + plot_h - plot_h * v.max(0.0) / max);

    let mut svg = value_grid(max, plot_h);
    for (i, category) in chart.categories.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" class="tick" text-anchor="middle">{}</text>"#,
            point(i, 0.0).0,
            TOP + plot_h + 16.0,
            html_escape(category),
        );
    }

    for s in &chart.series {
        let pts: Vec<(f64, f64)> = s.values.iter().enumerate().map(|(i, v)| point(i, *v)).collect();
        let d = if smooth { smooth_path(&pts) } else { straight_path(&pts) };
        let _ = write!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="3"/>"#,
            d,
            s.color(0),
        );
        if markers {
            for (i, (x, y)) in pts.iter().enumerate() {
                let _ = write!(
                    svg,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}"><title>{}</title></circle>"#,
                    x,
                    y,
                    s.color(0),
                    chart_value(s.values[i]),
                );
            }
        }
    }
    if chart.legend {
        svg.push_str(&legend(&chart.series));
    }
    svg.push_str(&axis_titles(chart, h));
    svg
}

fn straight_path(pts: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in pts.iter().enumerate() {
        let _ = write!(d, "{}{:.1},{:.1} ", if i == 0 { "M" } else { "L" }, x, y);
    }
    d.trim_end().to_string()
}

/// Catmull-Rom spline through the points, as cubic Béziers
fn smooth_path(pts: &[(f64, f64)]) -> String {
    if pts.len() < 3 {
        return straight_path(pts);
    }
    let mut d = format!("M{:.1},{:.1}", pts[0].0, pts[0].1);
    for i in 0..pts.len() - 1 {
        let p0 = pts[i.saturating_sub(1)];
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = pts[(i + 2).min(pts.len() - 1)];
        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);
        let _ = write!(d, " C{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}", c1.0, c1.1, c2.0, c2.1, p2.0, p2.1);
    }
    d
}

fn svg_pie(chart: &Chart, hole: f64) -> String {
    let series = match chart.series.first() {
        Some(s) => s,
        None => return String::new(),
    };
    let h = chart.height as f64;
    let r = (h / 2.0 - 16.0).max(10.0);
    let (cx, cy) = (r + 16.0, h / 2.0);
    let ri = r * hole;
    let at = |radius: f64, angle: f64| (cx + radius * angle.sin(), cy - radius * angle.cos());

    let mut svg = String::new();
    let mut start = 0.0_f64;
    for (i, (name, share)) in chart.categories.iter().zip(chart.shares()).enumerate() {
        let color = series.color(i);
        if share >= 99.999 {
            let _ = write!(
                svg,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{c}"/><circle cx="{cx:.1}" cy="{cy:.1}" r="{ri:.1}" fill="white"/>"#,
                cx = cx,
                cy = cy,
                r = r,
                ri = ri,
                c = color,
            );
        } else if share > 0.0 {
            let end = start + share / 100.0 * std::f64::consts::TAU;
            let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
            let (x0, y0) = at(r, start);
            let (x1, y1) = at(r, end);
            let (xi1, yi1) = at(ri, end);
            let (xi0, yi0) = at(ri, start);
            let _ = write!(
                svg,
                r#"<path d="M{x0:.1},{y0:.1} A{r:.1},{r:.1} 0 {large} 1 {x1:.1},{y1:.1} L{xi1:.1},{yi1:.1} A{ri:.1},{ri:.1} 0 {large} 0 {xi0:.1},{yi0:.1} Z" fill="{c}" stroke="white"><title>{name}: {share:.1}%</title></path>"#,
                x0 = x0,
                y0 = y0,
                x1 = x1,
                y1 = y1,
                xi1 = xi1,
                yi1 = yi1,
                xi0 = xi0,
                yi0 = yi0,
                r = r,
                ri = ri,
                large = large,
                c = color,
                name = html_escape(name),
                share = share,
            );
            start = end;
        }

        let ly = 24.0 + 22.0 * i as f64;
        let lx = cx + r + 32.0;
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="12" height="12" fill="{}"/><text x="{:.1}" y="{:.1}" class="legend">{} ({:.1}%)</text>"#,
            lx,
            ly - 10.0,
            color,
            lx + 18.0,
            ly,
            html_escape(name),
            share,
        );
    }
    svg
}

// ============================================================================
// UTILITIES
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #1f2937; background: #f9fafb; }
a { color: inherit; text-decoration: none; }
.topbar { display: flex; gap: 4px; padding: 8px 16px; background: #111827; }
.topbar .tab { color: #9ca3af; padding: 6px 12px; border-radius: 6px; }
.topbar .tab.active { color: #fff; background: #374151; }
.layout { display: flex; min-height: calc(100vh - 44px); }
.sidebar { width: 300px; flex-shrink: 0; padding: 20px; background: #f0f2f6; border-right: 1px solid #e5e7eb; }
.sidebar .brand { margin: 0; }
.sidebar .caption, .sidebar .generated { color: #6b7280; font-size: 0.85rem; }
.nav { list-style: none; padding: 0; }
.nav li a { display: block; padding: 6px 10px; border-radius: 6px; }
.nav li.active a { background: #fff; font-weight: 600; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
fieldset { border: none; padding: 0; margin: 12px 0; }
fieldset label { display: block; font-size: 0.9rem; }
legend { font-weight: 600; margin-bottom: 4px; }
button { padding: 6px 14px; border: none; border-radius: 6px; background: #1f77b4; color: #fff; cursor: pointer; }
.info { padding-left: 18px; font-size: 0.9rem; }
main { flex: 1; padding: 24px 32px; min-width: 0; }
main.index { max-width: 900px; margin: 0 auto; }
.dash-link { display: block; padding: 16px 20px; margin: 12px 0; background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
h1 { margin-top: 0; }
.subtitle { color: #6b7280; margin-top: -8px; }
.row { display: flex; gap: 24px; margin-bottom: 24px; }
section { min-width: 0; }
.metrics { display: flex; gap: 16px; }
.metric { flex: 1; background: #fff; border-radius: 8px; padding: 14px 16px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.metric .label { color: #6b7280; font-size: 0.85rem; }
.metric .value { font-size: 1.8rem; font-weight: 600; margin: 4px 0; }
.delta { font-size: 0.85rem; display: inline-block; padding: 1px 8px; border-radius: 10px; }
.delta.good { color: #047857; background: #d1fae5; }
.delta.bad { color: #b91c1c; background: #fee2e2; }
.delta.neutral { color: #6b7280; background: #f3f4f6; }
.card { background: #fff; border-left: 4px solid #d1d5db; border-radius: 6px; padding: 10px 14px; margin-bottom: 10px; }
.card h4 { margin: 0 0 6px; }
.card p { margin: 2px 0; font-size: 0.9rem; }
.card .label { color: #6b7280; }
.notice { padding: 10px 14px; border-radius: 6px; margin: 8px 0; font-size: 0.9rem; }
.notice.info { background: #dbeafe; color: #1e40af; }
.notice.warning { background: #fef3c7; color: #92400e; }
.notice.error { background: #fee2e2; color: #991b1b; }
table { width: 100%; border-collapse: collapse; background: #fff; font-size: 0.9rem; }
th { text-align: left; background: #f3f4f6; padding: 8px 10px; }
td { padding: 8px 10px; border-top: 1px solid #e5e7eb; }
.progress { display: inline-block; width: 80px; height: 8px; background: #e5e7eb; border-radius: 4px; margin-right: 8px; vertical-align: middle; }
.progress div { height: 100%; background: #10b981; border-radius: 4px; }
.chart { background: #fff; border-radius: 8px; padding: 8px; }
.chart .grid { stroke: #e5e7eb; }
.chart .tick, .chart .legend, .chart .value { font-size: 11px; fill: #4b5563; }
.chart .axis-title { font-size: 12px; fill: #374151; }
footer { text-align: center; color: #6b7280; border-top: 1px solid #e5e7eb; margin-top: 32px; padding-top: 12px; font-size: 0.9rem; }
footer p { margin: 4px 0; }
"#
}
