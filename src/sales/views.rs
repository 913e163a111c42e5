// View renderers for the sales dashboard

use super::data::SalesData;
use super::{Period, StockStatus};
use crate::charts::{self, ColorScale, Series, BLUE, GREEN, ORANGE, SET3};
use crate::format::{money, percent1, signed};
use crate::stats;
use crate::widgets::{Card, Delta, MetricCard, Page, Section, Table, Widget};

fn column<T>(rows: &[T], f: impl Fn(&T) -> f64) -> Vec<f64> {
    rows.iter().map(f).collect()
}

// ============================================================================
// GENERAL
// ============================================================================

pub fn general(data: &SalesData, period: Period) -> Page {
    let window = period.window(&data.monthly);
    let months: Vec<&str> = window.iter().map(|m| m.month).collect();
    let sales = column(window, |m| m.sales as f64);
    let costs = column(window, |m| m.costs as f64);
    let margins = column(window, |m| m.margin);

    let mut active = MetricCard::new(
        "👥 Clientes Activos",
        window.last().map(|m| m.customers.to_string()).unwrap_or_default(),
    );
    if let [.., prev, last] = window {
        let change = last.customers as i64 - prev.customers as i64;
        active = active.delta(Delta::new(format!("{} vs mes anterior", signed(change))));
    }

    let kpis = vec![
        MetricCard::new("💵 Ventas Totales", money(stats::sum(&sales)))
            .delta(Delta::new(period.label())),
        MetricCard::new("📈 Margen Promedio", percent1(stats::mean(&margins).unwrap_or(0.0)))
            .delta(Delta::new("Rentabilidad")),
        active,
        MetricCard::new("⚠️ Productos Críticos", data.alerts.len().to_string())
            .delta(Delta::inverse("Requieren atención")),
    ];

    let evolution = charts::line(
        &months,
        vec![
            Series::new("Ventas", sales, BLUE),
            Series::new("Costos", costs, ORANGE),
        ],
    );

    let names: Vec<&str> = data.categories.iter().map(|c| c.category).collect();
    let shares = column(&data.categories, |c| c.percentage as f64);
    let distribution = charts::pie(&names, shares, 0.4, SET3);

    let alerts = data
        .alerts
        .iter()
        .map(|a| {
            Card::new(a.product)
                .indicator(a.level.indicator())
                .line(format!("Stock: {} unidades | Nivel: {}", a.stock, a.level.as_str()))
        })
        .collect();

    let latest = data
        .recent_sales
        .iter()
        .take(3)
        .map(|s| {
            Card::new(format!("{} - {}", s.id, s.customer))
                .metric(MetricCard::new("Monto", money(s.amount as f64)))
                .line(format!("Fecha: {}", s.date_display()))
        })
        .collect();

    Page::new("📊 Dashboard BI - PyME")
        .section(Section::new().with(Widget::Metrics(kpis)))
        .row(vec![
            Section::titled("📊 Evolución de Ventas").with(Widget::Chart(evolution)),
            Section::titled("🎯 Distribución por Categoría").with(Widget::Chart(distribution)),
        ])
        .row(vec![
            Section::titled("⚠️ Alertas de Stock").with(Widget::Cards(alerts)),
            Section::titled("📄 Últimas Ventas").with(Widget::Cards(latest)),
        ])
}

// ============================================================================
// VENTAS
// ============================================================================

pub fn sales(data: &SalesData, period: Period) -> Page {
    let window = period.window(&data.monthly);
    let months: Vec<&str> = window.iter().map(|m| m.month).collect();
    let sales = column(window, |m| m.sales as f64);
    let costs = column(window, |m| m.costs as f64);
    let customers = column(window, |m| m.customers as f64);
    let margins = column(window, |m| m.margin);

    let mut kpis = vec![MetricCard::new(
        "Venta Promedio Mensual",
        money(stats::mean(&sales).unwrap_or(0.0)),
    )];

    if let Some(best) = stats::argmax(&sales) {
        kpis.push(MetricCard::new(
            format!("Mejor Mes: {}", window[best].month),
            money(sales[best]),
        ));
    }

    let growth = match (sales.first(), sales.last()) {
        (Some(&first), Some(&last)) => stats::pct_change(first, last).unwrap_or(0.0),
        _ => 0.0,
    };
    kpis.push(MetricCard::new("Crecimiento", percent1(growth)).delta(Delta::new(percent1(growth))));

    let versus = charts::bar(
        &months,
        vec![
            Series::new("Ventas", sales, BLUE),
            Series::new("Costos", costs, ORANGE),
        ],
    )
    .height(400);

    let customers_chart = charts::spline(&months, vec![Series::new("Clientes", customers, GREEN)]);

    let margin_colors = ColorScale::RdYlGn.colors(&margins);
    let margin_chart =
        charts::bar(&months, vec![Series::per_point("Margen", margins, margin_colors)]).no_legend();

    Page::new("💰 Análisis de Ventas")
        .section(Section::new().with(Widget::Metrics(kpis)))
        .section(Section::titled("📊 Ventas vs Costos Mensual").with(Widget::Chart(versus)))
        .row(vec![
            Section::titled("👥 Evolución de Clientes").with(Widget::Chart(customers_chart)),
            Section::titled("📈 Margen de Ganancia (%)").with(Widget::Chart(margin_chart)),
        ])
}

// ============================================================================
// PRODUCTOS
// ============================================================================

pub fn products(data: &SalesData) -> Page {
    let sales = column(&data.products, |p| p.sales as f64);
    let top = stats::argmax(&sales)
        .map(|i| data.products[i].name)
        .unwrap_or("-");
    let stock_total: u32 = data.products.iter().map(|p| p.stock).sum();

    let kpis = vec![
        MetricCard::new("Total Productos", data.products.len().to_string()),
        MetricCard::new("Producto Top", top),
        MetricCard::new("Stock Total", format!("{} unidades", stock_total)),
    ];

    let mut ranked: Vec<_> = data.products.iter().collect();
    ranked.sort_by_key(|p| p.sales);
    let names: Vec<&str> = ranked.iter().map(|p| p.name).collect();
    let values = column(&ranked, |p| p.sales as f64);
    let colors = ColorScale::Blues.colors(&values);
    let top_chart = charts::hbar(&names, vec![Series::per_point("Ventas", values, colors)])
        .height(400)
        .no_legend();

    let mut inventory = Table::text(&["Producto", "Ventas", "Stock", "Categoría", "Estado"]);
    for p in &data.products {
        inventory = inventory.row(vec![
            p.name.into(),
            money(p.sales as f64).into(),
            format!("{} unidades", p.stock).into(),
            p.category.into(),
            StockStatus::classify(p.stock).label().into(),
        ]);
    }

    Page::new("📦 Análisis de Productos")
        .section(Section::new().with(Widget::Metrics(kpis)))
        .section(Section::titled("🏆 Top 5 Productos por Ventas").with(Widget::Chart(top_chart)))
        .section(Section::titled("📋 Inventario Actual").with(Widget::Table(inventory)))
}

// ============================================================================
// CLIENTES
// ============================================================================

pub fn customers(data: &SalesData) -> Page {
    let amounts = column(&data.recent_sales, |s| s.amount as f64);

    let kpis = vec![
        MetricCard::new("Total Clientes", data.registered_customers.to_string())
            .delta(Delta::new("Registrados")),
        MetricCard::new("Nuevos este Mes", data.new_customers.to_string())
            .delta(Delta::new(data.new_customers_change)),
        MetricCard::new("Ticket Promedio", money(stats::mean(&amounts).unwrap_or(0.0))),
    ];

    let cards = data
        .recent_sales
        .iter()
        .map(|s| {
            Card::new(s.customer)
                .line(format!("ID: {}", s.id))
                .metric(MetricCard::new("Monto", money(s.amount as f64)))
                .line(format!("📅 {}", s.date_display()))
        })
        .collect();

    let distribution = charts::histogram(&amounts, 10, BLUE)
        .height(300)
        .x_title("Monto de Venta")
        .y_title("Frecuencia");

    Page::new("👥 Análisis de Clientes")
        .section(Section::new().with(Widget::Metrics(kpis)))
        .section(Section::titled("🛒 Ventas Recientes por Cliente").with(Widget::Cards(cards)))
        .section(Section::titled("💵 Distribución de Montos de Venta").with(Widget::Chart(distribution)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::sales::dataset;

    #[test]
    fn test_general_kpis() {
        let page = general(dataset(), Period::LastSixMonths);
        assert_eq!(page.metric("💵 Ventas Totales").unwrap().value, "$331,000");
        assert_eq!(page.metric("📈 Margen Promedio").unwrap().value, "41.1%");
        let active = page.metric("👥 Clientes Activos").unwrap();
        assert_eq!(active.value, "172");
        assert_eq!(active.delta.as_ref().unwrap().text, "+24 vs mes anterior");
        assert_eq!(page.metric("⚠️ Productos Críticos").unwrap().value, "3");
    }

    #[test]
    fn test_general_period_window() {
        let page = general(dataset(), Period::LastQuarter);
        assert_eq!(page.metric("💵 Ventas Totales").unwrap().value, "$186,000");
        let delta = page.metric("💵 Ventas Totales").unwrap().delta.clone().unwrap();
        assert_eq!(delta.text, "Último trimestre");

        let single = general(dataset(), Period::LastMonth);
        assert!(single.metric("👥 Clientes Activos").unwrap().delta.is_none());
    }

    #[test]
    fn test_general_cards() {
        let page = general(dataset(), Period::LastSixMonths);
        let cards = page.cards();
        assert_eq!(cards.len(), 6, "3 alerts + 3 latest sales");
        assert_eq!(cards[0].heading(), "🔴 Alambre tejido");
        assert_eq!(cards[3].title, "V-1245 - Constructora Lopez");
        assert_eq!(cards[3].metrics[0].value, "$12,500");
    }

    #[test]
    fn test_sales_view() {
        let page = sales(dataset(), Period::LastSixMonths);
        assert_eq!(page.metric("Venta Promedio Mensual").unwrap().value, "$55,167");
        assert_eq!(page.metric("Mejor Mes: Junio").unwrap().value, "$67,000");
        let growth = page.metric("Crecimiento").unwrap();
        assert_eq!(growth.value, "48.9%");
        assert_eq!(growth.delta.as_ref().unwrap().text, "48.9%");

        let charts = page.charts();
        assert_eq!(charts.len(), 3);
        assert!(charts[0].is_grouped());
        assert_eq!(charts[1].kind, ChartKind::Line { smooth: true, markers: true });
        assert_eq!(charts[2].series[0].colors.len(), 6);
    }

    #[test]
    fn test_products_view() {
        let page = products(dataset());
        assert_eq!(page.metric("Total Productos").unwrap().value, "5");
        assert_eq!(page.metric("Producto Top").unwrap().value, "Cemento 50kg");
        assert_eq!(page.metric("Stock Total").unwrap().value, "236 unidades");

        let chart = page.charts()[0];
        assert!(chart.is_horizontal());
        assert_eq!(chart.categories.first().map(String::as_str), Some("Ladrillos comunes"));
        assert_eq!(chart.categories.last().map(String::as_str), Some("Cemento 50kg"));

        let table = page.tables()[0];
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[0][1].display(), "$8,500");
        assert_eq!(table.rows[0][4].display(), "🟡 Medio");
        assert_eq!(table.rows[1][4].display(), "🔴 Bajo");
        assert_eq!(table.rows[4][2].display(), "89 unidades");
    }

    #[test]
    fn test_customers_view() {
        let page = customers(dataset());
        assert_eq!(page.metric("Ticket Promedio").unwrap().value, "$6,320");
        assert_eq!(page.metric("Total Clientes").unwrap().value, "452");
        assert_eq!(page.cards().len(), 5);
        let histogram = page.charts()[0];
        assert_eq!(histogram.kind, ChartKind::Histogram);
        let total: f64 = histogram.series[0].values.iter().sum();
        assert_eq!(total, 5.0);
    }
}
