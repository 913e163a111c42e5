// End-to-end checks of every view through the registry, against hand-computed values

use kepler_dashboards::widgets::{NoticeKind, Tone};
use kepler_dashboards::{DashboardConfig, DashboardError, Page, Registry, Selection};

fn registry() -> Registry {
    Registry::new(&DashboardConfig::default())
}

fn render(dashboard: &str, selection: Selection) -> Page {
    registry().get(dashboard).unwrap().render(&selection).unwrap()
}

fn value(page: &Page, label: &str) -> String {
    page.metric(label)
        .unwrap_or_else(|| panic!("missing metric {}", label))
        .value
        .clone()
}

fn delta(page: &Page, label: &str) -> String {
    page.metric(label).and_then(|m| m.delta.clone()).map(|d| d.text).unwrap_or_default()
}

#[test]
fn test_registry_ids() {
    let registry = registry();
    assert_eq!(registry.ids(), vec!["sales", "audit"]);
    assert!(matches!(registry.get("hr"), Err(DashboardError::UnknownDashboard(_))));
}

#[test]
fn test_sales_general_per_period() {
    let cases = [
        ("Últimos 6 meses", "$331,000", "41.1%", "+24 vs mes anterior"),
        ("Año completo", "$331,000", "41.1%", "+24 vs mes anterior"),
        ("Último trimestre", "$186,000", "43.0%", "+24 vs mes anterior"),
        ("Último mes", "$67,000", "43.3%", ""),
    ];
    for (period, total, margin, customers) in cases {
        let page = render("sales", Selection::new().with_filter("period", &[period]));
        assert_eq!(value(&page, "💵 Ventas Totales"), total, "{}", period);
        assert_eq!(delta(&page, "💵 Ventas Totales"), period);
        assert_eq!(value(&page, "📈 Margen Promedio"), margin, "{}", period);
        assert_eq!(value(&page, "👥 Clientes Activos"), "172");
        assert_eq!(delta(&page, "👥 Clientes Activos"), customers, "{}", period);
    }
}

#[test]
fn test_sales_general_layout() {
    let page = render("sales", Selection::new());
    assert_eq!(page.subtitle.as_deref(), Some("Sistema de análisis centralizado de datos empresariales"));
    assert_eq!(page.footer[1], "Desarrollado por Kepler Labs");
    let critical = page.metric("⚠️ Productos Críticos").unwrap();
    assert_eq!(critical.value, "3");
    assert_eq!(critical.delta.as_ref().unwrap().tone(), Tone::Bad);

    let charts = page.charts();
    assert_eq!(charts[0].series.len(), 2);
    assert_eq!(charts[0].categories.len(), 6);
    assert_eq!(charts[1].shares(), vec![45.0, 25.0, 20.0, 10.0]);
}

#[test]
fn test_sales_view_growth() {
    let page = render("sales", Selection::view("ventas"));
    assert_eq!(value(&page, "Venta Promedio Mensual"), "$55,167");
    assert_eq!(value(&page, "Mejor Mes: Junio"), "$67,000");
    assert_eq!(value(&page, "Crecimiento"), "48.9%");

    let quarter = render("sales", Selection::view("ventas").with_filter("period", &["Último trimestre"]));
    assert_eq!(value(&quarter, "Venta Promedio Mensual"), "$62,000");
    assert_eq!(value(&quarter, "Crecimiento"), "9.8%");

    let single = render("sales", Selection::view("ventas").with_filter("period", &["Último mes"]));
    assert_eq!(value(&single, "Crecimiento"), "0.0%");
}

#[test]
fn test_products_and_customers() {
    let products = render("sales", Selection::view("productos"));
    assert_eq!(value(&products, "Producto Top"), "Cemento 50kg");
    assert_eq!(value(&products, "Stock Total"), "236 unidades");
    let statuses: Vec<String> = products.tables()[0].rows.iter().map(|r| r[4].display()).collect();
    assert_eq!(statuses, vec!["🟡 Medio", "🔴 Bajo", "🟢 Bueno", "🔴 Bajo", "🟢 Bueno"]);

    let customers = render("sales", Selection::view("clientes"));
    assert_eq!(value(&customers, "Total Clientes"), "452");
    assert_eq!(value(&customers, "Nuevos este Mes"), "28");
    assert_eq!(delta(&customers, "Nuevos este Mes"), "+12%");
    assert_eq!(value(&customers, "Ticket Promedio"), "$6,320");
}

#[test]
fn test_audit_summary() {
    let page = render("audit", Selection::new());
    assert_eq!(value(&page, "Estado General"), "🔴 49/100");
    assert_eq!(value(&page, "Hallazgos Críticos"), "24");
    assert_eq!(value(&page, "Deuda Técnica Estimada"), "$60,000 USD");
    assert_eq!(page.cards().len(), 4);
    assert_eq!(page.footer.last().map(String::as_str), Some("Email: info@keplerlabs.com | WhatsApp: +54 9 264 580 2870"));
}

#[test]
fn test_audit_findings_filters() {
    let default = render("audit", Selection::view("hallazgos"));
    assert_eq!(default.cards().len(), 4);

    let everything = render(
        "audit",
        Selection::view("hallazgos").with_filter("severity", &["Crítico", "Alto", "Medio", "Bajo"]),
    );
    assert_eq!(everything.cards().len(), 5);

    let security = render("audit", Selection::view("hallazgos").with_filter("area", &["Seguridad"]));
    let ids: Vec<&str> = security.cards().iter().map(|c| &c.title[..7]).collect();
    assert_eq!(ids, vec!["HAL-001", "HAL-003"]);

    let none = render("audit", Selection::view("hallazgos").with_filter("area", &[]));
    assert!(none.cards().is_empty());
    assert_eq!(none.notices()[0].kind, NoticeKind::Info);
}

#[test]
fn test_audit_filters_ignored_outside_findings() {
    let summary = render("audit", Selection::new().with_filter("severity", &["Bajo"]));
    assert_eq!(value(&summary, "Hallazgos Críticos"), "24");

    // render and sidebar agree on a value the summary never reads
    let registry = registry();
    let audit = registry.get("audit").unwrap();
    let bogus = Selection::new().with_filter("severity", &["Extremo"]);
    assert!(audit.render(&bogus).is_ok());
    let sidebar = audit.sidebar(&bogus).unwrap();
    assert_eq!(sidebar.controls[0].selected, vec!["Crítico", "Alto"]);

    let on_findings = Selection::view("hallazgos").with_filter("severity", &["Extremo"]);
    assert!(matches!(audit.render(&on_findings), Err(DashboardError::InvalidFilter { .. })));
    assert!(matches!(audit.sidebar(&on_findings), Err(DashboardError::InvalidFilter { .. })));
}

#[test]
fn test_audit_debt_and_metrics() {
    let debt = render("audit", Selection::view("deuda"));
    assert_eq!(value(&debt, "Total Horas de Trabajo"), "800h");
    assert_eq!(value(&debt, "Inversión Total Estimada"), "$60,000 USD");

    let metrics = render("audit", Selection::view("metricas"));
    assert_eq!(value(&metrics, "Uptime"), "🔴 94.2%");
    assert_eq!(delta(&metrics, "Uptime"), "-5.7% vs objetivo");
    assert_eq!(value(&metrics, "Tiempo de Respuesta"), "850ms");
    assert_eq!(value(&metrics, "Cobertura de Tests"), "23%");
    assert_eq!(value(&metrics, "Incidentes/Mes"), "8");
    let bench = metrics.charts()[0];
    assert_eq!(bench.series[0].values, vec![94.2, 23.0, 850.0, 6.5]);
    assert_eq!(bench.series[1].values, vec![99.9, 80.0, 500.0, 2.0]);
}

#[test]
fn test_recommendations_roadmap() {
    let page = render("audit", Selection::view("recomendaciones"));
    let tables = page.tables();
    assert_eq!(tables.len(), 5);
    let total: usize = tables[..4].iter().map(|t| t.rows.len()).sum();
    assert_eq!(total, 7);
    assert_eq!(tables[4].rows.len(), 4);
    assert_eq!(tables[4].rows[3][0].display(), "Mes 7+");
}

#[test]
fn test_invalid_selections() {
    let registry = registry();
    let sales = registry.get("sales").unwrap();
    assert!(matches!(sales.render(&Selection::view("hallazgos")), Err(DashboardError::UnknownView { .. })));
    assert!(matches!(
        sales.render(&Selection::new().with_filter("period", &["Semana"])),
        Err(DashboardError::InvalidFilter { .. })
    ));
    // unknown keys are ignored
    assert!(sales.render(&Selection::new().with_filter("color", &["rojo"])).is_ok());
}

#[test]
fn test_every_table_exports() {
    let registry = registry();
    for dashboard in registry.dashboards() {
        for table in dashboard.tables() {
            let mut out = Vec::new();
            dashboard.export_csv(table, &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.lines().count() > 1, "{}/{} has rows", dashboard.id(), table);
        }
    }
}
