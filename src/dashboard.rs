// 🧭 Dashboard Framework
// A dashboard is a set of mutually exclusive views over a static dataset.
// The navigation selection (plus any filter controls) decides which view a
// render pass produces.

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::widgets::{Notice, Page};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;

// ============================================================================
// SELECTION
// ============================================================================

/// Current UI state: selected view plus filter values keyed by control
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub view: Option<String>,
    pub filters: BTreeMap<String, Vec<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(slug: &str) -> Self {
        Selection { view: Some(slug.to_string()), filters: BTreeMap::new() }
    }

    pub fn with_filter(mut self, key: &str, values: &[&str]) -> Self {
        self.filters
            .insert(key.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Build from query-string style pairs. `view` selects the view, any
    /// other key is a filter; repeated keys accumulate and empty values only
    /// mark the key as present.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut selection = Selection::new();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == "view" {
                if !value.is_empty() {
                    selection.view = Some(value.to_string());
                }
                continue;
            }
            let entry = selection.filters.entry(key.to_string()).or_default();
            if !value.is_empty() {
                entry.push(value.to_string());
            }
        }
        selection
    }

    /// Query-string pairs reproducing this selection
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(view) = &self.view {
            pairs.push(("view".to_string(), view.clone()));
        }
        for (key, values) in &self.filters {
            if values.is_empty() {
                pairs.push((key.clone(), String::new()));
            }
            for value in values {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}

// ============================================================================
// VIEWS & CONTROLS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewInfo {
    pub slug: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

impl ViewInfo {
    /// Label as shown in the navigation selector
    pub fn nav_label(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// A select (single) or multiselect filter widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub key: &'static str,
    pub label: &'static str,
    pub multi: bool,
    pub options: Vec<String>,
    pub selected: Vec<String>,
    /// Only shown on this view; `None` means sidebar-wide
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<&'static str>,
}

impl Control {
    pub fn single(key: &'static str, label: &'static str, options: Vec<String>, default: &str) -> Self {
        Control {
            key,
            label,
            multi: false,
            options,
            selected: vec![default.to_string()],
            view: None,
        }
    }

    pub fn multi(key: &'static str, label: &'static str, options: Vec<String>, defaults: Vec<String>) -> Self {
        Control { key, label, multi: true, options, selected: defaults, view: None }
    }

    pub fn scoped_to(mut self, view: &'static str) -> Self {
        self.view = Some(view);
        self
    }

    pub fn applies_to(&self, view: &str) -> bool {
        self.view.map_or(true, |v| v == view)
    }

    /// Apply the selection's values for this control, validating them.
    /// A single select with no value keeps its default.
    pub fn resolve(mut self, selection: &Selection) -> Result<Self> {
        let values = match selection.filters.get(self.key) {
            Some(values) => values,
            None => return Ok(self),
        };

        for value in values {
            if !self.options.iter().any(|o| o == value) {
                return Err(DashboardError::InvalidFilter {
                    key: self.key.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.multi {
            // keep option order, drop duplicates
            self.selected = self
                .options
                .iter()
                .filter(|o| values.contains(*o))
                .cloned()
                .collect();
        } else {
            match values.as_slice() {
                [] => {}
                [one] => self.selected = vec![one.clone()],
                [_, second, ..] => {
                    return Err(DashboardError::InvalidFilter {
                        key: self.key.to_string(),
                        value: second.clone(),
                    })
                }
            }
        }
        Ok(self)
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }

    /// Selection after toggling `option` (single selects just pick it)
    pub fn toggled(&self, option: &str) -> Vec<String> {
        if !self.multi {
            return vec![option.to_string()];
        }
        let mut selected = self.selected.clone();
        if let Some(pos) = selected.iter().position(|s| s == option) {
            selected.remove(pos);
        } else {
            selected.push(option.to_string());
        }
        self.options
            .iter()
            .filter(|o| selected.contains(*o))
            .cloned()
            .collect()
    }
}

// ============================================================================
// SIDEBAR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub brand: String,
    pub caption: String,
    pub nav_title: String,
    pub views: Vec<ViewInfo>,
    pub selected_view: &'static str,
    pub controls: Vec<Control>,
    pub info_title: Option<String>,
    pub info: Vec<String>,
    pub notice: Notice,
    pub generated_at: String,
}

/// "Last updated" style timestamp for the sidebar footer
pub fn timestamp(with_time: bool) -> String {
    let now = chrono::Local::now();
    if with_time {
        now.format("%d/%m/%Y %H:%M").to_string()
    } else {
        now.format("%d/%m/%Y").to_string()
    }
}

// ============================================================================
// DASHBOARD TRAIT
// ============================================================================

pub trait Dashboard: Send + Sync {
    /// URL/CLI identifier
    fn id(&self) -> &'static str;

    /// Browser/window title
    fn title(&self) -> &'static str;

    /// Navigation entries in display order; the first one is the default
    fn views(&self) -> Vec<ViewInfo>;

    /// Filter controls with their default selection
    fn controls(&self) -> Vec<Control>;

    fn sidebar(&self, selection: &Selection) -> Result<Sidebar>;

    /// One render pass of the selected view
    fn render(&self, selection: &Selection) -> Result<Page>;

    /// Names of the exportable dataset tables
    fn tables(&self) -> Vec<&'static str>;

    /// Write one dataset table as CSV
    fn export_csv(&self, table: &str, out: &mut dyn io::Write) -> Result<()>;

    /// Controls with the selection applied. Controls scoped to another view
    /// keep their defaults and their values are not validated.
    fn resolve_controls(&self, view: &str, selection: &Selection) -> Result<Vec<Control>> {
        self.controls()
            .into_iter()
            .map(|c| if c.applies_to(view) { c.resolve(selection) } else { Ok(c) })
            .collect()
    }

    /// Current values of one control on `view`
    fn control_values(&self, view: &str, selection: &Selection, key: &str) -> Result<Vec<String>> {
        Ok(self
            .resolve_controls(view, selection)?
            .into_iter()
            .find(|c| c.key == key)
            .map(|c| c.selected)
            .unwrap_or_default())
    }
}

/// Write dataset rows as CSV with a header row
pub fn write_csv<T: Serialize>(rows: &[T], out: &mut dyn io::Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Error for a view slug a dashboard does not have
pub fn unknown_view(dashboard: &dyn Dashboard, view: &str) -> DashboardError {
    DashboardError::UnknownView {
        dashboard: dashboard.id().to_string(),
        view: view.to_string(),
    }
}

/// Error for a table name a dashboard does not export
pub fn unknown_table(dashboard: &dyn Dashboard, table: &str) -> DashboardError {
    DashboardError::UnknownTable {
        dashboard: dashboard.id().to_string(),
        table: table.to_string(),
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Every dashboard this binary serves
pub struct Registry {
    dashboards: Vec<Box<dyn Dashboard>>,
}

impl Registry {
    pub fn new(config: &DashboardConfig) -> Self {
        Registry {
            dashboards: vec![
                Box::new(crate::sales::SalesDashboard::new(config)),
                Box::new(crate::audit::AuditDashboard::new(config)),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Result<&dyn Dashboard> {
        self.dashboards
            .iter()
            .find(|d| d.id() == id)
            .map(|d| d.as_ref())
            .ok_or_else(|| DashboardError::UnknownDashboard(id.to_string()))
    }

    pub fn dashboards(&self) -> &[Box<dyn Dashboard>] {
        &self.dashboards
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.dashboards.iter().map(|d| d.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.dashboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity() -> Control {
        Control::multi(
            "severity",
            "Filtrar por severidad:",
            vec!["Crítico".into(), "Alto".into(), "Medio".into(), "Bajo".into()],
            vec!["Crítico".into(), "Alto".into()],
        )
    }

    #[test]
    fn test_selection_from_pairs() {
        let sel = Selection::from_pairs(vec![
            ("view", "hallazgos"),
            ("severity", "Alto"),
            ("severity", "Bajo"),
            ("area", ""),
        ]);
        assert_eq!(sel.view.as_deref(), Some("hallazgos"));
        assert_eq!(sel.filters["severity"], vec!["Alto", "Bajo"]);
        assert!(sel.filters["area"].is_empty(), "empty value marks the key as present");
    }

    #[test]
    fn test_selection_pairs_roundtrip() {
        let sel = Selection::view("hallazgos").with_filter("area", &[]).with_filter("severity", &["Medio"]);
        assert_eq!(Selection::from_pairs(sel.to_pairs()), sel);
    }

    #[test]
    fn test_control_resolve_defaults_and_values() {
        let untouched = severity().resolve(&Selection::new()).unwrap();
        assert_eq!(untouched.selected, vec!["Crítico", "Alto"]);

        let sel = Selection::new().with_filter("severity", &["Bajo", "Crítico", "Bajo"]);
        let resolved = severity().resolve(&sel).unwrap();
        assert_eq!(resolved.selected, vec!["Crítico", "Bajo"]);

        let none = severity().resolve(&Selection::new().with_filter("severity", &[])).unwrap();
        assert!(none.selected.is_empty());
    }

    #[test]
    fn test_control_rejects_unknown_option() {
        let sel = Selection::new().with_filter("severity", &["Extremo"]);
        match severity().resolve(&sel) {
            Err(DashboardError::InvalidFilter { key, value }) => {
                assert_eq!(key, "severity");
                assert_eq!(value, "Extremo");
            }
            other => panic!("expected InvalidFilter, got {:?}", other),
        }
    }

    #[test]
    fn test_single_select_takes_one_value() {
        let period = Control::single("period", "Período", vec!["a".into(), "b".into()], "a");
        assert_eq!(period.clone().resolve(&Selection::new().with_filter("period", &["b"])).unwrap().selected, vec!["b"]);
        assert_eq!(period.clone().resolve(&Selection::new().with_filter("period", &[])).unwrap().selected, vec!["a"]);
        assert!(period.resolve(&Selection::new().with_filter("period", &["a", "b"])).is_err());
    }

    #[test]
    fn test_toggle() {
        let c = severity();
        assert_eq!(c.toggled("Alto"), vec!["Crítico"]);
        assert_eq!(c.toggled("Bajo"), vec!["Crítico", "Alto", "Bajo"]);
        let single = Control::single("period", "Período", vec!["a".into(), "b".into()], "a");
        assert_eq!(single.toggled("b"), vec!["b"]);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = Registry::new(&DashboardConfig::default());
        assert_eq!(registry.ids(), vec!["sales", "audit"]);
        assert!(registry.get("audit").is_ok());
        assert!(matches!(registry.get("hr"), Err(DashboardError::UnknownDashboard(_))));
    }

    #[test]
    fn test_default_and_unknown_view() {
        let registry = Registry::new(&DashboardConfig::default());
        let sales = registry.get("sales").unwrap();
        assert_eq!(sales.sidebar(&Selection::new()).unwrap().selected_view, "general");
        let err = sales.render(&Selection::view("hallazgos")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scoped_controls_keep_defaults_elsewhere() {
        let registry = Registry::new(&DashboardConfig::default());
        let audit = registry.get("audit").unwrap();
        let sel = Selection::new().with_filter("severity", &["Extremo"]);
        let controls = audit.resolve_controls("resumen", &sel).unwrap();
        assert_eq!(controls[0].selected, vec!["Crítico", "Alto"]);
        assert!(audit.resolve_controls("hallazgos", &sel).is_err());
    }
}
