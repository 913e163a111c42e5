// 🧱 Page Model - what a render pass produces
// Render-agnostic description of a view: rows of sections holding metric
// cards, charts, tables, cards and notices. The TUI, the HTML renderer and
// the JSON API all consume this.

use crate::charts::Chart;
use serde::Serialize;

// ============================================================================
// INDICATOR
// ============================================================================

/// Traffic-light marker attached to classified values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
}

impl Indicator {
    pub fn icon(&self) -> &'static str {
        match self {
            Indicator::Red => "🔴",
            Indicator::Orange => "🟠",
            Indicator::Yellow => "🟡",
            Indicator::Blue => "🔵",
            Indicator::Green => "🟢",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Indicator::Red => "#ef4444",
            Indicator::Orange => "#f97316",
            Indicator::Yellow => "#f59e0b",
            Indicator::Blue => "#3b82f6",
            Indicator::Green => "#10b981",
        }
    }
}

// ============================================================================
// METRIC CARD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaColor {
    /// Up is good
    Normal,
    /// Up is bad
    Inverse,
    /// No tone
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub text: String,
    pub color: DeltaColor,
}

impl Delta {
    pub fn new(text: impl Into<String>) -> Self {
        Delta {
            text: text.into(),
            color: DeltaColor::Normal,
        }
    }

    pub fn inverse(text: impl Into<String>) -> Self {
        Delta {
            text: text.into(),
            color: DeltaColor::Inverse,
        }
    }

    /// Direction is read from the text: a leading '-' means down
    pub fn is_up(&self) -> bool {
        !self.text.trim_start().starts_with('-')
    }

    pub fn arrow(&self) -> &'static str {
        if self.is_up() {
            "↑"
        } else {
            "↓"
        }
    }

    pub fn tone(&self) -> Tone {
        match (self.color, self.is_up()) {
            (DeltaColor::Off, _) => Tone::Neutral,
            (DeltaColor::Normal, true) | (DeltaColor::Inverse, false) => Tone::Good,
            (DeltaColor::Normal, false) | (DeltaColor::Inverse, true) => Tone::Bad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        MetricCard {
            label: label.into(),
            value: value.into(),
            delta: None,
            help: None,
        }
    }

    pub fn delta(mut self, delta: Delta) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// CARDS, NOTICES, TABLES
// ============================================================================

/// One entry of a row-iterated layout (alerts, findings, recent sales...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Indicator>,
    pub lines: Vec<String>,
    pub metrics: Vec<MetricCard>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Card {
            title: title.into(),
            indicator: None,
            lines: Vec::new(),
            metrics: Vec::new(),
        }
    }

    pub fn indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn metric(mut self, metric: MetricCard) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Title prefixed with the indicator icon, when there is one
    pub fn heading(&self) -> String {
        match self.indicator {
            Some(ind) => format!("{} {}", ind.icon(), self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Progress { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub label: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableCell {
    Text(String),
    Progress(f64),
}

impl TableCell {
    pub fn display(&self) -> String {
        match self {
            TableCell::Text(s) => s.clone(),
            TableCell::Progress(v) => format!("{:.0}%", v),
        }
    }
}

impl From<String> for TableCell {
    fn from(s: String) -> Self {
        TableCell::Text(s)
    }
}

impl From<&str> for TableCell {
    fn from(s: &str) -> Self {
        TableCell::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Table whose columns are all plain text
    pub fn text(labels: &[&str]) -> Self {
        Table {
            columns: labels
                .iter()
                .map(|l| Column { label: l.to_string(), kind: ColumnKind::Text })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, label: &str, kind: ColumnKind) -> Self {
        self.columns.push(Column { label: label.to_string(), kind });
        self
    }

    pub fn row(mut self, cells: Vec<TableCell>) -> Self {
        self.rows.push(cells);
        self
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", content = "data", rename_all = "lowercase")]
pub enum Widget {
    Metrics(Vec<MetricCard>),
    Chart(Chart),
    Table(Table),
    Cards(Vec<Card>),
    Notice(Notice),
    Text(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Relative width inside its row
    pub weight: u16,
    pub widgets: Vec<Widget>,
}

impl Section {
    pub fn new() -> Self {
        Section { title: None, weight: 1, widgets: Vec::new() }
    }

    pub fn titled(title: impl Into<String>) -> Self {
        Section { title: Some(title.into()), weight: 1, widgets: Vec::new() }
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight.max(1);
        self
    }

    pub fn with(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

pub type Row = Vec<Section>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub rows: Vec<Row>,
    pub footer: Vec<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Page { title: title.into(), subtitle: None, rows: Vec::new(), footer: Vec::new() }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a row of side-by-side sections
    pub fn row(mut self, sections: Vec<Section>) -> Self {
        self.rows.push(sections);
        self
    }

    /// Append a full-width section
    pub fn section(self, section: Section) -> Self {
        self.row(vec![section])
    }

    pub fn footer(mut self, lines: &[&str]) -> Self {
        self.footer = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Every metric card on the page, top to bottom, including card metrics
    pub fn metrics(&self) -> Vec<&MetricCard> {
        let mut out = Vec::new();
        for section in self.rows.iter().flatten() {
            for widget in &section.widgets {
                match widget {
                    Widget::Metrics(m) => out.extend(m.iter()),
                    Widget::Cards(cards) => {
                        for card in cards {
                            out.extend(card.metrics.iter());
                        }
                    }
                    _ => {}
                }
            }
        }
        out
    }

    /// First metric card with the given label
    pub fn metric(&self, label: &str) -> Option<&MetricCard> {
        self.metrics().into_iter().find(|m| m.label == label)
    }

    pub fn charts(&self) -> Vec<&Chart> {
        self.widgets()
            .filter_map(|w| match w {
                Widget::Chart(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn cards(&self) -> Vec<&Card> {
        self.widgets()
            .filter_map(|w| match w {
                Widget::Cards(c) => Some(c.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.widgets()
            .filter_map(|w| match w {
                Widget::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&Notice> {
        self.widgets()
            .filter_map(|w| match w {
                Widget::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.rows.iter().flatten().flat_map(|s| s.widgets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_tone() {
        assert_eq!(Delta::new("+24 vs mes anterior").tone(), Tone::Good);
        assert_eq!(Delta::new("Rentabilidad").tone(), Tone::Good);
        assert_eq!(Delta::new("-3.1%").tone(), Tone::Bad);
        assert_eq!(Delta::inverse("Requieren atención").tone(), Tone::Bad);
        assert_eq!(Delta::inverse("-5.7% vs objetivo").tone(), Tone::Good);
        let off = Delta { text: "x".into(), color: DeltaColor::Off };
        assert_eq!(off.tone(), Tone::Neutral);
        assert_eq!(Delta::new("-1").arrow(), "↓");
    }

    #[test]
    fn test_card_heading() {
        let card = Card::new("Alambre tejido").indicator(Indicator::Red);
        assert_eq!(card.heading(), "🔴 Alambre tejido");
        assert_eq!(Card::new("V-1245").heading(), "V-1245");
    }

    #[test]
    fn test_page_metric_lookup_includes_cards() {
        let page = Page::new("t")
            .section(Section::new().with(Widget::Metrics(vec![MetricCard::new("A", "1")])))
            .section(Section::new().with(Widget::Cards(vec![
                Card::new("c").metric(MetricCard::new("Monto", "$5")),
            ])));
        assert_eq!(page.metrics().len(), 2);
        assert_eq!(page.metric("Monto").map(|m| m.value.as_str()), Some("$5"));
        assert!(page.metric("missing").is_none());
        assert_eq!(page.cards().len(), 1);
    }

    #[test]
    fn test_page_serializes_widget_tags() {
        let page = Page::new("t").section(Section::titled("s").with(Widget::Notice(Notice::info("hola"))));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["rows"][0][0]["widgets"][0]["widget"], "notice");
        assert_eq!(json["rows"][0][0]["widgets"][0]["data"]["kind"], "info");
    }

    #[test]
    fn test_progress_cell_display() {
        assert_eq!(TableCell::Progress(0.0).display(), "0%");
        assert_eq!(TableCell::from("x").display(), "x");
    }
}
