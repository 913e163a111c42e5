// 📊 Chart Adapters
// Turn table columns plus an axis/color mapping into a chart description the
// renderers can draw (braille lines in the TUI, inline SVG on the web).

use crate::format::money;
use serde::Serialize;

// ============================================================================
// COLORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse "#rrggbb" (leading '#' optional)
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let h = hex.trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }
}

/// Fallback when a scale has no usable stops
pub const NEUTRAL: Rgb = Rgb(0x80, 0x80, 0x80);

pub const BLUE: &str = "#1f77b4";
pub const ORANGE: &str = "#ff7f0e";
pub const GREEN: &str = "#2ca02c";

pub const SCORE_RED: &str = "#ef4444";
pub const SCORE_AMBER: &str = "#f59e0b";
pub const SCORE_GREEN: &str = "#10b981";
pub const SEVERITY_BLUE: &str = "#3b82f6";

/// Qualitative palette for categorical slices
pub const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Diverging red → blue sequence, used as a discrete palette
pub const RDBU: &[&str] = &[
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7",
    "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061",
];

/// Continuous color scales for value-colored bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Blues,
    Reds,
    RdYlGn,
}

impl ColorScale {
    fn stops(&self) -> &'static [&'static str] {
        match self {
            ColorScale::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6",
                "#4292c6", "#2171b5", "#08519c", "#08306b",
            ],
            ColorScale::Reds => &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a",
                "#ef3b2c", "#cb181d", "#a50f15", "#67000d",
            ],
            ColorScale::RdYlGn => &[
                "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf",
                "#d9ef8b", "#a6d96a", "#66bd63", "#1a9850", "#006837",
            ],
        }
    }

    /// Color at position `t` in [0, 1]
    pub fn at(&self, t: f64) -> Rgb {
        let stops: Vec<Rgb> = self.stops().iter().filter_map(|h| Rgb::from_hex(h)).collect();
        interpolate(&stops, t)
    }

    /// Map `value` within [min, max]; a degenerate range maps to the top color
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Rgb {
        if max <= min {
            return self.at(1.0);
        }
        self.at((value - min) / (max - min))
    }

    /// One color per value, scaled over the column's own range
    pub fn colors(&self, values: &[f64]) -> Vec<String> {
        let min = crate::stats::min(values).unwrap_or(0.0);
        let max = crate::stats::max(values).unwrap_or(0.0);
        values.iter().map(|&v| self.color_for(v, min, max).to_hex()).collect()
    }
}

/// Linear interpolation across evenly spaced stops
fn interpolate(stops: &[Rgb], t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    match stops {
        [] => NEUTRAL,
        [only] => *only,
        _ => {
            let last = stops.len() - 1;
            let scaled = t * last as f64;
            let lo = (scaled.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            Rgb::lerp(stops[lo], stops[hi], scaled - lo as f64)
        }
    }
}

/// Score coloring used by the audit report: red below 50, amber below 70
pub fn score_color(score: f64) -> &'static str {
    if score < 50.0 {
        SCORE_RED
    } else if score < 70.0 {
        SCORE_AMBER
    } else {
        SCORE_GREEN
    }
}

/// Cycle a palette to `n` colors; an empty palette yields none
pub fn palette(colors: &[&str], n: usize) -> Vec<String> {
    colors.iter().cycle().take(n).map(|c| c.to_string()).collect()
}

// ============================================================================
// CHART DESCRIPTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartKind {
    Line { smooth: bool, markers: bool },
    Bar { horizontal: bool },
    Pie { hole: f64 },
    Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// One color for the whole series, or one per point
    pub colors: Vec<String>,
    /// Print the value next to each point/bar
    pub value_labels: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>, color: &str) -> Self {
        Series {
            name: name.into(),
            values,
            colors: vec![color.to_string()],
            value_labels: false,
        }
    }

    pub fn per_point(name: impl Into<String>, values: Vec<f64>, colors: Vec<String>) -> Self {
        Series { name: name.into(), values, colors, value_labels: false }
    }

    pub fn labelled(mut self) -> Self {
        self.value_labels = true;
        self
    }

    /// Color of the i-th point
    pub fn color(&self, i: usize) -> &str {
        match self.colors.len() {
            0 => BLUE,
            1 => self.colors[0].as_str(),
            n => self.colors[i % n].as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<String>,
    /// Fixed value-axis range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<(f64, f64)>,
    pub height: u16,
    pub legend: bool,
}

impl Chart {
    fn base(kind: ChartKind, categories: Vec<String>, series: Vec<Series>) -> Self {
        let legend = series.len() > 1;
        Chart {
            kind,
            categories,
            series,
            x_title: None,
            y_title: None,
            value_range: None,
            height: 350,
            legend,
        }
    }

    pub fn x_title(mut self, title: &str) -> Self {
        self.x_title = Some(title.to_string());
        self
    }

    pub fn y_title(mut self, title: &str) -> Self {
        self.y_title = Some(title.to_string());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.value_range = Some((min, max));
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    pub fn no_legend(mut self) -> Self {
        self.legend = false;
        self
    }

    /// Grouped bars when there is more than one series
    pub fn is_grouped(&self) -> bool {
        matches!(self.kind, ChartKind::Bar { .. }) && self.series.len() > 1
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self.kind, ChartKind::Bar { horizontal: true })
    }

    /// Largest value across all series, floored at zero
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Upper bound of the value axis
    pub fn value_max(&self) -> f64 {
        match self.value_range {
            Some((_, max)) => max,
            None => self.max_value(),
        }
    }

    /// Slice shares in percent for pie charts (first series)
    pub fn shares(&self) -> Vec<f64> {
        let values = match self.series.first() {
            Some(s) => &s.values,
            None => return Vec::new(),
        };
        let total: f64 = values.iter().sum();
        values
            .iter()
            .map(|v| if total == 0.0 { 0.0 } else { v / total * 100.0 })
            .collect()
    }
}

// ============================================================================
// ADAPTERS
// ============================================================================

fn labels(categories: &[&str]) -> Vec<String> {
    categories.iter().map(|c| c.to_string()).collect()
}

/// Line chart with markers, one line per series
pub fn line(categories: &[&str], series: Vec<Series>) -> Chart {
    Chart::base(ChartKind::Line { smooth: false, markers: true }, labels(categories), series)
}

/// Smoothed (spline) line chart
pub fn spline(categories: &[&str], series: Vec<Series>) -> Chart {
    Chart::base(ChartKind::Line { smooth: true, markers: true }, labels(categories), series)
}

/// Vertical bars, grouped when given several series
pub fn bar(categories: &[&str], series: Vec<Series>) -> Chart {
    Chart::base(ChartKind::Bar { horizontal: false }, labels(categories), series)
}

/// Horizontal bars; categories run down the value axis
pub fn hbar(categories: &[&str], series: Vec<Series>) -> Chart {
    Chart::base(ChartKind::Bar { horizontal: true }, labels(categories), series)
}

/// Donut/pie chart of `values` labelled by `names`
pub fn pie(names: &[&str], values: Vec<f64>, hole: f64, colors: &[&str]) -> Chart {
    let series = Series::per_point("", values, palette(colors, names.len()));
    let mut chart = Chart::base(ChartKind::Pie { hole: hole.clamp(0.0, 0.9) }, labels(names), vec![series]);
    chart.legend = true;
    chart
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins between min and max; the maximum lands in the last bin
pub fn histogram_bins(values: &[f64], nbins: usize) -> Vec<Bin> {
    let (min, max) = match (crate::stats::min(values), crate::stats::max(values)) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Vec::new(),
    };
    if nbins == 0 {
        return Vec::new();
    }
    if max <= min {
        return vec![Bin { start: min - 0.5, end: min + 0.5, count: values.len() }];
    }

    let width = (max - min) / nbins as f64;
    let mut bins: Vec<Bin> = (0..nbins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(nbins - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Histogram of `values` as a bar-like chart of bin counts
pub fn histogram(values: &[f64], nbins: usize, color: &str) -> Chart {
    let bins = histogram_bins(values, nbins);
    let categories = bins
        .iter()
        .map(|b| format!("{}-{}", money(b.start), money(b.end)))
        .collect();
    let counts = bins.iter().map(|b| b.count as f64).collect();
    let mut chart = Chart::base(ChartKind::Histogram, categories, vec![Series::new("Frecuencia", counts, color)]);
    chart.legend = false;
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_and_invalid() {
        assert_eq!(Rgb::from_hex("#1f77b4"), Some(Rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(Rgb::from_hex("ff7f0e").map(|c| c.to_hex()), Some("#ff7f0e".to_string()));
        assert_eq!(Rgb::from_hex("#12"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(ColorScale::Blues.at(0.0).to_hex(), "#f7fbff");
        assert_eq!(ColorScale::Blues.at(1.0).to_hex(), "#08306b");
        assert_eq!(ColorScale::RdYlGn.color_for(5.0, 5.0, 5.0).to_hex(), "#006837");
        assert_eq!(ColorScale::Reds.color_for(-10.0, 0.0, 1.0).to_hex(), "#fff5f0");
    }

    #[test]
    fn test_scale_colors_per_value() {
        let colors = ColorScale::Reds.colors(&[7500.0, 18000.0]);
        assert_eq!(colors, vec!["#fff5f0".to_string(), "#67000d".to_string()]);
    }

    #[test]
    fn test_score_color_thresholds() {
        assert_eq!(score_color(45.0), SCORE_RED);
        assert_eq!(score_color(50.0), SCORE_AMBER);
        assert_eq!(score_color(69.9), SCORE_AMBER);
        assert_eq!(score_color(70.0), SCORE_GREEN);
    }

    #[test]
    fn test_pie_shares() {
        let chart = pie(&["A", "B"], vec![30.0, 10.0], 0.4, SET3);
        assert_eq!(chart.shares(), vec![75.0, 25.0]);
        assert_eq!(chart.series[0].colors.len(), 2);
        let empty = pie(&["A"], vec![0.0], 0.4, SET3);
        assert_eq!(empty.shares(), vec![0.0]);
    }

    #[test]
    fn test_histogram_bins() {
        let bins = histogram_bins(&[12500.0, 3400.0, 8900.0, 1200.0, 5600.0], 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].start, 1200.0);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[9].count, 1, "maximum belongs to the last bin");
    }

    #[test]
    fn test_histogram_labels_are_money_ranges() {
        let chart = histogram(&[12500.0, 3400.0, 8900.0, 1200.0, 5600.0], 10, BLUE);
        assert_eq!(chart.categories[0], "$1,200-$2,330");
        assert_eq!(chart.categories[9], "$11,370-$12,500");
    }

    #[test]
    fn test_empty_palettes_do_not_panic() {
        assert!(palette(&[], 3).is_empty());
        assert_eq!(palette(&[BLUE, ORANGE], 3), vec![BLUE, ORANGE, BLUE]);
        assert_eq!(interpolate(&[], 0.5), NEUTRAL);
        let red = Rgb(255, 0, 0);
        assert_eq!(interpolate(&[red], 0.7), red);
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(histogram_bins(&[], 10).is_empty());
        let single = histogram_bins(&[7.0, 7.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
        assert!(histogram_bins(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_grouped_and_axis() {
        let chart = bar(&["Enero"], vec![
            Series::new("Ventas", vec![45000.0], BLUE),
            Series::new("Costos", vec![28000.0], ORANGE),
        ]);
        assert!(chart.is_grouped());
        assert!(chart.legend);
        assert_eq!(chart.max_value(), 45000.0);
        let scores = hbar(&["Seguridad"], vec![Series::new("", vec![45.0], SCORE_RED)]).range(0.0, 100.0);
        assert!(scores.is_horizontal());
        assert_eq!(scores.value_max(), 100.0);
    }
}
