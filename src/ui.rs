use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kepler_dashboards::charts::{Chart, ChartKind, Rgb};
use kepler_dashboards::text::chart_value;
use kepler_dashboards::widgets::{
    self, Card, ColumnKind, MetricCard, Notice, NoticeKind, Section, TableCell, Tone, Widget,
};
use kepler_dashboards::{Dashboard, DashboardError, Registry, Selection, Sidebar};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart as ChartWidget, Dataset,
        GraphType, Paragraph, Row, Table as TableWidget, Wrap,
    },
    Frame, Terminal,
};
use std::io;

const SIDEBAR_WIDTH: u16 = 36;
const CHART_HEIGHT: u16 = 12;

/// Which sidebar block ↑/↓ act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Navigation,
    Filters,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Navigation => Focus::Filters,
            Focus::Filters => Focus::Navigation,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Focus::Navigation => "Navegación",
            Focus::Filters => "Filtros",
        }
    }
}

pub struct App {
    registry: Registry,
    pub current: usize,
    selections: Vec<Selection>,
    pub focus: Focus,
    pub filter_cursor: usize,
    /// First page row shown in the content pane
    pub scroll: usize,
    pub page: Option<widgets::Page>,
    pub sidebar: Option<Sidebar>,
    pub error: Option<String>,
}

impl App {
    pub fn new(registry: Registry, dashboard: &str) -> kepler_dashboards::Result<Self> {
        let current = registry
            .ids()
            .iter()
            .position(|id| *id == dashboard)
            .ok_or_else(|| DashboardError::UnknownDashboard(dashboard.to_string()))?;
        let selections = vec![Selection::new(); registry.len()];

        let mut app = Self {
            registry,
            current,
            selections,
            focus: Focus::Navigation,
            filter_cursor: 0,
            scroll: 0,
            page: None,
            sidebar: None,
            error: None,
        };
        app.refresh();
        Ok(app)
    }

    pub fn dashboard(&self) -> &dyn Dashboard {
        self.registry.dashboards()[self.current].as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selections[self.current]
    }

    /// Re-run the render pass for the current selection
    pub fn refresh(&mut self) {
        let dashboard = self.registry.dashboards()[self.current].as_ref();
        let selection = &self.selections[self.current];
        match dashboard.render(selection).and_then(|page| Ok((page, dashboard.sidebar(selection)?))) {
            Ok((page, sidebar)) => {
                self.page = Some(page);
                self.sidebar = Some(sidebar);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(dashboard = dashboard.id(), error = %e, "render failed");
                self.error = Some(e.to_string());
            }
        }
        let options = self.visible_options().len();
        if self.filter_cursor >= options {
            self.filter_cursor = options.saturating_sub(1);
        }
        if options == 0 {
            self.focus = Focus::Navigation;
        }
    }

    pub fn next_dashboard(&mut self) {
        self.current = (self.current + 1) % self.registry.len();
        self.reset_position();
    }

    pub fn previous_dashboard(&mut self) {
        let n = self.registry.len();
        self.current = (self.current + n - 1) % n;
        self.reset_position();
    }

    fn reset_position(&mut self) {
        self.focus = Focus::Navigation;
        self.filter_cursor = 0;
        self.scroll = 0;
        self.refresh();
    }

    fn view_index(&self) -> usize {
        let views = self.dashboard().views();
        self.sidebar
            .as_ref()
            .and_then(|s| views.iter().position(|v| v.slug == s.selected_view))
            .unwrap_or(0)
    }

    fn select_view(&mut self, index: usize) {
        let views = self.dashboard().views();
        if let Some(view) = views.get(index) {
            self.selections[self.current].view = Some(view.slug.to_string());
        }
        self.scroll = 0;
        self.filter_cursor = 0;
        self.refresh();
    }

    pub fn next_view(&mut self) {
        let n = self.dashboard().views().len();
        if n > 0 {
            self.select_view((self.view_index() + 1) % n);
        }
    }

    pub fn previous_view(&mut self) {
        let n = self.dashboard().views().len();
        if n > 0 {
            self.select_view((self.view_index() + n - 1) % n);
        }
    }

    /// (control key, option) pairs of the controls shown on the current view
    pub fn visible_options(&self) -> Vec<(&'static str, String)> {
        let sidebar = match &self.sidebar {
            Some(s) => s,
            None => return Vec::new(),
        };
        sidebar
            .controls
            .iter()
            .filter(|c| c.applies_to(sidebar.selected_view))
            .flat_map(|c| c.options.iter().map(move |o| (c.key, o.clone())))
            .collect()
    }

    pub fn toggle_focus(&mut self) {
        if !self.visible_options().is_empty() {
            self.focus = self.focus.next();
        }
    }

    pub fn cursor_down(&mut self) {
        let n = self.visible_options().len();
        if n > 0 {
            self.filter_cursor = (self.filter_cursor + 1) % n;
        }
    }

    pub fn cursor_up(&mut self) {
        let n = self.visible_options().len();
        if n > 0 {
            self.filter_cursor = (self.filter_cursor + n - 1) % n;
        }
    }

    /// Toggle the option under the cursor (single selects just pick it)
    pub fn toggle_option(&mut self) {
        let (key, option) = match self.visible_options().into_iter().nth(self.filter_cursor) {
            Some(pair) => pair,
            None => return,
        };
        let selected = self
            .sidebar
            .as_ref()
            .and_then(|s| s.controls.iter().find(|c| c.key == key))
            .map(|c| c.toggled(&option));
        if let Some(values) = selected {
            self.selections[self.current].filters.insert(key.to_string(), values);
            self.scroll = 0;
            self.refresh();
        }
    }

    pub fn scroll_down(&mut self) {
        let rows = self.page.as_ref().map_or(0, |p| p.rows.len());
        if self.scroll + 1 < rows {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Apply one key press; returns true when the app should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_dashboard();
                } else {
                    self.next_dashboard();
                }
            }
            KeyCode::BackTab => self.previous_dashboard(),
            KeyCode::Char('f') => self.toggle_focus(),
            KeyCode::Down | KeyCode::Char('j') => match self.focus {
                Focus::Navigation => self.next_view(),
                Focus::Filters => self.cursor_down(),
            },
            KeyCode::Up | KeyCode::Char('k') => match self.focus {
                Focus::Navigation => self.previous_view(),
                Focus::Filters => self.cursor_up(),
            },
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == Focus::Filters => self.toggle_option(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll_up(),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Dashboard tabs
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_sidebar(f, body[0], app);
    render_content(f, body[1], app);
    render_status_bar(f, chunks[2], app);
}

// ============================================================================
// CHROME
// ============================================================================

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, dashboard) in app.registry.dashboards().iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }
        let style = if i == app.current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(dashboard.title(), style));
    }

    if let Some(page) = &app.page {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(page.title.clone(), Style::default().fg(Color::White)));
    }

    let header = Paragraph::new(Line::from(tab_spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let sidebar = match &app.sidebar {
        Some(s) => s,
        None => return,
    };
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(sidebar.brand.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(sidebar.caption.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(sidebar.nav_title.clone(), heading)),
    ];

    for view in &sidebar.views {
        if view.slug == sidebar.selected_view {
            let style = if app.focus == Focus::Navigation {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            lines.push(Line::from(vec![
                Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(view.nav_label(), style),
            ]));
        } else {
            lines.push(Line::from(format!("  {}", view.nav_label())));
        }
    }

    let mut cursor = 0;
    for control in sidebar.controls.iter().filter(|c| c.applies_to(sidebar.selected_view)) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(control.label, heading)));
        for option in &control.options {
            let mark = match (control.multi, control.is_selected(option)) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let style = if app.focus == Focus::Filters && cursor == app.filter_cursor {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {} {}", mark, option), style)));
            cursor += 1;
        }
    }

    if let Some(title) = &sidebar.info_title {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(title.clone(), heading)));
    }
    for info in &sidebar.info {
        lines.push(Line::from(info.clone()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(sidebar.notice.text.clone(), Style::default().fg(Color::Blue))));
    lines.push(Line::from(Span::styled(sidebar.generated_at.clone(), Style::default().fg(Color::DarkGray))));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.focus.title())),
    );
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.page.as_ref().map_or(0, |p| p.rows.len());
    let key = Style::default().fg(Color::Yellow);

    let status_spans = vec![
        Span::styled(
            format!(" Fila: {}/{} ", (app.scroll + 1).min(rows), rows),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Tab", key),
        Span::raw(" Dashboard | "),
        Span::styled("↑/↓", key),
        Span::raw(" Vista/Opción | "),
        Span::styled("f", key),
        Span::raw(" Filtros | "),
        Span::styled("Espacio", key),
        Span::raw(" Marcar | "),
        Span::styled("PgUp/PgDn", key),
        Span::raw(" Scroll | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Salir"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// CONTENT
// ============================================================================

fn render_content(f: &mut Frame, area: Rect, app: &App) {
    if let Some(err) = &app.error {
        let widget = Paragraph::new(format!("❌ {}", err))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Error "));
        f.render_widget(widget, area);
        return;
    }
    let page = match &app.page {
        Some(p) => p,
        None => return,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", page.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;

    if app.scroll == 0 {
        if let Some(subtitle) = &page.subtitle {
            let line = Paragraph::new(Span::styled(subtitle.clone(), Style::default().fg(Color::DarkGray)));
            f.render_widget(line, Rect { x: inner.x, y, width: inner.width, height: 1 });
            y += 1;
        }
    }

    for row in page.rows.iter().skip(app.scroll) {
        if y >= bottom {
            break;
        }
        let widths = row_widths(row, inner.width);
        let height = row
            .iter()
            .zip(&widths)
            .map(|(s, w)| section_height(s, *w))
            .max()
            .unwrap_or(0)
            .min(bottom - y);

        let mut x = inner.x;
        for (section, width) in row.iter().zip(widths) {
            render_section(f, Rect { x, y, width, height }, section);
            x += width;
        }
        y += height;
    }

    if app.scroll + 1 >= page.rows.len() && y < bottom && !page.footer.is_empty() {
        let footer: Vec<Line> = page
            .footer
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::DarkGray))))
            .collect();
        let height = (footer.len() as u16 + 1).min(bottom - y);
        f.render_widget(
            Paragraph::new(footer).block(Block::default().borders(Borders::TOP)),
            Rect { x: inner.x, y, width: inner.width, height },
        );
    }
}

/// Split `total` among the sections of a row by weight
fn row_widths(row: &[Section], total: u16) -> Vec<u16> {
    let weights: u16 = row.iter().map(|s| s.weight).sum::<u16>().max(1);
    let mut widths: Vec<u16> = row
        .iter()
        .map(|s| (total as u32 * s.weight as u32 / weights as u32) as u16)
        .collect();
    let used: u16 = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += total.saturating_sub(used);
    }
    widths
}

fn wrapped(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    (text.chars().count().div_ceil(width)).max(1) as u16
}

fn widget_height(widget: &Widget, width: u16) -> u16 {
    match widget {
        Widget::Metrics(_) => 5,
        Widget::Chart(chart) => chart_height(chart),
        Widget::Table(table) => table.rows.len() as u16 + 2,
        Widget::Cards(cards) => cards
            .iter()
            .map(|c| {
                1 + c.metrics.len() as u16 + c.lines.iter().map(|l| wrapped(l, width.saturating_sub(2))).sum::<u16>()
            })
            .sum(),
        Widget::Notice(n) => wrapped(&n.text, width.saturating_sub(3)),
        Widget::Text(lines) => lines.iter().map(|l| wrapped(l, width)).sum(),
    }
}

fn chart_height(chart: &Chart) -> u16 {
    match chart.kind {
        ChartKind::Pie { .. } => chart.categories.len() as u16 + 1,
        ChartKind::Bar { horizontal: true } => {
            (chart.categories.len() * chart.series.len()) as u16 * 2 + 1
        }
        _ => CHART_HEIGHT,
    }
}

fn section_height(section: &Section, width: u16) -> u16 {
    let inner = width.saturating_sub(2);
    section.widgets.iter().map(|w| widget_height(w, inner)).sum::<u16>() + 2
}

fn render_section(f: &mut Frame, area: Rect, section: &Section) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    if let Some(title) = &section.title {
        block = block.title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let constraints: Vec<Constraint> = section
        .widgets
        .iter()
        .map(|w| Constraint::Length(widget_height(w, inner.width)))
        .collect();
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (widget, area) in section.widgets.iter().zip(areas.iter()) {
        render_widget(f, *area, widget);
    }
}

fn render_widget(f: &mut Frame, area: Rect, widget: &Widget) {
    match widget {
        Widget::Metrics(metrics) => render_metrics(f, area, metrics),
        Widget::Chart(chart) => render_chart(f, area, chart),
        Widget::Table(table) => render_table(f, area, table),
        Widget::Cards(cards) => render_cards(f, area, cards),
        Widget::Notice(notice) => render_notice(f, area, notice),
        Widget::Text(lines) => {
            let text: Vec<Line> = lines.iter().map(|l| Line::from(l.clone())).collect();
            f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
        }
    }
}

fn hex_color(hex: &str) -> Color {
    match Rgb::from_hex(hex) {
        Some(Rgb(r, g, b)) => Color::Rgb(r, g, b),
        None => Color::White,
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Neutral => Color::DarkGray,
    }
}

fn metric_lines(m: &MetricCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(m.label.clone(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(m.value.clone(), Style::default().add_modifier(Modifier::BOLD))),
    ];
    if let Some(delta) = &m.delta {
        lines.push(Line::from(Span::styled(
            format!("{} {}", delta.arrow(), delta.text),
            Style::default().fg(tone_color(delta.tone())),
        )));
    } else if let Some(help) = &m.help {
        lines.push(Line::from(Span::styled(help.clone(), Style::default().fg(Color::DarkGray))));
    }
    lines
}

fn render_metrics(f: &mut Frame, area: Rect, metrics: &[MetricCard]) {
    if metrics.is_empty() {
        return;
    }
    let n = metrics.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n); metrics.len()])
        .split(area);

    for (m, area) in metrics.iter().zip(areas.iter()) {
        let card = Paragraph::new(metric_lines(m))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(card, *area);
    }
}

fn render_cards(f: &mut Frame, area: Rect, cards: &[Card]) {
    let mut lines = Vec::new();
    for card in cards {
        let color = card.indicator.map_or(Color::White, |i| hex_color(i.hex()));
        lines.push(Line::from(Span::styled(
            card.heading(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for m in &card.metrics {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", m.label), Style::default().fg(Color::DarkGray)),
                Span::styled(m.value.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
        }
        for line in &card.lines {
            lines.push(Line::from(format!("  {}", line)));
        }
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_notice(f: &mut Frame, area: Rect, notice: &Notice) {
    let (icon, color) = match notice.kind {
        NoticeKind::Info => ("ℹ", Color::Blue),
        NoticeKind::Warning => ("⚠", Color::Yellow),
        NoticeKind::Error => ("✖", Color::Red),
    };
    let line = Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(notice.text.clone(), Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), area);
}

fn progress_bar(value: f64, min: f64, max: f64) -> String {
    let t = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (t * 10.0).round() as usize;
    format!("{}{} {:.0}%", "█".repeat(filled), "░".repeat(10 - filled), value)
}

fn render_table(f: &mut Frame, area: Rect, table: &widgets::Table) {
    let header = Row::new(table.columns.iter().map(|c| {
        Cell::from(c.label.clone()).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows = table.rows.iter().map(|row| {
        let cells = row.iter().zip(&table.columns).map(|(cell, col)| match (cell, &col.kind) {
            (TableCell::Progress(v), ColumnKind::Progress { min, max }) => {
                Cell::from(progress_bar(*v, *min, *max)).style(Style::default().fg(Color::Green))
            }
            _ => Cell::from(cell.display()),
        });
        Row::new(cells).height(1)
    });

    let widths: Vec<Constraint> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let longest = table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| match c {
                    TableCell::Progress(_) => 15,
                    TableCell::Text(s) => s.chars().count(),
                })
                .chain(std::iter::once(col.label.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Max(longest as u16 + 1)
        })
        .collect();

    f.render_widget(TableWidget::new(rows, widths).header(header), area);
}

// ============================================================================
// CHARTS
// ============================================================================

fn render_chart(f: &mut Frame, area: Rect, chart: &Chart) {
    match chart.kind {
        ChartKind::Line { .. } => render_line_chart(f, area, chart),
        ChartKind::Pie { .. } => render_pie(f, area, chart),
        ChartKind::Bar { horizontal } => render_bar_chart(f, area, chart, horizontal),
        ChartKind::Histogram => render_bar_chart(f, area, chart, false),
    }
}

fn bar_value(v: f64) -> u64 {
    v.max(0.0).round() as u64
}

fn render_bar_chart(f: &mut Frame, area: Rect, chart: &Chart, horizontal: bool) {
    let groups: Vec<BarGroup> = chart
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let bars: Vec<Bar> = chart
                .series
                .iter()
                .filter_map(|s| s.values.get(i).map(|v| (s, *v)))
                .map(|(s, v)| {
                    let color = hex_color(s.color(i));
                    let mut bar = Bar::default()
                        .value(bar_value(v))
                        .text_value(chart_value(v))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(Color::Black).bg(color));
                    if chart.series.len() == 1 {
                        bar = bar.label(Line::from(category.clone()));
                    }
                    bar
                })
                .collect();
            let mut group = BarGroup::default().bars(&bars);
            if chart.series.len() > 1 {
                group = group.label(Line::from(category.clone()));
            }
            group
        })
        .collect();

    let bar_count = (chart.categories.len() * chart.series.len()).max(1) as u16;
    let direction = if horizontal { Direction::Horizontal } else { Direction::Vertical };
    let bar_width = if horizontal {
        1
    } else {
        (area.width / bar_count).saturating_sub(1).clamp(1, 9)
    };

    let mut widget = BarChart::default()
        .direction(direction)
        .bar_width(bar_width)
        .bar_gap(if horizontal { 1 } else { 0 })
        .group_gap(1)
        .max(bar_value(chart.value_max()).max(1));
    for group in groups {
        widget = widget.data(group);
    }
    f.render_widget(widget, area);
}

fn render_line_chart(f: &mut Frame, area: Rect, chart: &Chart) {
    let points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| s.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect())
        .collect();
    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(&points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(hex_color(s.color(0))))
                .data(data)
        })
        .collect();

    let n = chart.categories.len().max(1);
    let x_labels: Vec<Span> = match chart.categories.as_slice() {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.clone())],
        [first, .., last] => vec![Span::raw(first.clone()), Span::raw(last.clone())],
    };
    let top = (chart.value_max() * 1.1).max(1.0);
    let y_labels = vec![Span::raw("0"), Span::raw(chart_value((top / 2.0).round())), Span::raw(chart_value(top.round()))];

    let widget = ChartWidget::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, (n - 1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, top])
                .labels(y_labels),
        );
    f.render_widget(widget, area);
}

fn render_pie(f: &mut Frame, area: Rect, chart: &Chart) {
    let series = match chart.series.first() {
        Some(s) => s,
        None => return,
    };
    let label_width = chart.categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = chart
        .categories
        .iter()
        .zip(chart.shares())
        .enumerate()
        .map(|(i, (name, share))| {
            let color = hex_color(series.color(i));
            let blocks = (share / 5.0).round() as usize;
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(format!("{:<width$} ", name, width = label_width)),
                Span::styled("█".repeat(blocks), Style::default().fg(color)),
                Span::raw(format!(" {:.1}%", share)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kepler_dashboards::DashboardConfig;
    use ratatui::backend::TestBackend;

    fn app(dashboard: &str) -> App {
        App::new(Registry::new(&DashboardConfig::default()), dashboard).unwrap()
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_unknown_dashboard_is_rejected() {
        assert!(App::new(Registry::new(&DashboardConfig::default()), "nope").is_err());
    }

    #[test]
    fn test_view_navigation_wraps() {
        let mut app = app("sales");
        assert_eq!(app.page.as_ref().unwrap().title, "📊 Dashboard BI - PyME");
        app.next_view();
        assert_eq!(app.selection().view.as_deref(), Some("ventas"));
        assert_eq!(app.page.as_ref().unwrap().title, "💰 Análisis de Ventas");
        app.previous_view();
        app.previous_view();
        assert_eq!(app.selection().view.as_deref(), Some("clientes"));
    }

    #[test]
    fn test_tab_switches_dashboard() {
        let mut app = app("sales");
        assert!(!app.handle_key(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.dashboard().id(), "audit");
        assert_eq!(app.page.as_ref().unwrap().title, "📊 Resumen Ejecutivo");
        app.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.dashboard().id(), "sales");
        assert!(app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE));
    }

    #[test]
    fn test_period_filter_applies() {
        let mut app = app("sales");
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Filters);
        // options: 6 meses, trimestre, último mes, año
        app.cursor_down();
        app.toggle_option();
        let page = app.page.as_ref().unwrap();
        assert_eq!(page.metric("💵 Ventas Totales").unwrap().value, "$186,000");
    }

    #[test]
    fn test_findings_filter_toggle() {
        let mut app = app("audit");
        // no filters outside the findings view
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Navigation);

        app.next_view();
        assert_eq!(app.visible_options().len(), 8);
        app.handle_key(KeyCode::Char('f'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE); // drop "Crítico"
        let titles: Vec<String> = app.page.as_ref().unwrap().cards().iter().map(|c| c.title.clone()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles[0].starts_with("HAL-003"));
        assert!(titles[1].starts_with("HAL-005"));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut app = app("sales");
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, app.page.as_ref().unwrap().rows.len() - 1);
        app.handle_key(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_draws_general_view() {
        let app = app("sales");
        let text = screen(&app, 180, 60);
        assert!(text.contains("Ventas Totales"));
        assert!(text.contains("$331,000"));
        assert!(text.contains("Alambre tejido"));
        assert!(text.contains("Salir"));
    }

    #[test]
    fn test_draws_audit_findings() {
        let mut app = app("audit");
        app.next_view();
        let text = screen(&app, 180, 60);
        assert!(text.contains("HAL-001"));
        assert!(text.contains("[x] Seguridad"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 0.0, 100.0), "░░░░░░░░░░ 0%");
        assert_eq!(progress_bar(50.0, 0.0, 100.0), "█████░░░░░ 50%");
    }

    #[test]
    fn test_row_widths_fill_total() {
        let row = vec![Section::new(), Section::new().weight(2)];
        assert_eq!(row_widths(&row, 90), vec![30, 60]);
        let odd = vec![Section::new(), Section::new()];
        assert_eq!(row_widths(&odd, 91).iter().sum::<u16>(), 91);
    }
}
