// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use kepler_dashboards::{text, DashboardConfig, Registry, Selection};

#[derive(Parser, Debug)]
#[command(name = "kepler-dash", version, about = "Kepler Labs demo dashboards")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui {
        /// Dashboard to open first
        #[arg(short, long, default_value = "sales")]
        dashboard: String,
    },
    /// Print one view
    Render {
        #[arg(short, long)]
        dashboard: String,
        /// View slug; the dashboard's first view when omitted
        #[arg(short, long)]
        view: Option<String>,
        /// Filter value as key=value, repeatable
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Print the page model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a dataset table as CSV
    Export {
        #[arg(short, long)]
        dashboard: String,
        #[arg(short, long)]
        table: String,
    },
}

fn parse_filter(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr keeps the TUI screen clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    let registry = Registry::new(&config);

    match cli.command.unwrap_or(Command::Tui { dashboard: "sales".to_string() }) {
        Command::Tui { dashboard } => run_ui_mode(registry, &dashboard)?,
        Command::Render { dashboard, view, filters, json } => {
            run_render(&registry, &dashboard, view, filters, json)?
        }
        Command::Export { dashboard, table } => run_export(&registry, &dashboard, &table)?,
    }

    Ok(())
}

fn run_render(
    registry: &Registry,
    dashboard: &str,
    view: Option<String>,
    filters: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let dash = registry.get(dashboard)?;
    let mut selection = Selection::from_pairs(filters);
    selection.view = view;
    tracing::info!(dashboard, view = ?selection.view, "render");

    let page = dash
        .render(&selection)
        .with_context(|| format!("Failed to render dashboard '{}'", dashboard))?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &page).context("Failed to write JSON")?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", text::render_page(&page))?;
    }
    Ok(())
}

fn run_export(registry: &Registry, dashboard: &str, table: &str) -> Result<()> {
    let dash = registry.get(dashboard)?;
    let mut stdout = io::stdout().lock();
    dash.export_csv(table, &mut stdout)
        .with_context(|| format!("Failed to export table '{}'", table))?;
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(registry: Registry, dashboard: &str) -> Result<()> {
    let mut app = ui::App::new(registry, dashboard)?;
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_registry: Registry, _dashboard: &str) -> Result<()> {
    anyhow::bail!("TUI mode not available; rebuild with --features tui or use `kepler-dash render`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("period=Último mes"), Ok(("period".into(), "Último mes".into())));
        assert_eq!(parse_filter("area="), Ok(("area".into(), String::new())));
        assert!(parse_filter("nokey").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::parse_from([
            "kepler-dash", "render", "-d", "audit", "-v", "hallazgos", "-f", "severity=Bajo", "--json",
        ]);
        match cli.command {
            Some(Command::Render { dashboard, view, filters, json }) => {
                assert_eq!(dashboard, "audit");
                assert_eq!(view.as_deref(), Some("hallazgos"));
                assert_eq!(filters, vec![("severity".to_string(), "Bajo".to_string())]);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::parse_from(["kepler-dash"]);
        assert!(cli.command.is_none());
    }
}
