use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use weekday_range_core::{
    DateRange, FixedClock, IgnoreReason, MonthView, PickOutcome, RangeChange, RangeSelector,
    SelectorConfig, Selection, weekdays_between, weekends_between,
};

#[derive(Parser)]
#[command(
    name = "weekday-range",
    about = "Pick weekday date ranges and list the weekends inside them"
)]
struct Cli {
    /// JSON selector config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD, defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Ignore picks before today
    #[arg(long)]
    disable_past_dates: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the weekend dates in an inclusive interval
    Weekends {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay day clicks in order and report each change
    Pick {
        /// Dates to click (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<NaiveDate>,

        /// Hover over this date after the last click
        #[arg(long)]
        hover: Option<NaiveDate>,

        /// Print changes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a preset range by label
    Preset {
        /// Preset label, e.g. "Last 7 Days" (case-insensitive)
        label: String,

        /// Print the change as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured presets and what they resolve to today
    Presets,

    /// Render month grids with the selection highlighted
    Calendar {
        /// First month to show (YYYY-MM, defaults to the current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<MonthView>,

        /// Number of consecutive months
        #[arg(long, default_value_t = 2)]
        months: u32,

        /// Selection start (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Selection end (YYYY-MM-DD, requires --start)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },
}

fn parse_month(s: &str) -> Result<MonthView, String> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {s}"))?;
    let year: i32 = year.parse().map_err(|_| format!("invalid year: {year}"))?;
    let month: u32 = month.parse().map_err(|_| format!("invalid month: {month}"))?;
    MonthView::new(year, month).map_err(|e| e.to_string())
}

fn load_config(cli: &Cli) -> Result<SelectorConfig> {
    let mut config = match &cli.config {
        Some(path) => SelectorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SelectorConfig::default(),
    };
    if cli.disable_past_dates {
        config.disable_past_dates = true;
    }
    Ok(config)
}

fn build_selector(config: &SelectorConfig, today: Option<NaiveDate>) -> RangeSelector {
    match today {
        Some(day) => RangeSelector::with_clock(config, FixedClock(day)),
        None => RangeSelector::new(config),
    }
}

/// Collect notifications so they can be printed after each command step.
fn record_changes(selector: &mut RangeSelector) -> Rc<RefCell<Vec<RangeChange>>> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    selector.on_change(move |change: &RangeChange| sink.borrow_mut().push(change.clone()));
    changes
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || "Select Date".to_string(),
        |d| d.format("%a %b %d %Y").to_string(),
    )
}

fn format_dates(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "(none)".to_string();
    }
    dates
        .iter()
        .map(|d| d.format("%a %b %d %Y").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_change(change: &RangeChange, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(change).context("failed to serialize change")?;
        println!("{line}");
        return Ok(());
    }
    println!("Start date: {}", format_date(change.range.start()));
    println!("End date: {}", format_date(change.range.end()));
    println!("Weekend dates: {}", format_dates(&change.weekends));
    Ok(())
}

fn print_changes(changes: &RefCell<Vec<RangeChange>>, json: bool) -> Result<()> {
    for change in changes.borrow_mut().drain(..) {
        print_change(&change, json)?;
    }
    Ok(())
}

fn cmd_weekends(start: NaiveDate, end: NaiveDate, json: bool) -> Result<()> {
    let range = DateRange::new(start, end).context("invalid interval")?;
    let weekends = weekends_between(start, end).context("failed to scan for weekends")?;
    let weekdays = weekdays_between(start, end).context("failed to scan for weekdays")?;

    if json {
        print_change(&RangeChange { range, weekends }, true)?;
        return Ok(());
    }

    println!(
        "{start} to {end}: {} weekday(s), {} weekend day(s)",
        weekdays.len(),
        weekends.len()
    );
    for date in &weekends {
        println!("  {}", date.format("%a %Y-%m-%d"));
    }
    Ok(())
}

fn cmd_pick(
    selector: &mut RangeSelector,
    dates: &[NaiveDate],
    hover: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let changes = record_changes(selector);

    for &date in dates {
        let outcome = selector
            .pick_date(date)
            .with_context(|| format!("failed to pick {date}"))?;
        match outcome {
            PickOutcome::Ignored(IgnoreReason::Weekend) => {
                warn!("{date}: weekend days cannot be range endpoints")
            }
            PickOutcome::Ignored(IgnoreReason::PastDate) => {
                warn!("{date}: past dates are disabled")
            }
            PickOutcome::Started => info!("{date}: range started"),
            PickOutcome::Rejected => {
                if let Some(err) = selector.session_error() {
                    warn!("{date}: {err}");
                }
            }
            PickOutcome::Completed => info!("{date}: range completed"),
        }
        print_changes(&changes, json)?;
    }

    selector.hover(hover);

    if json {
        return Ok(());
    }

    let range = selector.current_range();
    println!(
        "Start Date: {} - End Date: {}",
        format_date(range.start()),
        format_date(range.end())
    );
    if let Some(err) = selector.session_error() {
        println!("{err}");
    }
    if let (Selection::Partial(start), Some(hovered)) = (selector.state(), selector.hovered()) {
        if selector.is_day_in_range(hovered) {
            println!("Preview: {start} to {hovered}");
        }
    }
    Ok(())
}

fn cmd_preset(selector: &mut RangeSelector, label: &str, json: bool) -> Result<()> {
    let changes = record_changes(selector);
    let range = selector
        .apply_preset_by_label(label)
        .with_context(|| format!("failed to apply preset {label:?}"))?;
    info!("{label}: applied {range:?}");
    print_changes(&changes, json)
}

fn cmd_presets(selector: &RangeSelector) -> Result<()> {
    let today = selector.today();
    for preset in selector.presets() {
        let range = preset
            .resolve(today)
            .with_context(|| format!("failed to resolve preset {:?}", preset.label()))?;
        println!(
            "{}: {} to {}",
            preset.label(),
            format_date(range.start()),
            format_date(range.end())
        );
    }
    Ok(())
}

/// Text grid for one month.
///
/// Endpoints are `[dd]`, other in-range days `(dd)`, disabled days `-dd-`
/// and remaining weekend days `*dd`.
fn render_month(view: &MonthView, selector: &RangeSelector) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{view:^28}");
    out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa \n");

    let cells = view.cells(selector);
    for week in cells.chunks(7) {
        for cell in week {
            let text = match cell {
                None => "    ".to_string(),
                Some(c) => {
                    let day = c.date.format("%d");
                    if c.endpoint {
                        format!("[{day}]")
                    } else if c.in_range {
                        format!("({day})")
                    } else if c.disabled {
                        format!("-{day}-")
                    } else if c.weekend {
                        format!("*{day} ")
                    } else {
                        format!(" {day} ")
                    }
                }
            };
            out.push_str(&text);
        }
        out.push('\n');
    }
    out
}

fn cmd_calendar(
    selector: &mut RangeSelector,
    month: Option<MonthView>,
    months: u32,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let range = DateRange::new(start, end).context("invalid selection")?;
            selector
                .apply_preset(range)
                .context("failed to apply selection")?;
        }
        (Some(start), None) => {
            selector
                .pick_date(start)
                .with_context(|| format!("failed to pick {start}"))?;
        }
        _ => {}
    }

    let mut view = Some(month.unwrap_or_else(|| MonthView::containing(selector.today())));
    for _ in 0..months {
        let Some(current) = view else {
            warn!("no further months to render");
            break;
        };
        println!("{}", render_month(&current, selector));
        view = current.next();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = load_config(&cli)?;
    let mut selector = build_selector(&config, cli.today);

    match &cli.command {
        Commands::Weekends { start, end, json } => {
            cmd_weekends(*start, *end, *json)?;
        }
        Commands::Pick { dates, hover, json } => {
            cmd_pick(&mut selector, dates, *hover, *json)?;
        }
        Commands::Preset { label, json } => {
            cmd_preset(&mut selector, label, *json)?;
        }
        Commands::Presets => {
            cmd_presets(&selector)?;
        }
        Commands::Calendar {
            month,
            months,
            start,
            end,
        } => {
            cmd_calendar(&mut selector, *month, *months, *start, *end)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_weekends_args() {
        let cli = Cli::try_parse_from([
            "weekday-range",
            "weekends",
            "--start",
            "2024-03-04",
            "--end",
            "2024-03-15",
        ])
        .unwrap();

        match cli.command {
            Commands::Weekends { start, end, json } => {
                assert_eq!(start, date(2024, 3, 4));
                assert_eq!(end, date(2024, 3, 15));
                assert!(!json);
            }
            _ => panic!("expected Weekends command"),
        }
    }

    #[test]
    fn parse_pick_args() {
        let cli = Cli::try_parse_from([
            "weekday-range",
            "--today",
            "2024-03-13",
            "--disable-past-dates",
            "pick",
            "2024-03-11",
            "2024-03-15",
            "--hover",
            "2024-03-14",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.today, Some(date(2024, 3, 13)));
        assert!(cli.disable_past_dates);
        match cli.command {
            Commands::Pick { dates, hover, json } => {
                assert_eq!(dates, vec![date(2024, 3, 11), date(2024, 3, 15)]);
                assert_eq!(hover, Some(date(2024, 3, 14)));
                assert!(json);
            }
            _ => panic!("expected Pick command"),
        }
    }

    #[test]
    fn pick_requires_dates() {
        assert!(Cli::try_parse_from(["weekday-range", "pick"]).is_err());
    }

    #[test]
    fn parse_preset_label() {
        let cli = Cli::try_parse_from(["weekday-range", "preset", "Last 7 Days"]).unwrap();
        match cli.command {
            Commands::Preset { label, json } => {
                assert_eq!(label, "Last 7 Days");
                assert!(!json);
            }
            _ => panic!("expected Preset command"),
        }
    }

    #[test]
    fn parse_calendar_defaults() {
        let cli = Cli::try_parse_from(["weekday-range", "calendar"]).unwrap();
        match cli.command {
            Commands::Calendar {
                month,
                months,
                start,
                end,
            } => {
                assert!(month.is_none());
                assert_eq!(months, 2);
                assert!(start.is_none());
                assert!(end.is_none());
            }
            _ => panic!("expected Calendar command"),
        }
        assert_eq!(cli.log_level, "info");
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_calendar_month() {
        let cli =
            Cli::try_parse_from(["weekday-range", "calendar", "--month", "2024-03"]).unwrap();
        match cli.command {
            Commands::Calendar { month, .. } => {
                assert_eq!(month, Some(MonthView::new(2024, 3).unwrap()));
            }
            _ => panic!("expected Calendar command"),
        }
    }

    #[test]
    fn calendar_end_requires_start() {
        assert!(
            Cli::try_parse_from(["weekday-range", "calendar", "--end", "2024-03-15"]).is_err()
        );
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert!(parse_month("2024").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("abcd-01").is_err());
    }

    #[test]
    fn format_missing_date() {
        assert_eq!(format_date(None), "Select Date");
        assert_eq!(format_date(Some(date(2024, 3, 11))), "Mon Mar 11 2024");
    }

    #[test]
    fn render_marks_selection() {
        let mut selector =
            RangeSelector::with_clock(&SelectorConfig::default(), FixedClock(date(2024, 3, 13)));
        selector.pick_date(date(2024, 3, 11)).unwrap();
        selector.pick_date(date(2024, 3, 13)).unwrap();

        let text = render_month(&MonthView::new(2024, 3).unwrap(), &selector);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "March 2024");
        assert!(lines[1].starts_with(" Su"));
        assert!(text.contains("[11](12)[13]"));
        assert!(text.contains(" 14 "));
        assert!(text.contains("*16 "));
        // 5 leading blanks + 31 days = 36 cells over 6 weeks
        assert_eq!(lines.len(), 2 + 6);
    }

    #[test]
    fn render_marks_disabled_days() {
        let config = SelectorConfig {
            disable_past_dates: true,
            ..Default::default()
        };
        let selector = RangeSelector::with_clock(&config, FixedClock(date(2024, 3, 13)));
        let text = render_month(&MonthView::new(2024, 3).unwrap(), &selector);
        assert!(text.contains("-12-"));
        assert!(text.contains(" 13 "));
    }
}
