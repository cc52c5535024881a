//! Terminal front-end: load a JSON row dataset (or the built-in demo),
//! compose the timeline view, and print a textual summary. Rendering
//! proper lives elsewhere; this prints the derived structures.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use laneboard_core::ingest::{self, RawRow, dates};
use laneboard_core::model::ViewState;
use laneboard_core::{demo, views};
use serde_json::Value;

struct Args {
    file: Option<PathBuf>,
    query: String,
    resources: Vec<String>,
    export: bool,
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args {
        file: None,
        query: String::new(),
        resources: Vec::new(),
        export: false,
    };
    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--query" | "-q" => {
                args.query = iter
                    .next()
                    .context("--query needs a value")?
                    .clone();
            }
            "--resources" | "-r" => {
                let list = iter.next().context("--resources needs a value")?;
                args.resources = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            "--export" => args.export = true,
            other if other.starts_with('-') => bail!("unknown flag: {other}"),
            other => args.file = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

/// Read a dataset: either a bare JSON array of row objects, or an object
/// `{"headers": [...], "rows": [...]}` preserving column order.
fn load_rows(path: &Path) -> Result<(Vec<String>, Vec<RawRow>)> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;

    match value {
        Value::Array(items) => {
            let rows: Vec<RawRow> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            let mut headers: Vec<String> = Vec::new();
            for row in &rows {
                for key in row.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            Ok((headers, rows))
        }
        Value::Object(mut obj) => {
            let headers = match obj.remove("headers") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect(),
                _ => bail!("expected a \"headers\" array"),
            };
            let rows = match obj.remove("rows") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(map) => Some(map),
                        _ => None,
                    })
                    .collect(),
                _ => bail!("expected a \"rows\" array"),
            };
            Ok((headers, rows))
        }
        _ => bail!("expected an array of row objects"),
    }
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv)?;

    let (headers, rows) = match &args.file {
        Some(path) => load_rows(path)?,
        None => (demo::demo_headers(), demo::demo_rows()),
    };

    let normalized = ingest::normalize(&headers, &rows, None)?;
    let mut state = ViewState::new().with_query(args.query.clone());
    if !args.resources.is_empty() {
        state = state.with_selection(args.resources.iter().cloned());
    }

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    let view = views::compose(&normalized.tasks, &state, now_ms);

    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "{} tasks, {} resources, domain {} .. {} ({} px/h)",
        view.bars().count(),
        view.rows.len(),
        dates::format_instant(view.domain.start_ms),
        dates::format_instant(view.domain.end_ms),
        view.scale,
    )?;
    for row in &view.rows {
        writeln!(
            out,
            "  {:<20} {:>3} tasks in {} lane(s)",
            row.resource,
            row.bars.len(),
            row.lane_count,
        )?;
    }
    if let Some(route) = &view.route {
        writeln!(
            out,
            "route {}: {} steps, {} connectors",
            route.identifier,
            route.steps.len(),
            route.connectors.len(),
        )?;
        for step in &route.steps {
            writeln!(
                out,
                "  {} .. {}  {}",
                dates::format_instant(step.start_ms),
                dates::format_instant(step.end_ms),
                step.resource,
            )?;
        }
    }

    if args.export {
        writeln!(out)?;
        for record in views::export_rows(&view) {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                record.identifier,
                record.resource,
                record.start,
                record.end,
                record
                    .quantity
                    .map(|q| q.to_string())
                    .unwrap_or_default(),
                record.duration_minutes,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_flags_and_file() {
        let args = parse_args(&strs(&[
            "plan.json",
            "--query",
            "3260996",
            "--resources",
            "Laser 1, Press 1",
            "--export",
        ]))
        .unwrap();
        assert_eq!(args.file.as_deref(), Some(Path::new("plan.json")));
        assert_eq!(args.query, "3260996");
        assert_eq!(args.resources, vec!["Laser 1", "Press 1"]);
        assert!(args.export);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(parse_args(&strs(&["--bogus"])).is_err());
    }

    #[test]
    fn defaults_to_demo_dataset() {
        let args = parse_args(&[]).unwrap();
        assert!(args.file.is_none());
        assert!(args.query.is_empty());
    }
}
