//! Doctor command - check provider setup, workspace and cluster

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};
use serde_json::Value;
use solbal_core::services::{CheckStatus, DoctorService};

use super::{lookup, workspace_dir};
use crate::output;
use crate::ProviderArgs;

/// Format a detail JSON value for display
fn format_detail(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}: {}", k, s),
                Value::Array(arr) if arr.len() > 5 => format!("{}: [{} items]", k, arr.len()),
                Value::Array(arr) => format!(
                    "{}: {}",
                    k,
                    arr.iter()
                        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                _ => format!("{}: {}", k, v),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

pub async fn run(args: &ProviderArgs, program: &str, verbose: bool, json: bool) -> Result<()> {
    let service = DoctorService::new(workspace_dir(args)?, program);
    let result = service.run_checks(|key| lookup(args, key)).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "Setup Health Check".bold());
        println!();

        let mut table = output::create_table();
        table.set_header(vec!["Check", "Status", "Message"]);

        for check in &result.checks {
            let status_cell = match check.status {
                CheckStatus::Pass => Cell::new("PASS").fg(Color::Green),
                CheckStatus::Warning => Cell::new("WARN").fg(Color::Yellow),
                CheckStatus::Error => Cell::new("ERROR").fg(Color::Red),
            };

            table.add_row(vec![
                Cell::new(&check.name),
                status_cell,
                Cell::new(&check.message),
            ]);

            if verbose {
                for detail in check.details.iter().flatten() {
                    table.add_row(vec![
                        Cell::new(""),
                        Cell::new(""),
                        Cell::new(format!("  - {}", format_detail(detail))),
                    ]);
                }
            }
        }

        println!("{}", table);
        println!();

        println!(
            "Summary: {} passed, {} warnings, {} errors",
            result.summary.passed.to_string().green(),
            result.summary.warnings.to_string().yellow(),
            result.summary.errors.to_string().red(),
        );
    }

    if !result.is_healthy() {
        anyhow::bail!("{} check(s) failed", result.summary.errors);
    }

    Ok(())
}
