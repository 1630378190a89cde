//! Rendering and persistence of suite results.

use super::cases::Role;
use super::runner::SuiteRun;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const TABLE_WIDTH: usize = 76;
const NAME_WIDTH: usize = TABLE_WIDTH - 30;

pub fn readable_time(ns: f64) -> String {
    if !ns.is_finite() {
        return "-".to_string();
    }
    if ns < 1e3 {
        format!("{:.2}ns", ns)
    } else if ns < 1e6 {
        format!("{:.2}us", ns / 1e3)
    } else if ns < 1e9 {
        format!("{:.2}ms", ns / 1e6)
    } else {
        format!("{:.2}s", ns / 1e9)
    }
}

pub fn readable_rate(per_sec: f64) -> String {
    if !per_sec.is_finite() {
        return "inf".to_string();
    }
    if per_sec < 1e3 {
        format!("{:.2}", per_sec)
    } else if per_sec < 1e6 {
        format!("{:.2}K", per_sec / 1e3)
    } else if per_sec < 1e9 {
        format!("{:.2}M", per_sec / 1e6)
    } else {
        format!("{:.2}G", per_sec / 1e9)
    }
}

/// Fixed-width results table, one dashed rule between groups.
pub fn render_table(title: &str, run: &SuiteRun) -> String {
    let heavy = "=".repeat(TABLE_WIDTH);
    let light = "-".repeat(TABLE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(
        out,
        "{:<name$}{:>10}{:>11}{:>9}",
        title,
        "relative",
        "time/iter",
        "iters/s",
        name = NAME_WIDTH
    );
    let _ = writeln!(out, "{}", heavy);

    for (idx, group) in run.groups.iter().enumerate() {
        if idx > 0 {
            let _ = writeln!(out, "{}", light);
        }
        for case in &group.cases {
            let relative = case.relative.map(|r| format!("{:.2}%", r)).unwrap_or_default();
            let _ = writeln!(
                out,
                "{:<name$}{:>10}{:>11}{:>9}",
                case.label,
                relative,
                readable_time(case.ns_per_iter),
                readable_rate(case.iters_per_sec()),
                name = NAME_WIDTH
            );
        }
    }

    let _ = writeln!(out, "{}", heavy);
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMetrics {
    pub group: String,
    pub case: String,
    pub role: Role,
    pub iterations: u64,
    pub ns_per_iter: f64,
    pub iters_per_sec: f64,
    #[serde(default)]
    pub relative_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub generated_at: String,
    pub git_rev: Option<String>,
    pub notes: Option<String>,
    pub metrics: Vec<CaseMetrics>,
}

impl RunRecord {
    pub fn from_run(run: &SuiteRun, timestamp: DateTime<Utc>, notes: Option<String>) -> Self {
        let git_rev = std::env::var("GITHUB_SHA")
            .ok()
            .map(|sha| sha.chars().take(8).collect::<String>());
        let metrics = run
            .cases()
            .map(|(group, case)| CaseMetrics {
                group: group.key.to_string(),
                case: case.label.clone(),
                role: case.role,
                iterations: case.iterations,
                ns_per_iter: case.ns_per_iter,
                iters_per_sec: case.iters_per_sec(),
                relative_percent: case.relative,
            })
            .collect();
        Self {
            generated_at: timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            git_rev,
            notes,
            metrics,
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).with_context(|| format!("write {}", path.display()))?;
    writer.flush().with_context(|| format!("flush {}", path.display()))
}

pub fn write_csv(path: &Path, metrics: &[CaseMetrics]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path).with_context(|| format!("create {}", path.display()))?);
    writeln!(writer, "group,case,role,iterations,ns_per_iter,iters_per_sec,relative_percent")?;
    for metric in metrics {
        let role = match metric.role {
            Role::Baseline => "baseline",
            Role::Relative => "relative",
        };
        let relative = metric.relative_percent.map(|r| format!("{:.4}", r)).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{:.6},{:.6},{}",
            metric.group, metric.case, role, metric.iterations, metric.ns_per_iter, metric.iters_per_sec, relative
        )?;
    }
    writer.flush()?;
    Ok(())
}
