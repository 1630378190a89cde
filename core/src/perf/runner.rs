use super::cases::{Case, CaseGroup, Role};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Total time budget per case, split evenly across epochs.
    pub min_time_ms: u64,
    pub max_iters: u64,
    pub epochs: u32,
    /// Only run cases whose label contains this substring.
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_time_ms: 100,
            max_iters: 1 << 30,
            epochs: 3,
            filter: None,
        }
    }
}

impl RunnerConfig {
    pub fn min_time(&self) -> Duration {
        Duration::from_millis(self.min_time_ms)
    }

    fn epoch_budget(&self) -> Duration {
        self.min_time() / self.epochs.max(1)
    }

    pub fn selects(&self, case: &Case) -> bool {
        match &self.filter {
            Some(filter) => case.label().contains(filter.as_str()),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseMeasurement {
    pub label: String,
    pub role: Role,
    pub iterations: u64,
    /// Best per-iteration time across epochs.
    pub ns_per_iter: f64,
    /// Baseline time over this case's time, in percent.
    pub relative: Option<f64>,
    pub checksum: i64,
}

impl CaseMeasurement {
    pub fn iters_per_sec(&self) -> f64 {
        if self.ns_per_iter > 0.0 {
            1e9 / self.ns_per_iter
        } else {
            f64::INFINITY
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMeasurement {
    pub key: &'static str,
    pub title: &'static str,
    pub cases: Vec<CaseMeasurement>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteRun {
    pub groups: Vec<GroupMeasurement>,
}

impl SuiteRun {
    pub fn cases(&self) -> impl Iterator<Item = (&GroupMeasurement, &CaseMeasurement)> {
        self.groups
            .iter()
            .flat_map(|group| group.cases.iter().map(move |case| (group, case)))
    }
}

struct Timing {
    iterations: u64,
    ns_per_iter: f64,
    checksum: i64,
}

/// Grow the iteration count until one epoch fills its budget, then run
/// `epochs` fresh epochs at that count and keep the fastest.
fn measure(case: &Case, config: &RunnerConfig) -> Result<Timing> {
    let budget = config.epoch_budget();
    let max_iters = config.max_iters.max(1);

    let mut iters = 1u64;
    let mut outcome = case.run(iters)?;
    while outcome.elapsed < budget && iters < max_iters {
        iters = iters.saturating_mul(2).min(max_iters);
        outcome = case.run(iters)?;
        debug!(
            target: "genbench::runner",
            case = %case.label(),
            iters,
            elapsed = ?outcome.elapsed,
            "calibrating"
        );
    }

    let per_iter = |elapsed: Duration| elapsed.as_nanos() as f64 / iters as f64;
    let mut best = f64::INFINITY;
    let mut checksum = outcome.checksum;
    for _ in 0..config.epochs.max(1) {
        let epoch = case.run(iters)?;
        best = best.min(per_iter(epoch.elapsed));
        checksum = epoch.checksum;
    }

    Ok(Timing {
        iterations: iters,
        ns_per_iter: best,
        checksum,
    })
}

pub fn run_group(group: &CaseGroup, config: &RunnerConfig) -> Result<Option<GroupMeasurement>> {
    let mut baseline_ns: Option<f64> = None;
    let mut cases = Vec::new();

    for case in group.cases {
        if !config.selects(case) {
            if case.role() == Role::Baseline {
                baseline_ns = None;
            }
            continue;
        }

        let timing = measure(case, config)?;
        let relative = match case.role() {
            Role::Baseline => {
                baseline_ns = Some(timing.ns_per_iter);
                None
            }
            Role::Relative => match baseline_ns {
                Some(base) if timing.ns_per_iter > 0.0 => Some(base / timing.ns_per_iter * 100.0),
                Some(_) => None,
                None => {
                    warn!(
                        target: "genbench::runner",
                        case = %case.label(),
                        "baseline filtered out; no relative figure"
                    );
                    None
                }
            },
        };

        info!(
            target: "genbench::runner",
            case = %case.label(),
            iterations = timing.iterations,
            ns_per_iter = timing.ns_per_iter,
            "measured"
        );
        cases.push(CaseMeasurement {
            label: case.label(),
            role: case.role(),
            iterations: timing.iterations,
            ns_per_iter: timing.ns_per_iter,
            relative,
            checksum: timing.checksum,
        });
    }

    if cases.is_empty() {
        return Ok(None);
    }
    Ok(Some(GroupMeasurement {
        key: group.key,
        title: group.title,
        cases,
    }))
}

pub fn run_suite(groups: &[CaseGroup], config: &RunnerConfig) -> Result<SuiteRun> {
    let mut run = SuiteRun::default();
    for group in groups {
        if let Some(measured) = run_group(group, config)? {
            run.groups.push(measured);
        }
    }
    Ok(run)
}
