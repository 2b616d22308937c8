//! Progress reporting for the pipeline stages.
//!
//! Events carry counts only and never influence results, so [`NoProgress`]
//! is always a valid sink.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

/// A named pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Materializing connected induced subgraphs.
    ConnectedSubgraphs,
    /// Expanding induced subgraphs into their connected edge reductions.
    EdgeReduction,
    /// Collapsing candidates into isomorphism classes.
    IsomorphismElimination,
    /// Pruning candidates that embed into another candidate.
    OptimalSelection,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ConnectedSubgraphs,
        Stage::EdgeReduction,
        Stage::IsomorphismElimination,
        Stage::OptimalSelection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::ConnectedSubgraphs => "connected subgraphs",
            Stage::EdgeReduction => "edge reduction",
            Stage::IsomorphismElimination => "isomorphism elimination",
            Stage::OptimalSelection => "optimal selection",
        }
    }

    fn index(self) -> usize {
        match self {
            Stage::ConnectedSubgraphs => 0,
            Stage::EdgeReduction => 1,
            Stage::IsomorphismElimination => 2,
            Stage::OptimalSelection => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sink for stage start/advance/finish events.
///
/// Stages may advance from several rayon workers at once, hence `&self` and
/// the `Sync` bound.
pub trait Progress: Send + Sync {
    /// A stage begins with `total` items to process.
    fn start(&self, stage: Stage, total: usize);
    /// `delta` more items of the stage were processed.
    fn advance(&self, stage: Stage, delta: usize);
    /// A stage ends having produced `produced` results.
    fn finish(&self, stage: Stage, produced: usize);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _stage: Stage, _total: usize) {}
    fn advance(&self, _stage: Stage, _delta: usize) {}
    fn finish(&self, _stage: Stage, _produced: usize) {}
}

#[derive(Debug, Default)]
struct StageCounters {
    total: AtomicU64,
    done: AtomicU64,
    produced: AtomicU64,
}

/// Counters of one stage at the time of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: u64,
    pub done: u64,
    pub produced: u64,
}

/// Emits events through `tracing`, prefixed with a run label such as
/// `"grid-3x4 k=5"`, and keeps per-stage counters.
#[derive(Debug)]
pub struct TracingProgress {
    label: String,
    report_every: u64,
    stages: [StageCounters; 4],
}

impl TracingProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            report_every: 10_000,
            stages: Default::default(),
        }
    }

    /// Emit an advance event every `report_every` items (0 disables them).
    pub fn with_report_every(mut self, report_every: u64) -> Self {
        self.report_every = report_every;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn snapshot(&self, stage: Stage) -> ProgressSnapshot {
        let counters = &self.stages[stage.index()];
        ProgressSnapshot {
            total: counters.total.load(Ordering::Relaxed),
            done: counters.done.load(Ordering::Relaxed),
            produced: counters.produced.load(Ordering::Relaxed),
        }
    }
}

impl Progress for TracingProgress {
    fn start(&self, stage: Stage, total: usize) {
        let counters = &self.stages[stage.index()];
        counters.total.store(total as u64, Ordering::Relaxed);
        counters.done.store(0, Ordering::Relaxed);
        counters.produced.store(0, Ordering::Relaxed);
        info!(label = %self.label, %stage, total, "stage started");
    }

    fn advance(&self, stage: Stage, delta: usize) {
        let counters = &self.stages[stage.index()];
        let delta = delta as u64;
        let done = counters.done.fetch_add(delta, Ordering::Relaxed) + delta;
        if self.report_every > 0 && done / self.report_every != (done - delta) / self.report_every
        {
            let total = counters.total.load(Ordering::Relaxed);
            debug!(label = %self.label, %stage, done, total, "stage progress");
        }
    }

    fn finish(&self, stage: Stage, produced: usize) {
        let counters = &self.stages[stage.index()];
        counters.produced.store(produced as u64, Ordering::Relaxed);
        let done = counters.done.load(Ordering::Relaxed);
        info!(label = %self.label, %stage, done, produced, "stage finished");
    }
}
