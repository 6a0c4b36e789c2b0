//! Wall-clock accounting for the analysis stages.
//!
//! The analyzer wraps each stage (axis, profile, orientation, the optional
//! re-profile, angle filter, neck, offset, combine, pose) in
//! [`StageClock::time`]; [`StageClock::finish`] yields the serialisable
//! [`TimingBreakdown`] stored in the report trace.
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Time spent in one named analysis stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: String,
    pub elapsed_ms: f64,
}

/// Stage timings of one analysis run, in execution order. `total_ms` covers
/// the whole run, including bookkeeping between stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Elapsed time of `stage`, if it ran.
    pub fn stage_ms(&self, stage: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }

    /// The stage that took longest; ties keep the earlier stage.
    pub fn slowest(&self) -> Option<&StageTiming> {
        self.stages.iter().fold(None, |best, s| match best {
            Some(b) if b.elapsed_ms >= s.elapsed_ms => Some(b),
            _ => Some(s),
        })
    }
}

/// Running clock for one analysis.
#[derive(Debug)]
pub struct StageClock {
    started: Instant,
    stages: Vec<StageTiming>,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stages: Vec::new(),
        }
    }

    /// Runs `stage_fn`, records its duration under `stage` and passes its
    /// value through. Failed stages are recorded too.
    pub fn time<T>(&mut self, stage: &'static str, stage_fn: impl FnOnce() -> T) -> T {
        let begin = Instant::now();
        let out = stage_fn();
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            elapsed_ms: millis_since(begin),
        });
        out
    }

    pub fn finish(self) -> TimingBreakdown {
        TimingBreakdown {
            total_ms: millis_since(self.started),
            stages: self.stages,
        }
    }
}

fn millis_since(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
