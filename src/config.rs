//! Run configuration and the caller-level step loop.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::Model;

/// How long to drive a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum steps to run in one call.
    pub max_steps: u64,

    /// Stop at the first step that changes nothing.
    pub stop_when_stable: bool,

    /// Emit a progress event every this many steps. 0 disables it.
    pub log_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: 1_000,
            stop_when_stable: true,
            log_every: 100,
        }
    }
}

impl RunConfig {
    /// Short runs for interactive use.
    pub fn quick() -> Self {
        Self {
            max_steps: 100,
            log_every: 10,
            ..Default::default()
        }
    }

    /// Long unattended runs.
    pub fn long_run() -> Self {
        Self {
            max_steps: 1_000_000,
            log_every: 10_000,
            ..Default::default()
        }
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps_run: u64,
    pub final_step: u64,
    /// Some step in this run changed nothing.
    pub stabilized: bool,
}

/// Drives `model` according to `config`.
pub fn run<M: Model + ?Sized>(model: &mut M, config: &RunConfig) -> RunSummary {
    info!(
        max_steps = config.max_steps,
        stop_when_stable = config.stop_when_stable,
        start_step = model.step(),
        "aether_run_start"
    );

    let mut steps_run = 0;
    let mut stabilized = false;
    while steps_run < config.max_steps {
        let changed = model.next_step();
        steps_run += 1;

        if config.log_every > 0 && steps_run % config.log_every == 0 {
            info!(
                step = model.step(),
                asymmetric_max_x = model.asymmetric_max_x(),
                "aether_run_progress"
            );
        }

        if !changed {
            if !stabilized {
                info!(step = model.step(), "aether_stabilized");
            }
            stabilized = true;
            if config.stop_when_stable {
                break;
            }
        }
    }

    info!(steps_run, final_step = model.step(), stabilized, "aether_run_complete");

    RunSummary {
        steps_run,
        final_step: model.step(),
        stabilized,
    }
}
