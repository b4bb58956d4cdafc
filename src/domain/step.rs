use std::fmt;

/// One invocation of the version-control client, in publish order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsStep {
    Stage,
    Commit,
    Pull,
    Push,
}

impl VcsStep {
    /// All steps in the order they are executed
    pub const SEQUENCE: [VcsStep; 4] = [
        VcsStep::Stage,
        VcsStep::Commit,
        VcsStep::Pull,
        VcsStep::Push,
    ];

    /// Get the step name as a string
    pub fn name(&self) -> &'static str {
        match self {
            VcsStep::Stage => "stage",
            VcsStep::Commit => "commit",
            VcsStep::Pull => "pull",
            VcsStep::Push => "push",
        }
    }
}

impl fmt::Display for VcsStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub step: VcsStep,
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal or never spawned
    pub code: Option<i32>,
}

impl StepResult {
    pub fn ok(step: VcsStep) -> Self {
        StepResult {
            step,
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(step: VcsStep, code: Option<i32>) -> Self {
        StepResult {
            step,
            success: false,
            code,
        }
    }
}

/// Typed result of a publish run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    StageFailed,
    CommitFailed,
    PullFailed,
    PushFailed,
}

impl PublishOutcome {
    fn failed_at(step: VcsStep) -> Self {
        match step {
            VcsStep::Stage => PublishOutcome::StageFailed,
            VcsStep::Commit => PublishOutcome::CommitFailed,
            VcsStep::Pull => PublishOutcome::PullFailed,
            VcsStep::Push => PublishOutcome::PushFailed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Published)
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PublishOutcome::Published => "published",
            PublishOutcome::StageFailed => "stage failed",
            PublishOutcome::CommitFailed => "commit failed",
            PublishOutcome::PullFailed => "pull failed",
            PublishOutcome::PushFailed => "push failed",
        };
        f.write_str(text)
    }
}

/// Ordered record of the steps that actually ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceReport {
    results: Vec<StepResult>,
}

impl SequenceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    pub fn steps_run(&self) -> Vec<VcsStep> {
        self.results.iter().map(|r| r.step).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// The outcome is determined by the first failed step, if any
    pub fn outcome(&self) -> PublishOutcome {
        self.failures()
            .next()
            .map(|r| PublishOutcome::failed_at(r.step))
            .unwrap_or(PublishOutcome::Published)
    }
}
