use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{StepResult, VcsStep};
use crate::error::{PublishError, Result};
use crate::git::VersionControl;

/// One recorded invocation of [MockVersionControl]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub step: VcsStep,
    pub args: Vec<OsString>,
    pub work_dir: PathBuf,
}

/// Mock client for testing without running any external program
pub struct MockVersionControl {
    calls: Mutex<Vec<MockCall>>,
    exit_codes: HashMap<VcsStep, i32>,
    unavailable: bool,
}

impl MockVersionControl {
    /// Create a mock where every step succeeds
    pub fn new() -> Self {
        MockVersionControl {
            calls: Mutex::new(Vec::new()),
            exit_codes: HashMap::new(),
            unavailable: false,
        }
    }

    /// Make `step` exit with a non-zero `code`
    pub fn fail_step(mut self, step: VcsStep, code: i32) -> Self {
        self.exit_codes.insert(step, code);
        self
    }

    /// Make every invocation fail to spawn
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Every recorded invocation, in call order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Steps invoked, in call order
    pub fn steps(&self) -> Vec<VcsStep> {
        self.calls().into_iter().map(|call| call.step).collect()
    }
}

impl Default for MockVersionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockVersionControl {
    fn run(&self, step: VcsStep, args: &[OsString], work_dir: &Path) -> Result<StepResult> {
        if self.unavailable {
            return Err(PublishError::version_control(step, "client unavailable"));
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                step,
                args: args.to_vec(),
                work_dir: work_dir.to_path_buf(),
            });
        }

        match self.exit_codes.get(&step) {
            Some(&code) => Ok(StepResult::failed(step, Some(code))),
            None => Ok(StepResult::ok(step)),
        }
    }
}
