//! The analysis tasks smartcode can run.
//!
//! A [`Task`] is pure data: it selects an instruction template, the suffix of
//! the report file, and the wording used in progress messages. All four tasks
//! share one runner, so adding a task means adding a variant and a profile.

mod templates;

use std::fmt;
use std::str::FromStr;

/// One of the supported analysis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Find errors and propose a corrected version.
    Debug,
    /// Suggest performance and design improvements.
    Optimize,
    /// Describe what the code does.
    Explain,
    /// Write tests for the code.
    GenerateTests,
}

/// Static description of a task.
#[derive(Debug)]
pub struct TaskProfile {
    /// CLI subcommand name.
    pub name: &'static str,
    /// Progress verb, e.g. "Debugging".
    pub label: &'static str,
    /// Human name of the artifact, e.g. "Debug report".
    pub report_name: &'static str,
    /// Appended to the source stem to form the report file name.
    pub output_suffix: &'static str,
    /// Section headings the instructions ask the model to produce.
    pub sections: &'static [&'static str],
    /// Instruction template with a `{code}` placeholder.
    pub instructions: &'static str,
}

const DEBUG: TaskProfile = TaskProfile {
    name: "debug",
    label: "Debugging",
    report_name: "Debug report",
    output_suffix: "debug",
    sections: &["ERRORS FOUND", "SOLUTIONS", "CORRECTED CODE"],
    instructions: templates::DEBUG,
};

const OPTIMIZE: TaskProfile = TaskProfile {
    name: "optimize",
    label: "Optimizing",
    report_name: "Optimization report",
    output_suffix: "optimized",
    sections: &[
        "INEFFICIENCIES",
        "IMPROVEMENTS",
        "COMPLEXITY COMPARISON",
        "OPTIMIZED CODE",
    ],
    instructions: templates::OPTIMIZE,
};

const EXPLAIN: TaskProfile = TaskProfile {
    name: "explain",
    label: "Explaining",
    report_name: "Explanation",
    output_suffix: "explanation",
    sections: &["OVERVIEW", "KEY COMPONENTS", "STEP-BY-STEP WALKTHROUGH"],
    instructions: templates::EXPLAIN,
};

const GENERATE_TESTS: TaskProfile = TaskProfile {
    name: "test",
    label: "Generating tests for",
    report_name: "Generated tests",
    output_suffix: "tests",
    sections: &["TEST PLAN", "TEST CODE"],
    instructions: templates::GENERATE_TESTS,
};

impl Task {
    /// Every task, in the order they are listed to the user.
    pub const ALL: [Task; 4] = [
        Task::Debug,
        Task::Optimize,
        Task::Explain,
        Task::GenerateTests,
    ];

    pub fn profile(self) -> &'static TaskProfile {
        match self {
            Task::Debug => &DEBUG,
            Task::Optimize => &OPTIMIZE,
            Task::Explain => &EXPLAIN,
            Task::GenerateTests => &GENERATE_TESTS,
        }
    }

    pub fn name(self) -> &'static str {
        self.profile().name
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn output_suffix(self) -> &'static str {
        self.profile().output_suffix
    }

    pub fn instructions(self) -> &'static str {
        self.profile().instructions
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = String;

    /// Accepts the CLI names plus `generate-tests` for the test task.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Task::Debug),
            "optimize" => Ok(Task::Optimize),
            "explain" => Ok(Task::Explain),
            "test" | "generate-tests" => Ok(Task::GenerateTests),
            other => Err(format!(
                "unknown task '{}' (expected one of: debug, optimize, explain, test)",
                other
            )),
        }
    }
}
