//! Implementation of the `smartcode tasks` command.

use crate::error::Result;
use crate::report::report_path;
use crate::task::Task;
use std::path::Path;

/// List the available tasks.
pub fn cmd_tasks() -> Result<()> {
    print!("{}", format_task_list());
    Ok(())
}

/// One line per task: name, report file for `<file>.<ext>`, sections.
fn format_task_list() -> String {
    let example = Path::new("<file>.<ext>");
    let mut out = String::from("Available tasks:\n\n");

    for task in Task::ALL {
        let profile = task.profile();
        let report = report_path(example, profile.output_suffix);
        out.push_str(&format!(
            "  {:<10} {:<26} {}\n",
            profile.name,
            report.display(),
            profile.sections.join(", ")
        ));
    }

    out.push_str("\n`generate-tests` is accepted as an alias for `test`.\n");
    out
}
