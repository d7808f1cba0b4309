use crate::invoke::{InvocationError, ModelInvoker};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A [`ModelInvoker`] that returns a canned result and records every call.
pub(crate) struct FakeInvoker {
    respond: Box<dyn Fn() -> Result<String, InvocationError>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FakeInvoker {
    pub(crate) fn responding(text: &str) -> Self {
        let text = text.to_string();
        Self::with(move || Ok(text.clone()))
    }

    pub(crate) fn failing(exit_code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self::with(move || {
            Err(InvocationError::Failed {
                exit_code: Some(exit_code),
                stderr: stderr.clone(),
            })
        })
    }

    pub(crate) fn unlaunchable() -> Self {
        Self::with(|| {
            Err(InvocationError::Launch {
                program: "ollama".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            })
        })
    }

    fn with(respond: impl Fn() -> Result<String, InvocationError> + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `(prompt, model)` for every invocation so far.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl ModelInvoker for FakeInvoker {
    fn invoke(&self, prompt: &str, model: &str) -> Result<String, InvocationError> {
        self.calls
            .borrow_mut()
            .push((prompt.to_string(), model.to_string()));
        (self.respond)()
    }
}

/// Write a source file into `dir` and return its path.
pub(crate) fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a shell script standing in for the inference binary.
///
/// The script is run through `sh` rather than executed directly, which avoids
/// ETXTBSY races when tests spawn processes in parallel.
#[cfg(unix)]
pub(crate) fn write_stub_model(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(format!("{}.sh", name));
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    path
}

/// An invoker that runs `sh <stub> run <model>`.
#[cfg(unix)]
pub(crate) fn stub_invoker(stub: &Path) -> crate::invoke::ProcessInvoker {
    let stub = stub.to_string_lossy();
    crate::invoke::ProcessInvoker::new(format!("sh {} run {{model}}", shell_words::quote(&stub)))
}
