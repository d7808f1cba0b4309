//! Inference subprocess executor.
//!
//! Runs the configured command (by default `ollama run {model}`) with the
//! prompt on stdin and collects its complete output.

use super::{InvocationError, InvocationOutput, ModelInvoker};
use crate::config::{Config, DEFAULT_COMMAND};
use crate::prompt::render_template;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

/// Invokes a model by running a local inference command.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    command: String,
    environment: BTreeMap<String, String>,
}

impl Default for ProcessInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl ProcessInvoker {
    /// Create an invoker from a command template such as `ollama run {model}`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            environment: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.command.clone()).with_environment(config.environment.clone())
    }

    /// Set extra environment variables for the child process.
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    /// Argument vector for `model`.
    ///
    /// The template is split into words before substitution, so a model name
    /// is always passed as a single argument.
    pub fn command_line(&self, model: &str) -> Result<Vec<String>, InvocationError> {
        let words = shell_words::split(&self.command).map_err(|e| {
            InvocationError::Command(format!("cannot parse '{}': {}", self.command, e))
        })?;

        if words.is_empty() {
            return Err(InvocationError::Command("command is empty".to_string()));
        }

        let vars = HashMap::from([("model", model)]);
        words
            .iter()
            .map(|word| {
                render_template(word, &vars)
                    .map_err(|e| InvocationError::Command(format!("'{}': {}", self.command, e)))
            })
            .collect()
    }

    /// Shell-quoted command line for display.
    pub fn describe(&self, model: &str) -> Result<String, InvocationError> {
        Ok(shell_words::join(self.command_line(model)?))
    }

    /// Run the inference process once and capture everything it produced.
    ///
    /// The prompt is written from a separate thread while this thread drains
    /// stdout and stderr, so neither side can stall on a full pipe. Stdin is
    /// closed once the prompt is written.
    pub fn run(&self, prompt: &str, model: &str) -> Result<InvocationOutput, InvocationError> {
        let args = self.command_line(model)?;
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| InvocationError::Command("command is empty".to_string()))?;

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (key, value) in &self.environment {
            command.env(key, value);
        }

        tracing::debug!(
            program = %program,
            args = ?rest,
            prompt_bytes = prompt.len(),
            "spawning inference process"
        );

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| InvocationError::Launch {
            program: program.clone(),
            source,
        })?;

        let io_error = |source: io::Error| InvocationError::Io {
            program: program.clone(),
            source,
        };

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io_error(io::Error::other("stdin was not captured")))?;

        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let result = stdin.write_all(prompt.as_bytes());
                drop(stdin);
                result
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(io_error)?;

        match written {
            Ok(Ok(())) => {}
            // The process may exit without consuming all of its input; its
            // exit status decides the outcome.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("inference process closed stdin before reading the whole prompt");
            }
            Ok(Err(e)) => return Err(io_error(e)),
            Err(_) => return Err(io_error(io::Error::other("prompt writer thread panicked"))),
        }

        let result = InvocationOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
            duration: start.elapsed(),
        };

        tracing::debug!(
            exit_code = ?result.exit_code,
            stdout_bytes = result.stdout.len(),
            stderr_bytes = result.stderr.len(),
            elapsed_ms = result.duration.as_millis() as u64,
            "inference process exited"
        );

        Ok(result)
    }
}

impl ModelInvoker for ProcessInvoker {
    fn invoke(&self, prompt: &str, model: &str) -> Result<String, InvocationError> {
        self.run(prompt, model)?.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_runs_ollama() {
        let invoker = ProcessInvoker::default();
        assert_eq!(
            invoker.command_line("llama3.2:1b").unwrap(),
            vec!["ollama", "run", "llama3.2:1b"]
        );
    }

    #[test]
    fn model_with_spaces_stays_one_argument() {
        let invoker = ProcessInvoker::new("ollama run {model}");
        let args = invoker.command_line("my model").unwrap();
        assert_eq!(args, vec!["ollama", "run", "my model"]);
        assert_eq!(invoker.describe("my model").unwrap(), "ollama run 'my model'");
    }

    #[test]
    fn quoted_words_are_respected() {
        let invoker = ProcessInvoker::new("\"/opt/my tools/ollama\" run {model} --nowordwrap");
        let args = invoker.command_line("phi3").unwrap();
        assert_eq!(args, vec!["/opt/my tools/ollama", "run", "phi3", "--nowordwrap"]);
    }

    #[test]
    fn unparseable_command_is_command_error() {
        let invoker = ProcessInvoker::new("ollama run \"{model}");
        let err = invoker.command_line("phi3").unwrap_err();
        assert!(matches!(err, InvocationError::Command(_)));
    }

    #[test]
    fn empty_command_is_command_error() {
        let invoker = ProcessInvoker::new("   ");
        let err = invoker.invoke("prompt", "phi3").unwrap_err();
        assert!(matches!(err, InvocationError::Command(_)));
    }

    #[test]
    fn undefined_variable_is_command_error() {
        let invoker = ProcessInvoker::new("ollama run {model_name}");
        let err = invoker.command_line("phi3").unwrap_err();
        assert!(err.to_string().contains("undefined variable 'model_name'"));
    }

    #[test]
    fn missing_binary_is_launch_error() {
        let invoker = ProcessInvoker::new("nonexistent_inference_binary_xyz_123 run {model}");
        let err = invoker.invoke("hello", "phi3").unwrap_err();
        match err {
            InvocationError::Launch { program, .. } => {
                assert_eq!(program, "nonexistent_inference_binary_xyz_123");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn from_config_uses_command_and_environment() {
        let config = Config::from_yaml(
            "command: \"llm -m {model}\"\nenvironment:\n  LLM_KEY: secret\n",
        )
        .unwrap();
        let invoker = ProcessInvoker::from_config(&config);
        assert_eq!(
            invoker.command_line("gpt").unwrap(),
            vec!["llm", "-m", "gpt"]
        );
        assert_eq!(
            invoker.environment.get("LLM_KEY").map(String::as_str),
            Some("secret")
        );
    }

    #[cfg(unix)]
    mod stub_process {
        use super::*;
        use crate::test_support::{stub_invoker, write_stub_model};
        use tempfile::TempDir;

        #[test]
        fn prompt_arrives_on_stdin_and_response_on_stdout() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "echo-model", "cat");
            let invoker = stub_invoker(&stub);

            let response = invoker.invoke("def f(): return 1/0\n", "phi3").unwrap();
            assert_eq!(response, "def f(): return 1/0\n");
        }

        #[test]
        fn stub_receives_run_and_model_arguments() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "args-model", "printf '%s|%s' \"$1\" \"$2\"");
            let invoker = stub_invoker(&stub);

            let response = invoker.invoke("ignored", "llama3.2:1b").unwrap();
            assert_eq!(response, "run|llama3.2:1b");
        }

        #[test]
        fn nonzero_exit_surfaces_stderr() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(
                temp_dir.path(),
                "failing-model",
                "cat > /dev/null\necho \"Error: pull model manifest: file does not exist\" >&2\nexit 1",
            );
            let invoker = stub_invoker(&stub);

            let output = invoker.run("prompt", "nope").unwrap();
            assert!(!output.is_success());
            assert_eq!(output.exit_code, Some(1));

            let err = invoker.invoke("prompt", "nope").unwrap_err();
            match err {
                InvocationError::Failed { exit_code, stderr } => {
                    assert_eq!(exit_code, Some(1));
                    assert!(stderr.contains("pull model manifest"));
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }

        #[test]
        fn invalid_utf8_output_is_decoded_permissively() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "binary-model", "printf 'ok \\377 done'");
            let invoker = stub_invoker(&stub);

            let response = invoker.invoke("prompt", "phi3").unwrap();
            assert_eq!(response, "ok \u{FFFD} done");
        }

        #[test]
        fn silent_success_is_empty_response() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "silent-model", "cat > /dev/null");
            let invoker = stub_invoker(&stub);

            let err = invoker.invoke("prompt", "phi3").unwrap_err();
            assert!(matches!(err, InvocationError::EmptyResponse));
        }

        #[test]
        fn large_prompt_does_not_deadlock() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "echo-model", "cat");
            let invoker = stub_invoker(&stub);

            let prompt = "0123456789abcdef".repeat(1 << 16);
            let response = invoker.invoke(&prompt, "phi3").unwrap();
            assert_eq!(response.len(), prompt.len());
            assert_eq!(response, prompt);
        }

        #[test]
        fn unread_stdin_does_not_fail_successful_run() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "deaf-model", "echo hello");
            let invoker = stub_invoker(&stub);

            let prompt = "x".repeat(1 << 20);
            let response = invoker.invoke(&prompt, "phi3").unwrap();
            assert_eq!(response, "hello\n");
        }

        #[test]
        fn environment_is_passed_to_process() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(
                temp_dir.path(),
                "env-model",
                "printf '%s' \"$SMARTCODE_STUB_VAR\"",
            );
            let invoker = stub_invoker(&stub).with_environment(BTreeMap::from([(
                "SMARTCODE_STUB_VAR".to_string(),
                "from-config".to_string(),
            )]));

            let response = invoker.invoke("prompt", "phi3").unwrap();
            assert_eq!(response, "from-config");
        }

        #[test]
        fn records_duration() {
            let temp_dir = TempDir::new().unwrap();
            let stub = write_stub_model(temp_dir.path(), "echo-model", "cat");
            let invoker = stub_invoker(&stub);

            let output = invoker.run("hi", "phi3").unwrap();
            assert!(output.is_success());
            assert_eq!(output.stdout, b"hi");
            assert!(output.stderr.is_empty());
            assert!(output.duration.as_nanos() > 0);
        }
    }
}
