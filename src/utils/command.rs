use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{DistroHubError, Result};

/// Captured output of a finished child process.
#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// stdout followed by stderr, the way a shell `2>&1` capture reads.
    pub fn combined(&self) -> String {
        let mut output = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&self.stderr);
        }
        output
    }
}

/// Renders an argv as a single line for logs and messages.
pub fn display_command(command: &str, args: &[&str]) -> String {
    let mut line = command.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

pub fn run_command_with_timeout(
    command: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CommandOutput> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| DistroHubError::command_spawn(command, err.to_string()))?;

    let stdout_rx = child.stdout.take().map(spawn_reader);
    let stderr_rx = child.stderr.take().map(spawn_reader);

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(timed_out(command, timeout));
                }
            }
            Err(err) => return Err(DistroHubError::command_spawn(command, err.to_string())),
        }
        thread::sleep(Duration::from_millis(10));
    };

    // A backgrounded grandchild can hold the pipes open after the child exits.
    let deadline = start + timeout;
    let stdout = collect(stdout_rx, deadline).ok_or_else(|| timed_out(command, timeout))?;
    let stderr = collect(stderr_rx, deadline).ok_or_else(|| timed_out(command, timeout))?;

    Ok(CommandOutput {
        success: status.success(),
        code: status.code(),
        stdout,
        stderr,
    })
}

fn timed_out(command: &str, timeout: Duration) -> DistroHubError {
    DistroHubError::command_timeout(command, timeout.as_millis() as u64)
}

fn spawn_reader<R: Read + Send + 'static>(pipe: R) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut reader = io::BufReader::new(pipe);
        let mut bytes = Vec::new();
        let _ = reader.read_to_end(&mut bytes);
        let _ = tx.send(String::from_utf8_lossy(&bytes).into_owned());
    });
    rx
}

/// Waits for a reader until `deadline`. `None` means the pipe is still open.
fn collect(rx: Option<mpsc::Receiver<String>>, deadline: Instant) -> Option<String> {
    let Some(rx) = rx else {
        return Some(String::new());
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(output) => Some(output),
        Err(mpsc::RecvTimeoutError::Timeout) => None,
        Err(mpsc::RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_stderr() {
        let output = run_command_with_timeout(
            "sh",
            &["-c", "printf out; printf err >&2"],
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
        assert_eq!(output.combined(), "out\nerr");
    }

    #[test]
    fn reports_exit_code() {
        let output =
            run_command_with_timeout("sh", &["-c", "exit 3"], Duration::from_secs(5)).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = run_command_with_timeout(
            "distrohub-definitely-missing-binary",
            &[],
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, DistroHubError::CommandSpawn { .. }));
    }

    #[test]
    fn kills_child_after_timeout() {
        let start = Instant::now();
        let err = run_command_with_timeout("sleep", &["5"], Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, DistroHubError::CommandTimeout { timeout_ms: 100, .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn background_grandchild_holding_pipe_times_out() {
        let start = Instant::now();
        let err = run_command_with_timeout(
            "sh",
            &["-c", "sleep 4 & echo hi"],
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(err, DistroHubError::CommandTimeout { timeout_ms: 200, .. }));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn display_command_quotes_spaced_args() {
        assert_eq!(
            display_command("distrobox-create", &["--name", "my box", "--yes"]),
            "distrobox-create --name \"my box\" --yes"
        );
    }
}
