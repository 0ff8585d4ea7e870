use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::{ListSnapshot, parse_list_output};
use crate::error::{DistroHubError, Result};
use crate::utils::{display_command, run_command_with_timeout};

#[derive(Clone, Debug)]
pub struct ListSettings {
    pub command: String,
    pub args: Vec<String>,
    pub interval: Duration,
    pub timeout: Duration,
}

/// Handle to the background list poller.
///
/// Dropping it stops the thread after its current run.
pub struct ListMonitor {
    rx: mpsc::Receiver<ListSnapshot>,
    wake: mpsc::Sender<()>,
}

impl ListMonitor {
    /// Latest snapshot published since the last call, if any.
    pub fn latest(&self) -> Option<ListSnapshot> {
        self.rx.try_iter().last()
    }

    /// Asks the poller to run again without waiting for the interval.
    pub fn request_refresh(&self) {
        let _ = self.wake.send(());
    }
}

pub fn start_list_monitor(settings: ListSettings) -> ListMonitor {
    spawn_list_monitor(settings).0
}

pub(crate) fn spawn_list_monitor(settings: ListSettings) -> (ListMonitor, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel();
    let (wake, wake_rx) = mpsc::channel::<()>();
    let handle = thread::spawn(move || {
        let mut last_error: Option<String> = None;
        loop {
            let snapshot = poll_list(&settings);
            if snapshot.error != last_error {
                match snapshot.error.as_deref() {
                    Some(err) => tracing::warn!("container list failed: {err}"),
                    None if last_error.is_some() => tracing::info!("container list recovered"),
                    None => {}
                }
                last_error = snapshot.error.clone();
            }
            if tx.send(snapshot).is_err() {
                break;
            }
            match wake_rx.recv_timeout(settings.interval) {
                Ok(()) => {
                    // Collapse a burst of refresh requests into one run.
                    while wake_rx.try_recv().is_ok() {}
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("container list monitor stopped");
    });
    (ListMonitor { rx, wake }, handle)
}

/// Runs the list command once.
pub fn poll_list(settings: &ListSettings) -> ListSnapshot {
    match fetch_list_output(settings) {
        Ok(output) => ListSnapshot::ok(parse_list_output(&output)),
        Err(err) => ListSnapshot::failed(err.to_string()),
    }
}

fn fetch_list_output(settings: &ListSettings) -> Result<String> {
    let args = settings.args.iter().map(String::as_str).collect::<Vec<_>>();
    tracing::trace!("Executing command: {}", display_command(&settings.command, &args));
    let output = run_command_with_timeout(&settings.command, &args, settings.timeout)?;
    if !output.success {
        return Err(DistroHubError::command_failed(&settings.command, output.code));
    }
    Ok(output.stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell_settings(script: &str, interval: Duration) -> ListSettings {
        ListSettings {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            interval,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn poll_list_parses_rows() {
        let settings = shell_settings(
            "printf 'ID | NAME | STATUS | IMAGE\\n1 | dev | Up 1 minute | ubuntu:latest\\n'",
            Duration::from_secs(60),
        );
        let snapshot = poll_list(&settings);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.rows[0].name, "dev");
    }

    #[test]
    fn poll_list_reports_failure() {
        let settings = shell_settings("exit 1", Duration::from_secs(60));
        let snapshot = poll_list(&settings);
        assert!(snapshot.rows.is_empty());
        assert!(snapshot.error.unwrap().contains("status 1"));

        let settings = ListSettings {
            command: "distrohub-definitely-missing-binary".to_string(),
            ..shell_settings("", Duration::from_secs(60))
        };
        assert!(poll_list(&settings).error.is_some());
    }

    #[test]
    fn monitor_publishes_and_wakes() {
        let settings = shell_settings("printf 'ID | NAME\\n1 | a\\n'", Duration::from_secs(60));
        let monitor = start_list_monitor(settings);
        let first = monitor.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.rows.len(), 1);

        monitor.request_refresh();
        let second = monitor.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(second.taken_at >= first.taken_at);
    }

    #[test]
    fn dropping_monitor_stops_thread() {
        let runs = tempfile::NamedTempFile::new().unwrap();
        let script = format!("echo run >> '{}'; printf 'ID\\n1\\n'", runs.path().display());
        let (monitor, handle) =
            spawn_list_monitor(shell_settings(&script, Duration::from_millis(20)));
        monitor.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        drop(monitor);

        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = done_tx.send(handle.join().is_ok());
        });
        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)), Ok(true));

        let count_runs = || std::fs::read_to_string(runs.path()).unwrap().lines().count();
        let after_join = count_runs();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(count_runs(), after_join);
    }

    #[test]
    fn latest_keeps_newest_snapshot() {
        let settings = shell_settings("printf 'ID\\n1\\n'", Duration::from_millis(10));
        let monitor = start_list_monitor(settings);
        thread::sleep(Duration::from_millis(300));
        let snapshot = monitor.latest().unwrap();
        assert_eq!(snapshot.rows.len(), 1);
    }
}
