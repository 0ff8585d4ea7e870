use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::utils::{display_command, run_command_with_timeout};

/// Marker `distrobox-create` prints once the container exists.
const CREATED_MARKER: &str = "successfully created";

#[derive(Clone, Debug)]
pub struct CreateSettings {
    pub command: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateRequest {
    pub name: String,
    pub image: String,
    pub nvidia: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateRejection {
    NoDistro,
    EmptyName,
}

impl CreateRejection {
    pub fn message(self) -> &'static str {
        match self {
            CreateRejection::NoDistro => "Please choose a distro first.",
            CreateRejection::EmptyName => "Please enter a name first.",
        }
    }
}

impl CreateRequest {
    pub fn new(name: &str, image: Option<&str>, nvidia: bool) -> Result<Self, CreateRejection> {
        let image = image.ok_or(CreateRejection::NoDistro)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CreateRejection::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            image: image.to_string(),
            nvidia,
        })
    }

    pub fn args(&self) -> Vec<&str> {
        let mut args = vec!["--image", self.image.as_str(), "--name", self.name.as_str()];
        if self.nvidia {
            args.push("--nvidia");
        }
        args.push("--yes");
        args
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateOutcomeKind {
    Created,
    AlreadyExists,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateOutcome {
    pub name: String,
    pub kind: CreateOutcomeKind,
}

impl CreateOutcome {
    /// Classifies the combined output of a create run.
    pub fn classify(name: &str, output: &str) -> Self {
        let exists_marker = format!("Distrobox named '{name}' already exists.");
        let kind = if output.contains(&exists_marker) {
            CreateOutcomeKind::AlreadyExists
        } else if output.contains(CREATED_MARKER) {
            CreateOutcomeKind::Created
        } else {
            CreateOutcomeKind::Failed
        };
        Self {
            name: name.to_string(),
            kind,
        }
    }

    pub fn failed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: CreateOutcomeKind::Failed,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == CreateOutcomeKind::Failed
    }

    pub fn message(&self) -> String {
        let name = &self.name;
        match self.kind {
            CreateOutcomeKind::AlreadyExists => format!(
                "Distrobox named '{name}' already exists.\nTo enter, run:\n\ndistrobox enter {name}"
            ),
            CreateOutcomeKind::Created => {
                format!("Distrobox named '{name}' successfully created.")
            }
            CreateOutcomeKind::Failed => format!("Failed to create Distrobox named '{name}'."),
        }
    }
}

/// Runs the create command to completion and classifies the result.
pub fn run_create(settings: &CreateSettings, request: &CreateRequest) -> CreateOutcome {
    let args = request.args();
    tracing::info!(
        "Executing command: {}",
        display_command(&settings.command, &args)
    );

    let output = match run_command_with_timeout(&settings.command, &args, settings.timeout) {
        Ok(output) => output.combined(),
        Err(err) => {
            tracing::error!(name = %request.name, "create failed: {err}");
            return CreateOutcome::failed(&request.name);
        }
    };

    let outcome = CreateOutcome::classify(&request.name, &output);
    match outcome.kind {
        CreateOutcomeKind::AlreadyExists => {
            tracing::info!(name = %request.name, "container already exists");
        }
        CreateOutcomeKind::Created => {
            tracing::info!(name = %request.name, output = %output, "container created");
        }
        CreateOutcomeKind::Failed => {
            tracing::error!(name = %request.name, output = %output, "create failed");
        }
    }
    outcome
}

/// Runs the create command on a worker thread.
pub fn start_create(
    settings: CreateSettings,
    request: CreateRequest,
) -> mpsc::Receiver<CreateOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = run_create(&settings, &request);
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_distro_then_name() {
        assert_eq!(
            CreateRequest::new("", None, true),
            Err(CreateRejection::NoDistro)
        );
        assert_eq!(
            CreateRequest::new("   ", Some("ubuntu:latest"), true),
            Err(CreateRejection::EmptyName)
        );
        let request = CreateRequest::new(" dev ", Some("ubuntu:latest"), true).unwrap();
        assert_eq!(request.name, "dev");
    }

    #[test]
    fn args_follow_distrobox_create() {
        let request = CreateRequest::new("dev", Some("debian:latest"), true).unwrap();
        assert_eq!(
            request.args(),
            ["--image", "debian:latest", "--name", "dev", "--nvidia", "--yes"]
        );

        let request = CreateRequest::new("dev", Some("debian:latest"), false).unwrap();
        assert!(!request.args().contains(&"--nvidia"));
    }

    #[test]
    fn classify_already_exists() {
        let outcome = CreateOutcome::classify(
            "dev",
            "Distrobox named 'dev' already exists.\nTo enter, run:\n",
        );
        assert_eq!(outcome.kind, CreateOutcomeKind::AlreadyExists);
        assert_eq!(
            outcome.message(),
            "Distrobox named 'dev' already exists.\nTo enter, run:\n\ndistrobox enter dev"
        );
    }

    #[test]
    fn classify_created() {
        let output = "Creating 'dev' using image ubuntu:latest\t [ OK ]\n\
                      Distrobox 'dev' successfully created.\n";
        let outcome = CreateOutcome::classify("dev", output);
        assert_eq!(outcome.kind, CreateOutcomeKind::Created);
        assert_eq!(
            outcome.message(),
            "Distrobox named 'dev' successfully created."
        );
        assert!(!outcome.is_error());
    }

    #[test]
    fn already_exists_wins_over_created_marker() {
        let output = "Distrobox named 'dev' already exists.\nsuccessfully created";
        assert_eq!(
            CreateOutcome::classify("dev", output).kind,
            CreateOutcomeKind::AlreadyExists
        );
    }

    #[test]
    fn exists_marker_for_other_name_is_not_a_match() {
        let output = "Distrobox named 'other' already exists.";
        let outcome = CreateOutcome::classify("dev", output);
        assert_eq!(outcome.kind, CreateOutcomeKind::Failed);
        assert!(outcome.is_error());
        assert_eq!(outcome.message(), "Failed to create Distrobox named 'dev'.");
    }

    #[test]
    fn missing_binary_is_failure() {
        let settings = CreateSettings {
            command: "distrohub-definitely-missing-binary".to_string(),
            timeout: Duration::from_secs(1),
        };
        let request = CreateRequest::new("dev", Some("ubuntu:latest"), true).unwrap();
        let rx = start_create(settings, request);
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, CreateOutcome::failed("dev"));
    }
}
