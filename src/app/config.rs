use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::data::{CreateSettings, Distro, DistroCatalog, ListSettings};
use crate::error::{DistroHubError, Result};

const MIN_TICK_MS: u64 = 50;
const DEFAULT_TICK_MS: u64 = 250;
const MIN_POLL_MS: u64 = 250;
const DEFAULT_POLL_MS: u64 = 2000;
const DEFAULT_LIST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 900;

/// Runtime configuration
pub struct Config {
    pub tick_rate: Duration,
    pub list: ListSettings,
    pub create: CreateSettings,
    pub nvidia: bool,
    pub distros: DistroCatalog,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

/// File-based configuration (TOML)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    general: GeneralConfig,
    commands: CommandsConfig,
    logging: LoggingConfig,
    distros: Vec<Distro>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GeneralConfig {
    tick_rate_ms: u64,
    poll_interval_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_MS,
            poll_interval_ms: DEFAULT_POLL_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CommandsConfig {
    list: String,
    list_args: Vec<String>,
    list_timeout_ms: u64,
    create: String,
    create_timeout_secs: u64,
    nvidia: bool,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            list: "distrobox-list".to_string(),
            list_args: vec!["--no-color".to_string()],
            list_timeout_ms: DEFAULT_LIST_TIMEOUT_MS,
            create: "distrobox-create".to_string(),
            create_timeout_secs: DEFAULT_CREATE_TIMEOUT_SECS,
            nvidia: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    level: String,
    directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Default, PartialEq, Eq)]
struct ArgOverrides {
    config_path: Option<PathBuf>,
    tick_ms: Option<u64>,
    poll_ms: Option<u64>,
    no_nvidia: bool,
    log_level: Option<String>,
}

impl Config {
    pub fn from_args() -> std::result::Result<Self, String> {
        let overrides = parse_args(env::args().skip(1))?;
        let file_config = match overrides.config_path.as_deref() {
            Some(path) => load_config_file(path),
            None => load_default_config_file(),
        }
        .map_err(|err| err.to_string())?;

        Ok(Self::build(file_config, overrides))
    }

    fn build(file_config: FileConfig, overrides: ArgOverrides) -> Self {
        let FileConfig {
            general,
            commands,
            logging,
            distros,
        } = file_config;

        let tick_ms = normalize_tick_ms(overrides.tick_ms.unwrap_or(general.tick_rate_ms));
        let poll_ms =
            normalize_poll_ms(overrides.poll_ms.unwrap_or(general.poll_interval_ms));

        Self {
            tick_rate: Duration::from_millis(tick_ms),
            list: ListSettings {
                command: commands.list,
                args: commands.list_args,
                interval: Duration::from_millis(poll_ms),
                timeout: Duration::from_millis(commands.list_timeout_ms.max(1)),
            },
            create: CreateSettings {
                command: commands.create,
                timeout: Duration::from_secs(commands.create_timeout_secs.max(1)),
            },
            nvidia: commands.nvidia && !overrides.no_nvidia,
            distros: DistroCatalog::from_entries(distros),
            log_level: overrides.log_level.unwrap_or(logging.level),
            log_dir: logging.directory,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::build(FileConfig::default(), ArgOverrides::default())
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> std::result::Result<ArgOverrides, String> {
    let mut overrides = ArgOverrides::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(usage()),
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "Missing value for --config\n\n".to_string() + &usage())?;
                overrides.config_path = Some(PathBuf::from(value));
            }
            "--tick-ms" => {
                let value = args
                    .next()
                    .ok_or_else(|| "Missing value for --tick-ms\n\n".to_string() + &usage())?;
                overrides.tick_ms = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid tick value: {value}\n\n{}", usage()))?,
                );
            }
            "--poll-ms" => {
                let value = args
                    .next()
                    .ok_or_else(|| "Missing value for --poll-ms\n\n".to_string() + &usage())?;
                overrides.poll_ms = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid poll value: {value}\n\n{}", usage()))?,
                );
            }
            "--no-nvidia" => overrides.no_nvidia = true,
            "--log-level" => {
                let value = args
                    .next()
                    .ok_or_else(|| "Missing value for --log-level\n\n".to_string() + &usage())?;
                overrides.log_level = Some(value);
            }
            _ => return Err(format!("Unknown argument: {arg}\n\n{}", usage())),
        }
    }
    Ok(overrides)
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("distrohub").join("config.toml"))
}

fn load_default_config_file() -> Result<FileConfig> {
    let Some(path) = config_path() else {
        return Ok(FileConfig::default());
    };
    match load_config_file(&path) {
        Err(DistroHubError::ConfigNotFound { .. }) => Ok(FileConfig::default()),
        other => other,
    }
}

fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DistroHubError::config_not_found(path.to_path_buf()),
        _ => DistroHubError::config_invalid(path.to_path_buf(), err.to_string()),
    })?;
    toml::from_str(&content)
        .map_err(|err| DistroHubError::config_invalid(path.to_path_buf(), err.to_string()))
}

fn usage() -> String {
    let config_location = config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/distrohub/config.toml".to_string());

    [
        "Usage: distrohub [options]",
        "",
        "Options:",
        "  --config <path>      Read configuration from <path>",
        "  --poll-ms <ms>       Container list refresh interval (default: 2000, min: 250)",
        "  --tick-ms <ms>       UI tick interval (default: 250, min: 50)",
        "  --no-nvidia          Create containers without --nvidia",
        "  --log-level <level>  error | warn | info | debug | trace",
        "  -h, --help           Show this help",
        "",
        &format!("Config file: {config_location}"),
        "",
        "Example config.toml:",
        "  [general]",
        "  poll_interval_ms = 2000",
        "",
        "  [commands]",
        "  list = \"distrobox-list\"",
        "  create = \"distrobox-create\"",
        "  nvidia = true",
        "",
        "  [[distros]]",
        "  name = \"Fedora\"",
        "  image = \"fedora:latest\"",
    ]
    .join("\n")
}

fn normalize_tick_ms(value: u64) -> u64 {
    value.max(MIN_TICK_MS)
}

fn normalize_poll_ms(value: u64) -> u64 {
    value.max(MIN_POLL_MS)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn normalize_clamps_to_min() {
        assert_eq!(normalize_tick_ms(0), MIN_TICK_MS);
        assert_eq!(normalize_tick_ms(MIN_TICK_MS + 5), MIN_TICK_MS + 5);
        assert_eq!(normalize_poll_ms(10), MIN_POLL_MS);
        assert_eq!(normalize_poll_ms(5_000), 5_000);
    }

    #[test]
    fn file_config_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.general.tick_rate_ms, DEFAULT_TICK_MS);
        assert_eq!(config.general.poll_interval_ms, DEFAULT_POLL_MS);
        assert_eq!(config.commands.list, "distrobox-list");
        assert_eq!(config.commands.list_args, ["--no-color"]);
        assert_eq!(config.commands.create, "distrobox-create");
        assert!(config.commands.nvidia);
        assert!(config.distros.is_empty());
    }

    #[test]
    fn file_config_partial() {
        let config: FileConfig = toml::from_str(
            r#"
            [commands]
            nvidia = false

            [[distros]]
            name = "Fedora"
            image = "fedora:40"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.poll_interval_ms, DEFAULT_POLL_MS);
        assert_eq!(config.commands.list, "distrobox-list");
        assert!(!config.commands.nvidia);
        assert_eq!(config.distros, vec![Distro::new("Fedora", "fedora:40")]);
    }

    #[test]
    fn default_config_matches_distrobox() {
        let config = Config::default();
        assert_eq!(config.list.command, "distrobox-list");
        assert_eq!(config.list.interval, Duration::from_millis(DEFAULT_POLL_MS));
        assert_eq!(config.create.command, "distrobox-create");
        assert!(config.nvidia);
        assert_eq!(config.distros, DistroCatalog::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn parse_args_reads_flags() {
        let overrides = parse_args(args(&[
            "--poll-ms",
            "500",
            "--no-nvidia",
            "--config",
            "/tmp/dh.toml",
            "--log-level",
            "debug",
        ]))
        .unwrap();
        assert_eq!(
            overrides,
            ArgOverrides {
                config_path: Some(PathBuf::from("/tmp/dh.toml")),
                tick_ms: None,
                poll_ms: Some(500),
                no_nvidia: true,
                log_level: Some("debug".to_string()),
            }
        );
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        assert!(parse_args(args(&["--poll-ms"])).unwrap_err().contains("Missing value"));
        assert!(parse_args(args(&["--poll-ms", "soon"])).unwrap_err().contains("Invalid poll"));
        assert!(parse_args(args(&["--bogus"])).unwrap_err().contains("Unknown argument"));
        assert!(parse_args(args(&["-h"])).unwrap_err().starts_with("Usage:"));
    }

    #[test]
    fn args_override_file() {
        let file_config: FileConfig = toml::from_str(
            r#"
            [general]
            poll_interval_ms = 4000
            [logging]
            level = "warn"
            "#,
        )
        .unwrap();
        let overrides = ArgOverrides {
            poll_ms: Some(100),
            no_nvidia: true,
            ..ArgOverrides::default()
        };
        let config = Config::build(file_config, overrides);
        assert_eq!(config.list.interval, Duration::from_millis(MIN_POLL_MS));
        assert!(!config.nvidia);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn load_config_file_reports_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            load_config_file(&missing),
            Err(DistroHubError::ConfigNotFound { .. })
        ));

        let broken = dir.path().join("broken.toml");
        let mut file = fs::File::create(&broken).unwrap();
        writeln!(file, "[general\npoll_interval_ms = ").unwrap();
        assert!(matches!(
            load_config_file(&broken),
            Err(DistroHubError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn load_config_file_reads_distros() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[[distros]]\nname = \"Arch\"\nimage = \"archlinux:latest\"\n",
        )
        .unwrap();
        let config = Config::build(load_config_file(&path).unwrap(), ArgOverrides::default());
        assert_eq!(config.distros.image_for("Arch"), Some("archlinux:latest"));
        assert_eq!(config.distros.len(), 1);
    }
}
