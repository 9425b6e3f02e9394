use std::collections::BTreeMap;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

const URL_PLACEHOLDER: &str = "%URL%";

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("no opener configured for platform {0}")]
    Unsupported(String),
    #[error("opener command for {0} is empty")]
    EmptyCommand(String),
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Failed { command: String, status: String },
    #[error("browser launch failed: {0}")]
    Browser(#[source] std::io::Error),
}

pub trait LinkLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LauncherMode {
    #[default]
    Command,
    Browser,
}

impl LauncherMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "command" => Some(LauncherMode::Command),
            "browser" => Some(LauncherMode::Browser),
            _ => None,
        }
    }
}

/// Platform name (as in `std::env::consts::OS`) to opener command.
///
/// Each command is a program followed by its arguments; `%URL%` marks where
/// the link goes, otherwise it is appended.
pub type OpenerTable = BTreeMap<String, Vec<String>>;

pub fn default_openers() -> OpenerTable {
    let xdg = vec!["xdg-open".to_string(), URL_PLACEHOLDER.to_string()];
    let mut table = OpenerTable::new();
    for platform in ["linux", "freebsd", "openbsd", "netbsd"] {
        table.insert(platform.to_string(), xdg.clone());
    }
    table.insert(
        "macos".to_string(),
        vec!["open".to_string(), URL_PLACEHOLDER.to_string()],
    );
    table.insert(
        "windows".to_string(),
        vec![
            "rundll32".to_string(),
            "url.dll,FileProtocolHandler".to_string(),
            URL_PLACEHOLDER.to_string(),
        ],
    );
    table
}

pub fn build_args(template: &[String], url: &str) -> Vec<String> {
    let mut substituted = false;
    let mut args: Vec<String> = template
        .iter()
        .map(|part| {
            if part.contains(URL_PLACEHOLDER) {
                substituted = true;
                part.replace(URL_PLACEHOLDER, url)
            } else {
                part.clone()
            }
        })
        .collect();
    if !substituted {
        args.push(url.to_string());
    }
    args
}

/// Opens links by running the opener configured for the current platform.
pub struct CommandLauncher {
    platform: String,
    openers: OpenerTable,
}

impl CommandLauncher {
    pub fn new(openers: OpenerTable) -> Self {
        Self::for_platform(std::env::consts::OS, openers)
    }

    pub fn for_platform(platform: &str, openers: OpenerTable) -> Self {
        Self {
            platform: platform.to_string(),
            openers,
        }
    }

    pub fn command_for(&self, url: &str) -> Result<Vec<String>, LaunchError> {
        let template = self
            .openers
            .get(&self.platform)
            .ok_or_else(|| LaunchError::Unsupported(self.platform.clone()))?;
        let args = build_args(template, url);
        if args.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(LaunchError::EmptyCommand(self.platform.clone()));
        }
        Ok(args)
    }
}

impl LinkLauncher for CommandLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        let args = self.command_for(url)?;
        let program = &args[0];
        log::debug!("opening {url} with {program}");

        let status = Command::new(program)
            .args(&args[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| LaunchError::Spawn {
                command: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(LaunchError::Failed {
                command: program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Opens links through the `webbrowser` crate's own platform detection.
#[derive(Debug, Default)]
pub struct BrowserLauncher;

impl LinkLauncher for BrowserLauncher {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        webbrowser::open(url).map_err(LaunchError::Browser)
    }
}

pub fn from_mode(mode: LauncherMode, openers: OpenerTable) -> Box<dyn LinkLauncher> {
    match mode {
        LauncherMode::Command => Box::new(CommandLauncher::new(openers)),
        LauncherMode::Browser => Box::new(BrowserLauncher),
    }
}
