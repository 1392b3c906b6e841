use serde::{Deserialize, Serialize};
use std::{env, fs::File, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Could not find path to container image {0}")]
    ImageNotFound(PathBuf),
    #[error("Failed to parse planner config")]
    InvalidConfig(#[from] serde_yaml::Error),
    #[error("Failed to create directory {path}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("A relative job_log requires log_dir to be set")]
    MissingLogDir,
    #[error("Failed to read {path}")]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// everything needed to turn an availability window into condor fetch jobs
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// logical job name, required so identity never leaks out of a type name
    pub job_name: String,

    // sandbox
    pub image: PathBuf,
    #[serde(default)]
    pub dev: bool,
    #[serde(default)]
    pub gpus: String,
    #[serde(default = "default_container_root")]
    pub container_root: PathBuf,

    // availability window handed to the query job
    pub start: f64,
    pub end: f64,
    pub sample_rate: f64,
    #[serde(default)]
    pub min_duration: f64,
    /// branch cap in seconds, absent or non positive means one branch per
    /// segment
    #[serde(default)]
    pub max_duration: Option<f64>,

    // artifact naming
    pub data_dir: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_ifo")]
    pub ifo: String,
    #[serde(default = "default_flags")]
    pub flags: Vec<String>,
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub segments_file: Option<PathBuf>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub job_log: Option<PathBuf>,

    /// program prefix of the in-container fetch tool
    #[serde(default = "default_exec")]
    pub exec: Vec<String>,

    pub condor: CondorConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct CondorConfig {
    pub condor_directory: PathBuf,
    #[serde(default = "default_accounting_group")]
    pub accounting_group: String,
    #[serde(default = "default_accounting_group_user")]
    pub accounting_group_user: String,
    #[serde(default = "default_request")]
    pub request_disk: String,
    #[serde(default = "default_request")]
    pub request_memory: String,
}

impl FetchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let file = File::open(path).map_err(|source| ConfigurationError::UnreadableFile {
            path: path.to_owned(),
            source,
        })?;

        Ok(serde_yaml::from_reader(file)?)
    }
}

fn default_container_root() -> PathBuf {
    PathBuf::from(env::var("REMORA_CONTAINER_ROOT").unwrap_or_default())
}

fn default_accounting_group() -> String {
    env::var("LIGO_GROUP").unwrap_or_default()
}

fn default_accounting_group_user() -> String {
    env::var("LIGO_USER").unwrap_or_default()
}

fn default_request() -> String {
    String::from("1 GB")
}

fn default_prefix() -> String {
    String::from("remora")
}

fn default_ifo() -> String {
    String::from("H1")
}

fn default_flags() -> Vec<String> {
    vec![String::from("DCS-ANALYSIS_READY_C01:1")]
}

fn default_channels() -> Vec<String> {
    vec![String::from("H1:GDS-CALIB_STRAIN")]
}

fn default_exec() -> Vec<String> {
    vec![
        String::from("/opt/env/bin/python"),
        String::from("/opt/remora/data/data"),
    ]
}
