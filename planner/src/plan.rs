use crate::branches::build_branch_map;
use crate::command;
use crate::condor::{self, SubmitDescription, SubmitOptions};
use crate::config::{ConfigurationError, FetchConfig};
use crate::paths;
use crate::sandbox::SandboxSpec;
use crate::segments::{parse_segments, ParseError, Segment};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// everything the scheduler needs for one branch
#[derive(Debug, Clone)]
pub struct PlannedJob {
    pub branch: usize,
    pub start: f64,
    pub duration: f64,
    pub output: PathBuf,
    pub log: Option<PathBuf>,
    pub command: Vec<String>,
    pub submit: SubmitDescription,
}

/// validated plan for one availability window
///
/// Construction performs all filesystem and image checks eagerly, after
/// `new` returns the remaining work is deterministic string assembly.
#[derive(Debug)]
pub struct FetchPlan {
    config: FetchConfig,
    sandbox: SandboxSpec,
    segments_file: PathBuf,
    job_log: Option<PathBuf>,
    condor_log_dir: PathBuf,
    job_file_dir: PathBuf,
}

impl FetchPlan {
    pub fn new(config: FetchConfig) -> Result<Self, ConfigurationError> {
        create_dir(&config.data_dir)?;

        let segments_file = match &config.segments_file {
            Some(path) => path.clone(),
            None => config.data_dir.join("segments.txt"),
        };

        let job_log = match &config.job_log {
            Some(path) if path.is_relative() => {
                let log_dir = config.log_dir.as_ref().ok_or(ConfigurationError::MissingLogDir)?;
                create_dir(log_dir)?;

                Some(log_dir.join(path))
            }
            Some(path) => Some(path.clone()),
            None => None,
        };

        // scheduler side log and job file directories
        let condor_log_dir = config.condor.condor_directory.join("logs");
        let job_file_dir = config.condor.condor_directory.join("jobs");
        create_dir(&condor_log_dir)?;
        create_dir(&job_file_dir)?;

        let sandbox = SandboxSpec::new(
            config.image.clone(),
            &config.container_root,
            config.dev,
            config.gpus.clone(),
        )?;

        Ok(Self {
            config,
            sandbox,
            segments_file,
            job_log,
            condor_log_dir,
            job_file_dir,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn sandbox(&self) -> &SandboxSpec {
        &self.sandbox
    }

    pub fn segments_file(&self) -> &Path {
        &self.segments_file
    }

    /// command of the upstream query job that writes the segment table
    pub fn query_command(&self) -> Vec<String> {
        let log = self
            .job_log
            .as_ref()
            .map(|job_log| job_log.with_file_name("query.log"));
        let args = command::query_args(
            self.config.start,
            self.config.end,
            &self.segments_file,
            &self.config.ifo,
            &self.config.flags,
            self.config.min_duration,
        );

        command::job_command(&self.config.exec, log.as_deref(), "query", args)
    }

    /// read and parse the segment table written by the query job
    pub fn load_segments(&self) -> Result<Vec<Segment>, PlanError> {
        let table = fs::read_to_string(&self.segments_file).map_err(|source| {
            ConfigurationError::UnreadableFile {
                path: self.segments_file.clone(),
                source,
            }
        })?;

        Ok(parse_segments(&table)?)
    }

    /// derive one job per branch of the availability window
    pub fn plan(&self, segments: &[Segment]) -> Vec<PlannedJob> {
        let branch_map = build_branch_map(segments, self.config.max_duration);
        let options = self.submit_options();

        debug!(
            "Planned {} branches over {} segments",
            branch_map.len(),
            segments.len()
        );

        branch_map
            .into_iter()
            .map(|(index, branch)| {
                let output = paths::output_path(&self.config.data_dir, &self.config.prefix, &branch);
                let log = self
                    .job_log
                    .as_ref()
                    .map(|job_log| paths::branch_log_path(job_log, &branch));
                let args = command::fetch_args(
                    &branch,
                    self.config.sample_rate,
                    &self.config.prefix,
                    &self.config.data_dir,
                    &self.config.channels,
                );

                let command =
                    command::job_command(&self.config.exec, log.as_deref(), "fetch", args);
                let submit = condor::job_description(&options, &self.condor_log_dir, &command);

                PlannedJob {
                    branch: index,
                    start: branch.start,
                    duration: branch.duration,
                    output,
                    log,
                    command,
                    submit,
                }
            })
            .collect()
    }

    /// write one submit file per planned job into the condor job directory
    pub fn write_submit_files(&self, jobs: &[PlannedJob]) -> Result<Vec<PathBuf>, ConfigurationError> {
        let mut written = Vec::with_capacity(jobs.len());

        for job in jobs {
            let path = self
                .job_file_dir
                .join(format!("{}-{}.sub", self.config.job_name, job.branch));
            fs::write(&path, job.submit.render()).map_err(|source| {
                ConfigurationError::WriteFailed {
                    path: path.clone(),
                    source,
                }
            })?;
            written.push(path);
        }

        info!("Wrote {} submit files to {:?}", written.len(), self.job_file_dir);

        Ok(written)
    }

    fn submit_options(&self) -> SubmitOptions {
        SubmitOptions {
            job_name: self.config.job_name.clone(),
            request_disk: self.config.condor.request_disk.clone(),
            request_memory: self.config.condor.request_memory.clone(),
            accounting_group: self.config.condor.accounting_group.clone(),
            accounting_group_user: self.config.condor.accounting_group_user.clone(),
        }
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigurationError> {
    fs::create_dir_all(path).map_err(|source| ConfigurationError::CreateDirectory {
        path: path.to_owned(),
        source,
    })
}
