use crate::condor::DATAFIND_ENV_VARS;
use crate::config::ConfigurationError;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// shared data mounts bound into every job when present on the host
pub static DATA_MOUNTS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    ["/cvmfs", "/hdfs", "/ligo", "/archive"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
});

/// in-container location of the repository for dev tasks
pub const REPO_MOUNT: &str = "/opt/remora";

pub const GPU_ENV_VAR: &str = "CUDA_VISIBLE_DEVICES";

/// execution environment of one sandboxed job
#[derive(Debug, Clone)]
pub struct SandboxSpec {
    image: PathBuf,
    dev: bool,
    gpus: String,
}

impl SandboxSpec {
    /// resolve the image against the container root and fail before any job
    /// is planned when it does not exist
    pub fn new(
        image: PathBuf,
        container_root: &Path,
        dev: bool,
        gpus: String,
    ) -> Result<Self, ConfigurationError> {
        let image = if image.is_absolute() {
            image
        } else {
            container_root.join(image)
        };

        if !image.exists() {
            return Err(ConfigurationError::ImageNotFound(image));
        }

        Ok(Self { image, dev, gpus })
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    /// host -> container bindings for one job launch
    ///
    /// Mount availability can change between graph construction and launch,
    /// so existence is checked here and not at config time. This is a read
    /// only query and safe to call concurrently for many branches.
    pub fn volumes(&self, repo_root: &Path) -> BTreeMap<PathBuf, PathBuf> {
        self.volumes_from(DATA_MOUNTS.as_slice(), repo_root)
    }

    pub(crate) fn volumes_from(
        &self,
        mounts: &[PathBuf],
        repo_root: &Path,
    ) -> BTreeMap<PathBuf, PathBuf> {
        let mut volumes = BTreeMap::new();

        for mount in mounts {
            if mount.exists() {
                volumes.insert(mount.clone(), mount.clone());
            } else {
                debug!(mount = ?mount, "Skipping data mount missing on this host");
            }
        }

        // dev tasks see the live repository instead of the image copy
        if self.dev {
            volumes.insert(repo_root.to_path_buf(), PathBuf::from(REPO_MOUNT));
        }

        volumes
    }

    /// environment overrides for the sandboxed process: GPU visibility plus
    /// the forwarded credential variables
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.environment_from(|var| env::var(var).ok())
    }

    pub(crate) fn environment_from<F>(&self, get: F) -> BTreeMap<String, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut environment = BTreeMap::new();

        if !self.gpus.is_empty() {
            environment.insert(GPU_ENV_VAR.to_owned(), self.gpus.clone());
        }

        for var in DATAFIND_ENV_VARS {
            if let Some(value) = get(var) {
                environment.insert(var.to_owned(), value);
            }
        }

        environment
    }
}
