use crate::branches::Branch;
use std::path::{Path, PathBuf};

/// extension of the artifacts written by the fetch jobs
pub const DATA_EXTENSION: &str = "hdf5";

/// deterministic artifact path for one branch
///
/// Start and duration are truncated toward zero, so two branches whose
/// starts differ only in fractional seconds map to the same file. That is a
/// known sharp edge of the naming scheme and pinned by a test, do not paper
/// over it here.
pub fn output_path(data_dir: &Path, prefix: &str, branch: &Branch) -> PathBuf {
    let fname = format!(
        "{prefix}-{}-{}.{DATA_EXTENSION}",
        branch.start as i64, branch.duration as i64
    );

    data_dir.join(fname)
}

/// derive the per branch log file from the shared job log
///
/// `-{start}-{duration}` is inserted in front of the extension, where only
/// the last dot of the file name counts as the extension separator. A dot
/// free name gets the suffix appended directly.
pub fn branch_log_path(job_log: &Path, branch: &Branch) -> PathBuf {
    let name = job_log
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!("-{}-{}", branch.start as i64, branch.duration as i64);

    let fname = match name.rfind('.') {
        Some(dot) => format!("{}{}{}", &name[..dot], suffix, &name[dot..]),
        None => format!("{name}{suffix}"),
    };

    job_log.with_file_name(fname)
}
