use crate::branches::Branch;
use itertools::Itertools;
use std::path::Path;

/// argument list of the per branch fetch job
///
/// Flag names and the bracketed channel literal are fixed by the downstream
/// tool, change nothing here without changing that side first.
pub fn fetch_args(
    branch: &Branch,
    sample_rate: f64,
    prefix: &str,
    data_dir: &Path,
    channels: &[String],
) -> Vec<String> {
    let start = branch.start as i64;
    let duration = branch.duration as i64;

    vec![
        String::from("--start"),
        start.to_string(),
        String::from("--end"),
        (start + duration).to_string(),
        String::from("--sample-rate"),
        sample_rate.to_string(),
        String::from("--prefix"),
        prefix.to_owned(),
        String::from("--output-directory"),
        data_dir.to_string_lossy().into_owned(),
        String::from("--channels"),
        format!("[{}]", channels.iter().join(",")),
    ]
}

/// argument list of the availability query that writes the segment table
pub fn query_args(
    start: f64,
    end: f64,
    output_file: &Path,
    ifo: &str,
    flags: &[String],
    min_duration: f64,
) -> Vec<String> {
    let mut args = vec![
        String::from("--start"),
        start.to_string(),
        String::from("--end"),
        end.to_string(),
        String::from("--output-file"),
        output_file.to_string_lossy().into_owned(),
    ];

    for flag in flags {
        args.push(format!("--flags+={ifo}:{flag}"));
    }
    if min_duration > 0.0 {
        args.push(format!("--min_duration={min_duration}"));
    }

    args
}

/// full command line: configured program, optional log redirection, the
/// job type dispatch token, then the job args
///
/// The downstream tool selects its subcommand from the token, so it has to
/// sit after the `--log-file` pair and before the flags. The token is
/// supplied explicitly by the caller, never derived from a type name.
pub fn job_command(
    exec: &[String],
    log_file: Option<&Path>,
    job_type: &str,
    args: Vec<String>,
) -> Vec<String> {
    let mut command = exec.to_vec();

    if let Some(log_file) = log_file {
        command.push(String::from("--log-file"));
        command.push(log_file.to_string_lossy().into_owned());
    }
    command.push(job_type.to_owned());
    command.extend(args);

    command
}
