use std::env;
use std::fmt::Write;
use std::path::Path;

/// credential and service location variables forwarded into every job
pub const DATAFIND_ENV_VARS: [&str; 5] = [
    "KRB5_KTNAME",
    "X509_USER_PROXY",
    "GWDATAFIND_SERVER",
    "NDSSERVER",
    "LIGO_USERNAME",
];

/// accounting and resource fields for one submit description
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// logical name of the job in scheduler logs, set by the caller
    pub job_name: String,
    pub request_disk: String,
    pub request_memory: String,
    pub accounting_group: String,
    pub accounting_group_user: String,
}

/// ordered field set handed to the batch scheduler
///
/// Values are taken verbatim, this side never interprets scheduler syntax.
#[derive(Debug, Clone, Default)]
pub struct SubmitDescription {
    fields: Vec<(String, String)>,
}

impl SubmitDescription {
    pub fn push(&mut self, field: &str, value: impl Into<String>) {
        self.fields.push((field.to_owned(), value.into()));
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// render to a complete, queue terminated submit file describing one
    /// job, ready for the external submission mechanism
    pub fn render(&self) -> String {
        let mut rendered = String::new();
        for (field, value) in &self.fields {
            // writing to a String cannot fail
            let _ = writeln!(rendered, "{field} = {value}");
        }
        rendered.push_str("queue\n");

        rendered
    }
}

/// build the submit description for one branch of the workflow
///
/// The planned command is split into the scheduler's `executable` and
/// `arguments` fields so the rendered file stands on its own. The three
/// scheduler side files keep a `$(Cluster)` placeholder that the scheduler
/// substitutes at dispatch time.
pub fn job_description(
    options: &SubmitOptions,
    log_dir: &Path,
    command: &[String],
) -> SubmitDescription {
    job_description_with_env(options, log_dir, command, |var| env::var(var).ok())
}

pub(crate) fn job_description_with_env<F>(
    options: &SubmitOptions,
    log_dir: &Path,
    command: &[String],
    get: F,
) -> SubmitDescription
where
    F: Fn(&str) -> Option<String>,
{
    let mut description = SubmitDescription::default();

    if let Some((program, args)) = command.split_first() {
        description.push("executable", program.clone());
        description.push("arguments", args.join(" "));
    }
    description.push("environment", environment_blob(&DATAFIND_ENV_VARS, &get));
    description.push("request_memory", &options.request_memory);
    description.push("request_disk", &options.request_disk);
    description.push("accounting_group", &options.accounting_group);
    description.push("accounting_group_user", &options.accounting_group_user);

    for (field, extension) in [("log", "log"), ("output", "out"), ("error", "err")] {
        let path = log_dir.join(format!("{}-$(Cluster).{extension}", options.job_name));
        description.push(field, path.to_string_lossy());
    }

    description
}

/// quoted blob of `VAR=value` assignments for every allow listed variable
/// that is currently set, always terminated by a PATH passthrough
///
/// Unset variables are omitted entirely instead of being emitted empty.
pub(crate) fn environment_blob<F>(allow: &[&str], get: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut blob = String::from('"');
    for var in allow {
        if let Some(value) = get(var) {
            let _ = write!(blob, "{var}={value} ");
        }
    }
    let _ = write!(blob, "PATH={}\"", get("PATH").unwrap_or_default());

    blob
}
