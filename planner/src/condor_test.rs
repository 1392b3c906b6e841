use crate::condor::{environment_blob, job_description_with_env, SubmitOptions};
use std::path::Path;

fn options() -> SubmitOptions {
    SubmitOptions {
        job_name: String::from("fetch"),
        request_disk: String::from("1 GB"),
        request_memory: String::from("2 GB"),
        accounting_group: String::from("ligo.dev.o4"),
        accounting_group_user: String::from("albert.einstein"),
    }
}

fn command() -> Vec<String> {
    vec![
        String::from("/opt/env/bin/python"),
        String::from("/opt/remora/data/data"),
        String::from("fetch"),
        String::from("--start"),
        String::from("1000"),
    ]
}

fn fake_env(var: &str) -> Option<String> {
    match var {
        "X509_USER_PROXY" => Some(String::from("/tmp/x509")),
        "NDSSERVER" => Some(String::from("nds.example.org")),
        "PATH" => Some(String::from("/usr/bin")),
        _ => None,
    }
}

#[test]
pub fn blob_omits_unset_variables() {
    let blob = environment_blob(&["X509_USER_PROXY", "KRB5_KTNAME", "NDSSERVER"], fake_env);

    // KRB5_KTNAME is unset and must not show up, not even empty
    assert_eq!(
        blob,
        "\"X509_USER_PROXY=/tmp/x509 NDSSERVER=nds.example.org PATH=/usr/bin\""
    );
}

#[test]
pub fn blob_always_carries_a_path_passthrough() {
    let blob = environment_blob(&[], |var| (var == "PATH").then(|| String::from("/bin")));

    assert_eq!(blob, "\"PATH=/bin\"");
}

#[test]
pub fn description_fields_are_ordered_and_verbatim() {
    let description =
        job_description_with_env(&options(), Path::new("/condor/logs"), &command(), fake_env);

    let fields: Vec<_> = description
        .fields()
        .iter()
        .map(|(field, _)| field.as_str())
        .collect();
    assert_eq!(
        fields,
        vec![
            "executable",
            "arguments",
            "environment",
            "request_memory",
            "request_disk",
            "accounting_group",
            "accounting_group_user",
            "log",
            "output",
            "error",
        ]
    );

    let value = |name: &str| {
        description
            .fields()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .unwrap()
    };
    assert_eq!(value("executable"), "/opt/env/bin/python");
    assert_eq!(value("arguments"), "/opt/remora/data/data fetch --start 1000");
    assert_eq!(value("request_memory"), "2 GB");
    assert_eq!(value("accounting_group_user"), "albert.einstein");
}

#[test]
pub fn scheduler_paths_keep_the_cluster_placeholder() {
    let description =
        job_description_with_env(&options(), Path::new("/condor/logs"), &command(), fake_env);

    let value = |name: &str| {
        description
            .fields()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
            .unwrap()
    };
    assert_eq!(value("log"), "/condor/logs/fetch-$(Cluster).log");
    assert_eq!(value("output"), "/condor/logs/fetch-$(Cluster).out");
    assert_eq!(value("error"), "/condor/logs/fetch-$(Cluster).err");
}

#[test]
pub fn renders_to_a_submittable_file() {
    let description =
        job_description_with_env(&options(), Path::new("/condor/logs"), &command(), fake_env);
    let rendered = description.render();

    // the file stands on its own: command, resources and a queue statement
    assert!(rendered.contains("executable = /opt/env/bin/python\n"));
    assert!(rendered.contains("arguments = /opt/remora/data/data fetch --start 1000\n"));
    assert!(rendered.contains("request_disk = 1 GB\n"));
    assert!(rendered.contains("accounting_group = ligo.dev.o4\n"));
    assert!(rendered.ends_with("queue\n"));
}
