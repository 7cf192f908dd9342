use std::path::Path;

use gridstart_core::config::AppConfig;
use gridstart_core::error::CliError;
use gridstart_core::postscript::join_arguments;
use gridstart_core::{Job, Result as CoreResult};
use gridstart_plugins::{PostScriptFactory, PostScriptKind};

use crate::commands::cli::{ConstructArgs, OutputFormat};

/// Handle construct command
pub fn handle_construct(args: ConstructArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let (job, _) = construct(&args, cfg)?;
    println!("{}", render(&job, &args.key, args.format)?);
    Ok(0)
}

/// Loads the job and installs its postscript. Returns the job and whether a
/// postscript was installed.
pub fn construct(args: &ConstructArgs, cfg: &AppConfig) -> Result<(Job, bool), CliError> {
    let mut job = load_job(&args.job)?;

    let mut properties = cfg.properties.clone();
    for assignment in &args.set {
        properties.apply_assignment(assignment)?;
    }

    let submit_dir = args
        .submit_dir
        .clone()
        .or_else(|| cfg.postscript.submit_dir.clone())
        .unwrap_or_else(|| {
            args.job
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| ".".to_string())
        });

    let default_kind = parse_kind(cfg.postscript.kind.as_deref())?;
    let forced_kind = parse_kind(args.kind.as_deref())?;

    let mut factory = PostScriptFactory::new(properties, submit_dir)
        .with_default_kind(default_kind)
        .with_path(args.path.clone().or_else(|| cfg.postscript.path.clone()));

    let constructed = factory.enable_as(&mut job, forced_kind, &args.key)?;
    if !constructed {
        tracing::warn!(job = %job.name, "no postscript installed");
    }
    Ok((job, constructed))
}

pub fn load_job(path: &Path) -> Result<Job, CliError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let job = if is_json {
        serde_json::from_str::<Job>(&content)
            .map_err(|e| CliError::Parse(format!("{}: {e}", path.display())))?
    } else {
        toml::from_str::<Job>(&content)
            .map_err(|e| CliError::Parse(format!("{}: {e}", path.display())))?
    };
    Ok(job)
}

pub fn render(job: &Job, key: &str, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(job)
            .map_err(|e| CliError::Parse(format!("serialize job {}: {e}", job.name))),
        OutputFormat::Text => {
            let mut lines: Vec<String> = job
                .dagman
                .iter()
                .map(|(k, v)| format!("{k} = {v}"))
                .collect();
            if let Some(path) = job.dagman.get(key) {
                let arguments = job
                    .dagman
                    .get(gridstart_core::namespace::dagman::POST_SCRIPT_ARGUMENTS_KEY)
                    .unwrap_or_default();
                lines.push(String::new());
                lines.push(join_arguments([path, arguments]));
            }
            Ok(lines.join("\n"))
        }
    }
}

fn parse_kind(kind: Option<&str>) -> CoreResult<Option<PostScriptKind>> {
    kind.map(str::parse::<PostScriptKind>).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::PathBuf;

    fn args(job: PathBuf) -> ConstructArgs {
        ConstructArgs {
            job,
            kind: None,
            path: Some("/opt/bin/exitcode".to_string()),
            submit_dir: Some("/sub/dir".to_string()),
            key: "POST".to_string(),
            set: vec![
                "pegasus.exitcode.debug=true".to_string(),
                "pegasus.properties.submit=/sub/dir/pegasus.properties".to_string(),
            ],
            format: OutputFormat::Text,
        }
    }

    fn job_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_construct_from_toml() {
        let file = job_file(
            ".toml",
            r#"
name = "job1"

[condor]
output = "/sub/dir/job1.out"

[dagman]
"POST.ARGUMENTS" = "-f"
"#,
        );

        let (job, constructed) = construct(&args(file.path().to_path_buf()), &AppConfig::default())
            .unwrap();
        assert!(constructed);

        let text = render(&job, "POST", OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "POST.ARGUMENTS = -Dpegasus.log.default=job1.exit.log -Dpegasus.verbose=5 \
             -Dpegasus.user.properties=/sub/dir/pegasus.properties -f\n\
             OUTPUT = /sub/dir/job1.out\n\
             POST = /opt/bin/exitcode\n\
             \n\
             /opt/bin/exitcode -Dpegasus.log.default=job1.exit.log -Dpegasus.verbose=5 \
             -Dpegasus.user.properties=/sub/dir/pegasus.properties -f"
        );
    }

    #[test]
    fn test_construct_from_json_with_none_kind() {
        let file = job_file(".json", r#"{"name":"job2","dagman":{"POST":"none"}}"#);
        let (job, constructed) = construct(&args(file.path().to_path_buf()), &AppConfig::default())
            .unwrap();

        assert!(!constructed);
        assert!(job.dagman.is_empty());
        assert_eq!(render(&job, "POST", OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let file = job_file(".toml", "name = \"job3\"\n");
        let mut a = args(file.path().to_path_buf());
        a.kind = Some("sometimes".to_string());

        assert!(matches!(
            construct(&a, &AppConfig::default()),
            Err(CliError::PostScript(_))
        ));
    }

    #[test]
    fn test_malformed_job_is_parse_error() {
        let file = job_file(".toml", "name = [");
        assert!(matches!(load_job(file.path()), Err(CliError::Parse(_))));
    }
}
