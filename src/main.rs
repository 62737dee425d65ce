use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use futures::future;
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use appsync_schema_converter::{convert_schemas, PrintOptions};

mod output;

const DEFAULT_CONFIG_PATH: &'static str = "appsync-schema.json";
const DEFAULT_PROFILE_NAME: &'static str = "default";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Cli::parse();
    let config = read_config_from_args(&args)?;

    let options = resolve_options(&args, config.as_ref());
    let source = resolve_source(&args, config.as_ref())?;
    let output = args.output
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.output.clone()))
        .map(PathBuf::from);

    let documents = match source {
        InputSource::Files { paths } => read_files(paths).await?,
        InputSource::Pipe => vec![read_pipe()?]
    };
    info!(documents = documents.len(), "converting schema");

    let converted = convert_schemas(&documents, &options)?;

    match output {
        Some(path) => {
            let result = output::overwrite_on_diff(&path, &format!("{}\n", converted))?;
            result.log(&path);
        }
        None => println!("{}", converted)
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(name = "appsync-schema-converter", about = "Converts GraphQL SDL into an AWS AppSync schema")]
struct Cli {
    #[arg(short, long, help = "Path to config file from working directory, default: appsync-schema.json")]
    config: Option<String>,
    #[arg(short, long, help = "Profile used from config file, default: default")]
    profile: Option<String>,
    #[arg(short, long = "file", help = "SDL file to convert, repeat to merge several, override config file")]
    files: Vec<String>,
    #[arg(short, long, help = "Output file, override config file, default: stdout")]
    output: Option<String>,
    #[arg(long, help = "Print descriptions as # comments")]
    comment_descriptions: bool,
    #[arg(long, help = "Keep directives on object types and fields")]
    include_directives: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConverterJsonConfig {
    profiles: Option<HashMap<String, ConfigProfile>>,
    output: Option<String>,
    #[serde(flatten)]
    options: PrintOptions,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "method")]
enum ConfigProfile {
    Files { paths: Vec<String> },
    Pipe
}

#[derive(Debug, PartialEq)]
enum InputSource {
    Files { paths: Vec<PathBuf> },
    Pipe,
}

fn read_config_from_args(args: &Cli) -> Result<Option<ConverterJsonConfig>> {
    match &args.config {
        Some(path) => match read_config(Path::new(path))? {
            Some(config) => Ok(Some(config)),
            None => bail!("Unable to locate config file {}", path)
        },
        None => read_config(Path::new(DEFAULT_CONFIG_PATH))
    }
}

fn read_config(path: &Path) -> Result<Option<ConverterJsonConfig>> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    let mut config_content = String::new();
    std::fs::File::open(path)
        .and_then(|mut file| file.read_to_string(&mut config_content))
        .with_context(|| format!("Unable to read config file {}", path.display()))?;
    parse_config(&config_content)
        .with_context(|| format!("Invalid config file {}", path.display()))
        .map(Some)
}

fn parse_config(content: &str) -> Result<ConverterJsonConfig> {
    let deserializer = &mut serde_json::Deserializer::from_str(content);
    Ok(serde_path_to_error::deserialize(deserializer)?)
}

fn resolve_options(args: &Cli, config: Option<&ConverterJsonConfig>) -> PrintOptions {
    let configured = config.map(|c| c.options).unwrap_or_default();
    PrintOptions {
        comment_descriptions: args.comment_descriptions || configured.comment_descriptions,
        include_directives: args.include_directives || configured.include_directives
    }
}

fn resolve_source(args: &Cli, config: Option<&ConverterJsonConfig>) -> Result<InputSource> {
    if !args.files.is_empty() {
        return Ok(InputSource::Files { paths: args.files.iter().map(PathBuf::from).collect() });
    }

    let profile_name = args.profile.as_deref().unwrap_or(DEFAULT_PROFILE_NAME);
    let profile = config
        .and_then(|c| c.profiles.as_ref())
        .and_then(|profiles| profiles.get(profile_name));

    match profile {
        Some(ConfigProfile::Files { paths }) => Ok(InputSource::Files { paths: paths.iter().map(PathBuf::from).collect() }),
        Some(ConfigProfile::Pipe) => Ok(InputSource::Pipe),
        None if args.profile.is_some() => bail!("No profile named \"{}\"", profile_name),
        None => Ok(InputSource::Pipe)
    }
}

async fn read_files(paths: Vec<PathBuf>) -> Result<Vec<String>> {
    let reads = paths.iter().map(|path| async move {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Unable to read schema file {}", path.display()))
    });
    future::try_join_all(reads).await
}

fn read_pipe() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).context("Unable to read schema from stdin")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("appsync-schema-converter").chain(args.iter().copied()))
    }

    fn config(json: &str) -> ConverterJsonConfig {
        match parse_config(json) {
            Ok(config) => config,
            Err(error) => panic!("config did not parse: {:#}", error)
        }
    }

    #[test]
    fn parses_config_with_profiles() {
        let config = config(
            r#"{
                "output": "appsync.graphql",
                "commentDescriptions": true,
                "profiles": {
                    "default": { "method": "Files", "paths": ["base.graphql", "ext.graphql"] },
                    "stdin": { "method": "Pipe" }
                }
            }"#
        );
        assert_eq!(config.output.as_deref(), Some("appsync.graphql"));
        assert!(config.options.comment_descriptions);
        assert!(!config.options.include_directives);
        let profiles = config.profiles.unwrap_or_default();
        assert_eq!(profiles.get("stdin"), Some(&ConfigProfile::Pipe));
    }

    #[test]
    fn config_errors_name_the_failing_path() {
        let error = match parse_config(r#"{ "profiles": { "default": { "method": "Url" } } }"#) {
            Ok(_) => panic!("unknown method accepted"),
            Err(error) => error
        };
        assert!(error.to_string().starts_with("profiles.default"), "{}", error);
    }

    #[test]
    fn flags_override_config() {
        let config = config(r#"{ "profiles": { "default": { "method": "Files", "paths": ["a.graphql"] } } }"#);
        let args = cli(&["-f", "b.graphql", "--file", "c.graphql", "--include-directives"]);
        assert_eq!(
            resolve_source(&args, Some(&config)).ok(),
            Some(InputSource::Files { paths: vec![PathBuf::from("b.graphql"), PathBuf::from("c.graphql")] })
        );
        assert_eq!(
            resolve_options(&args, Some(&config)),
            PrintOptions { comment_descriptions: false, include_directives: true }
        );

        let args = cli(&[]);
        assert_eq!(
            resolve_source(&args, Some(&config)).ok(),
            Some(InputSource::Files { paths: vec![PathBuf::from("a.graphql")] })
        );
    }

    #[test]
    fn falls_back_to_stdin() {
        assert_eq!(resolve_source(&cli(&[]), None).ok(), Some(InputSource::Pipe));
        assert!(resolve_source(&cli(&["--profile", "missing"]), None).is_err());
    }
}
