use std::env;
use std::path::PathBuf;

use blast_stream::RemoteConfig;

pub const DEFAULT_BUFFER_UNIT: usize = 1 << 20;

#[derive(Debug)]
pub struct Config {
    pub input: InputSpec,
    pub buffer_unit: usize,
    pub max_records: u64,
    pub min_residues: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub enum InputSpec {
    Local(PathBuf),
    Remote { config: RemoteConfig, object: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Csv,
    Parquet,
}

impl Config {
    pub fn from_args() -> Result<Self, String> {
        Self::parse(env::args().skip(1))
    }

    fn parse<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut target: Option<String> = None;
        let mut remote: Option<(String, u16)> = None;
        let mut realm: Option<String> = None;
        let mut user: Option<String> = None;
        let mut password: Option<String> = None;
        let mut buffer_unit = DEFAULT_BUFFER_UNIT;
        let mut max_records = 0u64;
        let mut min_residues = 0usize;
        let mut format = OutputFormat::Plain;
        let mut output: Option<PathBuf> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--remote" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --remote"))?;
                    remote = Some(parse_host_port(&value)?);
                }
                "--realm" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --realm"))?;
                    realm = Some(value);
                }
                "--user" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --user"))?;
                    user = Some(value);
                }
                "--password" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --password"))?;
                    password = Some(value);
                }
                "--buffer-size" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --buffer-size"))?
                        .parse::<usize>()
                        .map_err(|_| usage("--buffer-size must be a non-negative integer"))?;
                    buffer_unit = value;
                }
                "--max-records" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --max-records"))?
                        .parse::<u64>()
                        .map_err(|_| usage("--max-records must be a non-negative integer"))?;
                    max_records = value;
                }
                "--min-residues" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --min-residues"))?
                        .parse::<usize>()
                        .map_err(|_| usage("--min-residues must be a non-negative integer"))?;
                    min_residues = value;
                }
                "--format" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --format"))?;
                    format = parse_format(&value)?;
                }
                "--output" => {
                    let value = args
                        .next()
                        .ok_or_else(|| usage("missing value for --output"))?;
                    output = Some(PathBuf::from(value));
                }
                "--help" | "-h" => return Err(usage("")),
                other if other.starts_with("--") => {
                    return Err(usage(&format!("unknown argument '{other}'")));
                }
                other => {
                    if target.is_some() {
                        return Err(usage("too many positional arguments"));
                    }
                    target = Some(other.to_string());
                }
            }
        }

        let target = target.ok_or_else(|| usage("missing <input> argument"))?;

        let input = match remote {
            Some((host, port)) => {
                if buffer_unit == 0 {
                    return Err(usage("--buffer-size 0 is only valid for local files"));
                }
                let realm = realm.ok_or_else(|| usage("--remote requires --realm"))?;
                let user = user.ok_or_else(|| usage("--remote requires --user"))?;
                let password = password.ok_or_else(|| usage("--remote requires --password"))?;
                InputSpec::Remote {
                    config: RemoteConfig {
                        host,
                        port,
                        realm,
                        user,
                        password,
                    },
                    object: target,
                }
            }
            None => {
                if realm.is_some() || user.is_some() || password.is_some() {
                    return Err(usage("--realm/--user/--password require --remote"));
                }
                InputSpec::Local(PathBuf::from(target))
            }
        };

        if format == OutputFormat::Parquet && output.is_none() {
            return Err(usage("--output is required when --format parquet"));
        }

        Ok(Self {
            input,
            buffer_unit,
            max_records,
            min_residues,
            format,
            output,
        })
    }
}

fn parse_host_port(value: &str) -> Result<(String, u16), String> {
    let (host, port) = value
        .rsplit_once(':')
        .ok_or_else(|| usage("--remote expects <host>:<port>"))?;
    if host.is_empty() {
        return Err(usage("--remote expects <host>:<port>"));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| usage("--remote port must be an integer"))?;
    Ok((host.to_string(), port))
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value {
        "plain" => Ok(OutputFormat::Plain),
        "csv" => Ok(OutputFormat::Csv),
        "parquet" => Ok(OutputFormat::Parquet),
        _ => Err(usage("--format must be 'plain', 'csv' or 'parquet'")),
    }
}

fn usage(reason: &str) -> String {
    let mut msg = String::new();
    if !reason.is_empty() {
        msg.push_str(reason);
        msg.push('\n');
    }
    msg.push_str("Usage: blast-stream <input> [options]\n");
    msg.push_str("  <input>              FASTA path, or object name with --remote\n");
    msg.push_str("Options:\n");
    msg.push_str("  --remote <HOST:PORT> Read the input from the remote object store\n");
    msg.push_str("  --realm <NAME>       Store realm holding the object (with --remote)\n");
    msg.push_str("  --user <NAME>        Store account (with --remote)\n");
    msg.push_str("  --password <PW>      Store password (with --remote)\n");
    msg.push_str("  --buffer-size <N>    Line buffer unit in bytes; 0 = native mode,\n");
    msg.push_str("                       local files only (default 1048576)\n");
    msg.push_str("  --max-records <N>    Stop after N records, 0 = unbounded (default 0)\n");
    msg.push_str("  --min-residues <N>   Skip sequences shorter than N residues (default 0)\n");
    msg.push_str("  --format <plain|csv|parquet>  Output format (default plain)\n");
    msg.push_str("  --output <PATH>      Destination file (required for parquet)\n");
    msg.push_str("  --help               Show this message\n");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, String> {
        Config::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn local_input_with_defaults() {
        let config = parse(&["est.fa"]).unwrap();
        assert!(matches!(config.input, InputSpec::Local(_)));
        assert_eq!(config.buffer_unit, DEFAULT_BUFFER_UNIT);
        assert_eq!(config.max_records, 0);
        assert_eq!(config.format, OutputFormat::Plain);
    }

    #[test]
    fn remote_input_collects_credentials() {
        let config = parse(&[
            "db/human.fa",
            "--remote",
            "store.example:5544",
            "--realm",
            "est",
            "--user",
            "reader",
            "--password",
            "secret",
        ])
        .unwrap();
        match config.input {
            InputSpec::Remote { config, object } => {
                assert_eq!(config.host, "store.example");
                assert_eq!(config.port, 5544);
                assert_eq!(config.realm, "est");
                assert_eq!(object, "db/human.fa");
            }
            other => panic!("expected remote input, got {other:?}"),
        }
    }

    #[test]
    fn remote_rejects_native_mode() {
        let err = parse(&[
            "db/human.fa",
            "--remote",
            "store.example:5544",
            "--realm",
            "est",
            "--user",
            "reader",
            "--password",
            "secret",
            "--buffer-size",
            "0",
        ])
        .unwrap_err();
        assert!(err.contains("--buffer-size 0"));
    }

    #[test]
    fn parquet_requires_an_output_path() {
        let err = parse(&["est.fa", "--format", "parquet"]).unwrap_err();
        assert!(err.contains("--output"));
    }

    #[test]
    fn credentials_without_remote_are_rejected() {
        let err = parse(&["est.fa", "--user", "reader"]).unwrap_err();
        assert!(err.contains("--remote"));
    }
}
