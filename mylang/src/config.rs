//! Command line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use mylang_eval::EvalConfig;

/// Runs a script, or starts an interactive prompt when no script is given.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "mylang", version, about, long_about = None)]
pub struct Config {
    /// Script to run.
    pub script: Option<PathBuf>,

    /// Maximum nesting of function calls.
    #[arg(
        long,
        env = "MYLANG_MAX_CALL_DEPTH",
        default_value_t = EvalConfig::default().max_call_depth,
        value_parser = parse_call_depth,
    )]
    pub max_call_depth: usize,

    /// Log filter, e.g. `debug` or `mylang_eval=trace`.
    #[arg(long, env = "MYLANG_LOG", default_value = "warn")]
    pub log: String,
}

impl Config {
    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            max_call_depth: self.max_call_depth,
        }
    }
}

fn parse_call_depth(text: &str) -> Result<usize, String> {
    match text.trim().parse() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(format!("'{}' is not a positive integer", text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_script() {
        let config = Config::try_parse_from(["mylang", "prog.my"]).unwrap();
        assert_eq!(config.script, Some(PathBuf::from("prog.my")));

        let config = Config::try_parse_from(["mylang"]).unwrap();
        assert_eq!(config.script, None);
    }

    #[test]
    fn test_extra_argument() {
        let err = Config::try_parse_from(["mylang", "a.my", "b.my"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "mylang",
            "--max-call-depth",
            "50",
            "--log",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.eval_config().max_call_depth, 50);
        assert_eq!(config.log, "debug");
    }

    #[test]
    fn test_environment_variables() {
        let command = Config::command();
        let env = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().into_owned())
        };
        assert_eq!(env("max_call_depth").as_deref(), Some("MYLANG_MAX_CALL_DEPTH"));
        assert_eq!(env("log").as_deref(), Some("MYLANG_LOG"));
    }

    #[test]
    fn test_invalid_call_depth() {
        assert!(Config::try_parse_from(["mylang", "--max-call-depth", "0"]).is_err());
        assert!(Config::try_parse_from(["mylang", "--max-call-depth", "lots"]).is_err());
        assert_eq!(parse_call_depth(" 7 "), Ok(7));
    }
}
