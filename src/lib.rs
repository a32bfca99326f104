// cargo watch -x 'fmt' -x 'test'

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod output;
pub mod parser;
pub mod processing;

use std::error::Error;

use config::{Config, OutputFormat};

pub use batch::{parse_batch, read_batch_file, run_batch, BatchOutcome, BatchRequest};
pub use dispatch::{convert, Action, ConversionResult, Ipv4Summary, Ipv6Summary};
pub use error::{ConvertError, Grammar};

/// Run what `config` asks for and return the text to print.
pub fn run(config: &Config) -> Result<String, Box<dyn Error>> {
    if let Some(batch_file) = &config.batch {
        let outcomes = run_batch(read_batch_file(batch_file)?);
        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        if failed > 0 {
            log::warn!("{failed} of {} batch entries failed", outcomes.len());
        }
        return match config.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcomes)?),
            OutputFormat::Text => Ok(output::render_batch_text(&outcomes)),
        };
    }

    let input = config.input.as_deref().unwrap_or_default();
    let result = convert(config.action, input, config.extra.as_deref())?;
    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Ok(output::render_text(&result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["ip-helper-tool"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_single_text() {
        let out = run(&config(&["-a", "compress_v6", "2001:0db8:0000::0001"])).unwrap();
        assert_eq!(out, "2001:db8::1");
    }

    #[test]
    fn test_run_single_json() {
        let out = run(&config(&["-a", "subnet_info", "-f", "json", "192.0.2.0/30"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["num_addresses"], "4");
        assert_eq!(json["broadcast"], "192.0.2.3");
    }

    #[test]
    fn test_run_single_error() {
        let err = run(&config(&["-a", "expand_v6", "1.2.3.4"])).unwrap_err();
        assert!(err.to_string().starts_with("invalid IPv6 address '1.2.3.4'"));
    }

    #[test]
    fn test_run_batch_json() {
        let out = run(&config(&[
            "--batch",
            "src/tests/test_data/batch_01.json",
            "-f",
            "json",
        ]))
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0]["action"], "auto");
        assert!(entries[5]["error"].is_string());
        assert!(entries[5].get("result").is_none());
    }

    #[test]
    fn test_run_batch_bad_action() {
        let err = run(&config(&["--batch", "src/tests/test_data/batch_bad_action.json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("path=[1].action"), "{err}");
    }
}
