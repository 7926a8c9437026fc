// SPDX-License-Identifier: GPL-3.0-only

//! MoreKeys Command-Line Front End
//!
//! Reads a popup layout request as JSON and prints the placed popup keyboard
//! as JSON. Useful for checking how a key's alternates will be laid out
//! without running the keyboard.
//!
//! # Usage
//!
//! ```bash
//! morekeys [--config <config.json>] [<request.json>]
//! ```
//!
//! The request is read from stdin when no file is given:
//!
//! ```json
//! {
//!     "labels": ["e", "é", "è", "ê", "ë"],
//!     "key_width": 40.0,
//!     "key_height": 60.0,
//!     "parent_key_center_x": 300.0,
//!     "keyboard_width": 800.0
//! }
//! ```
//!
//! `key_count` may be omitted when `labels` is given. `max_columns` and
//! `column_order` fall back to the configuration.

use std::io::Read;
use std::process::ExitCode;

use serde::Deserialize;

use morekeys::app_settings;
use morekeys::config::{self, PopupConfig};
use morekeys::popup::{place_keys, ColumnOrder, LayoutParameters, LayoutRequest};

/// Request as accepted on the command line.
#[derive(Debug, Deserialize)]
struct CliRequest {
    #[serde(default)]
    labels: Vec<String>,
    key_count: Option<usize>,
    max_columns: Option<usize>,
    column_order: Option<ColumnOrder>,
    key_width: f32,
    key_height: f32,
    parent_key_center_x: f32,
    keyboard_width: f32,
}

impl CliRequest {
    /// Builds the layout request, filling unset fields from the config.
    fn to_layout_request(&self, config: &PopupConfig) -> Result<LayoutRequest, String> {
        let key_count = match (self.key_count, self.labels.len()) {
            (Some(count), 0) => count,
            (Some(count), labels) if count != labels => {
                return Err(format!(
                    "key_count is {} but {} labels were given",
                    count, labels
                ));
            }
            (_, labels) => labels,
        };

        Ok(LayoutRequest::new(
            key_count,
            self.max_columns.unwrap_or(config.max_columns),
            self.key_width,
            self.key_height,
            self.parent_key_center_x,
            self.keyboard_width,
        )
        .with_column_order(self.column_order.unwrap_or(config.column_order)))
    }

    /// Labels for each key, numbering them when none were given.
    fn labels(&self, key_count: usize) -> Vec<String> {
        if self.labels.is_empty() {
            (1..=key_count).map(|n| n.to_string()).collect()
        } else {
            self.labels.clone()
        }
    }
}

struct Args {
    config_path: Option<String>,
    request_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: None,
        request_path: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                args.config_path = Some(iter.next().ok_or("--config needs a file path")?);
            }
            "--help" | "-h" => {
                return Err("usage: morekeys [--config <config.json>] [<request.json>]".into());
            }
            _ if args.request_path.is_none() => args.request_path = Some(arg),
            _ => return Err(format!("unexpected argument '{}'", arg)),
        }
    }

    Ok(args)
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let popup_config = match &args.config_path {
        Some(path) => config::load_config(path)?.config,
        None => PopupConfig::default(),
    };

    let json = match &args.request_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let cli_request: CliRequest = serde_json::from_str(&json)?;

    let request = cli_request.to_layout_request(&popup_config)?;
    let params = LayoutParameters::new(request)?;
    let options = popup_config.placement_options(request.key_width);
    let popup = place_keys(&params, &options, cli_request.labels(request.key_count))?;

    Ok(serde_json::to_string_pretty(&popup)?)
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(app_settings::DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
        )
        .init();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_request(json: &str) -> CliRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_key_count_from_labels() {
        let cli = cli_request(
            r#"{"labels": ["a", "b", "c"], "key_width": 10.0, "key_height": 10.0,
                "parent_key_center_x": 50.0, "keyboard_width": 100.0}"#,
        );
        let request = cli.to_layout_request(&PopupConfig::default()).unwrap();

        assert_eq!(request.key_count, 3);
        assert_eq!(request.max_columns, app_settings::DEFAULT_MAX_COLUMNS);
        assert_eq!(cli.labels(3), vec!["a", "b", "c"]);
    }

    /// Test: Request fields override the config, missing ones fall back to it
    #[test]
    fn test_config_fallbacks() {
        let config = PopupConfig {
            max_columns: 3,
            column_order: ColumnOrder::Fixed,
            ..Default::default()
        };
        let cli = cli_request(
            r#"{"key_count": 4, "max_columns": 4, "key_width": 10.0, "key_height": 10.0,
                "parent_key_center_x": 50.0, "keyboard_width": 100.0}"#,
        );
        let request = cli.to_layout_request(&config).unwrap();

        assert_eq!(request.max_columns, 4);
        assert_eq!(request.column_order, ColumnOrder::Fixed);
        assert_eq!(cli.labels(4), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_key_count_label_mismatch() {
        let cli = cli_request(
            r#"{"key_count": 2, "labels": ["a"], "key_width": 10.0, "key_height": 10.0,
                "parent_key_center_x": 50.0, "keyboard_width": 100.0}"#,
        );
        assert!(cli.to_layout_request(&PopupConfig::default()).is_err());
    }
}
