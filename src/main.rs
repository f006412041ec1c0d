use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use long_id_normalizer::config::{split_field_list, Config};
use long_id_normalizer::constants::DEFAULT_ID_FIELD;
use long_id_normalizer::{logging, IdFields, LongIdUtils, QueryString};

#[derive(Parser)]
#[command(name = "long-ids")]
#[command(about = "Coerce long numeric identifiers in JSON payloads to strings")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./long-ids.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stringify identifier fields of a JSON object or of every object in an array
    Normalize {
        /// JSON file to read; stdin when omitted
        path: Option<PathBuf>,
        /// Identifier fields (comma-separated), replacing the configured set
        #[arg(long)]
        fields: Option<String>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print one identifier field per record as a string
    Extract {
        /// JSON file to read; stdin when omitted
        path: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_ID_FIELD)]
        field: String,
    },
    /// Print a URL query parameter as an identifier string
    Param {
        url: String,
        name: String,
    },
}

fn read_input(path: Option<&Path>) -> Result<Value> {
    let data = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let json: Value = serde_json::from_str(&data).context("Failed to parse JSON input")?;
    Ok(json)
}

/// Arrays go through the collection pass, anything else through the record pass
fn normalize_value(input: &Value, fields: &IdFields) -> Value {
    if input.is_array() {
        LongIdUtils::ensure_array_ids_as_strings(input, fields)
    } else {
        if !input.is_object() {
            warn!("input is neither an object nor an array; passing it through");
        }
        LongIdUtils::ensure_ids_as_strings(input, fields)
    }
}

fn id_line(id: Option<String>) -> String {
    id.unwrap_or_else(|| "null".to_string())
}

/// One line per array element, or a single line for any other document
fn extract_lines(input: &Value, field: &str) -> Vec<String> {
    match input {
        Value::Array(items) => items
            .iter()
            .map(|item| id_line(LongIdUtils::id_as_string(Some(item), field)))
            .collect(),
        single => vec![id_line(LongIdUtils::id_as_string(Some(single), field))],
    }
}

/// Output line for `param` and whether the parameter was present
fn param_result(url: &str, name: &str) -> Result<(String, bool)> {
    let query = QueryString::from_url(url).with_context(|| format!("Invalid URL: {}", url))?;
    Ok(match LongIdUtils::param_as_id(&query, name) {
        Some(id) => (id, true),
        None => (id_line(None), false),
    })
}

fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_env();
    let _guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Normalize { path, fields, pretty } => {
            let fields = match fields {
                Some(list) => IdFields::new(split_field_list(&list)),
                None => config.id_fields(),
            };
            let names: Vec<&str> = fields.iter().collect();
            debug!(fields = ?names, "identifier fields");

            let input = read_input(path.as_deref())?;
            let output = normalize_value(&input, &fields);

            let rendered = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", rendered);
            info!("normalized identifier fields");
        }
        Commands::Extract { path, field } => {
            let input = read_input(path.as_deref())?;
            for line in extract_lines(&input, &field) {
                println!("{}", line);
            }
        }
        Commands::Param { url, name } => {
            // returned rather than exiting so the log guard flushes on drop
            let (line, found) = param_result(&url, &name)?;
            println!("{}", line);
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_value_dispatches_on_shape() {
        let fields = IdFields::default();
        assert_eq!(
            normalize_value(&json!([{"id": 1}, {"orderId": 2}]), &fields),
            json!([{"id": "1"}, {"orderId": "2"}])
        );
        assert_eq!(normalize_value(&json!({"skuId": 3}), &fields), json!({"skuId": "3"}));
        assert_eq!(normalize_value(&json!("plain"), &fields), json!("plain"));
    }

    #[test]
    fn test_normalize_value_uses_given_fields() {
        let fields = IdFields::new(split_field_list("tenantId"));
        assert_eq!(
            normalize_value(&json!({"id": 1, "tenantId": 2}), &fields),
            json!({"id": 1, "tenantId": "2"})
        );
    }

    #[test]
    fn test_extract_lines_per_element() {
        let input: Value =
            serde_json::from_str(r#"[{"id": 9007199254740993}, {"name": "x"}, {"id": null}, {"id": "7"}]"#)
                .unwrap();
        assert_eq!(
            extract_lines(&input, DEFAULT_ID_FIELD),
            vec!["9007199254740993", "null", "null", "7"]
        );
    }

    #[test]
    fn test_extract_lines_single_document() {
        assert_eq!(extract_lines(&json!({"userId": 5}), "userId"), vec!["5"]);
        assert_eq!(extract_lines(&json!({"userId": 5}), "id"), vec!["null"]);
    }

    #[test]
    fn test_param_result_present() {
        let (line, found) =
            param_result("https://shop.example/order?orderId=1207279389033627649", "orderId").unwrap();
        assert_eq!(line, "1207279389033627649");
        assert!(found);
    }

    #[test]
    fn test_param_result_absent_fails() {
        let (line, found) = param_result("https://shop.example/order?tab=items", "orderId").unwrap();
        assert_eq!(line, "null");
        assert!(!found);
        assert!(param_result("not a url", "orderId").is_err());
    }
}
