//! Print the OpenAPI document for the tender API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use clap::{Parser, ValueEnum};
use tender_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// Serialization used for the printed document.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the tender API OpenAPI document",
    version
)]
struct CliArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn render(format: Format) -> io::Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().map_err(io::Error::other),
        Format::Yaml => doc.to_yaml().map_err(io::Error::other),
    }
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    println!("{}", render(args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn json_output_lists_tender_paths() {
        let rendered = render(Format::Json).expect("json document");
        assert!(rendered.contains("/api/tenders/new"));
    }

    #[rstest]
    fn yaml_output_starts_with_openapi_version() {
        let rendered = render(Format::Yaml).expect("yaml document");
        assert!(rendered.starts_with("openapi:"));
    }

    #[rstest]
    fn format_flag_is_parsed() {
        let args = CliArgs::try_parse_from(["openapi-dump", "--format", "yaml"])
            .expect("valid arguments");
        assert!(matches!(args.format, Format::Yaml));
    }
}
