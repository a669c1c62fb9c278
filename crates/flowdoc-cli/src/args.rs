//! Command-line argument definitions for the Flowdoc CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select which documents to generate, where to
//! write them, the output format, configuration file and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output format for generated documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One multi-page PDF file per document
    #[default]
    Pdf,
    /// One SVG file per page
    Svg,
}

/// Command-line arguments for the Flowdoc flowchart generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Description files to render instead of the bundled documents
    #[arg(help = "Paths to TOML flowchart descriptions")]
    pub inputs: Vec<String>,

    /// Directory the generated files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Only generate the named bundled documents (student, admin, system)
    #[arg(long)]
    pub only: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pdf)]
    pub format: Format,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: ".".to_string(),
            only: Vec::new(),
            format: Format::default(),
            config: None,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["flowdoc"]).unwrap();
        assert!(args.inputs.is_empty());
        assert!(args.only.is_empty());
        assert_eq!(args.output_dir, ".");
        assert_eq!(args.format, Format::Pdf);
    }

    #[test]
    fn test_repeated_only_and_format() {
        let args = Args::try_parse_from([
            "flowdoc", "--only", "student", "--only", "system", "--format", "svg", "-o", "out",
        ])
        .unwrap();
        assert_eq!(args.only, vec!["student", "system"]);
        assert_eq!(args.format, Format::Svg);
        assert_eq!(args.output_dir, "out");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["flowdoc", "--format", "png"]).is_err());
    }
}
