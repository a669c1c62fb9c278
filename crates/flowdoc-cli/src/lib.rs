//! CLI logic for the Flowdoc flowchart generator.
//!
//! With no inputs the bundled student, admin and system documents are
//! regenerated; description files given on the command line replace them.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use flowdoc::{FlowchartBuilder, FlowdocError, catalog, document::Document};

/// A file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    path: PathBuf,
    pages: usize,
}

impl Generated {
    /// Path of the written file (the first page for SVG output)
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages in the document
    pub fn pages(&self) -> usize {
        self.pages
    }
}

/// A description to generate, with a name for log messages.
struct Input {
    name: String,
    source: String,
}

/// Run the Flowdoc CLI application
///
/// Every selected description is loaded, rendered and written into the
/// output directory. One confirmation line is printed per document and a
/// summary line at the end.
///
/// # Errors
///
/// Returns `FlowdocError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown `--only` names
/// - Description errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<Vec<Generated>, FlowdocError> {
    info!(
        output_dir = args.output_dir,
        format:? = args.format;
        "Generating flowchart documents"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let inputs = select_inputs(args)?;

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    let builder = FlowchartBuilder::new(app_config);
    let mut generated = Vec::with_capacity(inputs.len());
    for input in &inputs {
        debug!(input = input.name; "Loading description");
        let document = builder.load(&input.source)?;
        let written = write_document(&builder, &document, output_dir, args.format)?;

        let file = written
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| written.path.display().to_string());
        println!("✅ {file} created ({} pages)", written.pages);
        generated.push(written);
    }

    println!("Generated {} flowchart documents", generated.len());
    info!(count = generated.len(); "Flowchart documents generated");

    Ok(generated)
}

/// Resolves the descriptions a run should generate.
///
/// Input files take precedence over the bundled catalog; `--only` narrows
/// the bundled set and keeps catalog order.
fn select_inputs(args: &Args) -> Result<Vec<Input>, FlowdocError> {
    if !args.inputs.is_empty() {
        if !args.only.is_empty() {
            return Err(FlowdocError::Config(
                "--only selects bundled documents and cannot be combined with input files"
                    .to_string(),
            ));
        }
        return args
            .inputs
            .iter()
            .map(|path| {
                let source = fs::read_to_string(path)?;
                Ok(Input {
                    name: path.clone(),
                    source,
                })
            })
            .collect();
    }

    if let Some(unknown) = args.only.iter().find(|name| catalog::find(name).is_none()) {
        return Err(FlowdocError::Config(format!(
            "unknown bundled document `{unknown}`, expected one of: {}",
            catalog::names().join(", ")
        )));
    }

    Ok(catalog::bundled()
        .iter()
        .filter(|bundled| {
            args.only.is_empty() || args.only.iter().any(|name| name == bundled.name())
        })
        .map(|bundled| Input {
            name: bundled.name().to_string(),
            source: bundled.source().to_string(),
        })
        .collect())
}

fn write_document(
    builder: &FlowchartBuilder,
    document: &Document,
    output_dir: &Path,
    format: Format,
) -> Result<Generated, FlowdocError> {
    match format {
        Format::Pdf => {
            let path = output_dir.join(document.file());
            builder.save_pdf(document, &path)?;
            info!(output_file:? = path; "PDF exported successfully");
            Ok(Generated {
                path,
                pages: document.page_count(),
            })
        }
        Format::Svg => {
            let paths = builder.save_svg(document, output_dir)?;
            info!(pages = paths.len(); "SVG pages exported successfully");
            let pages = paths.len();
            let path = paths
                .into_iter()
                .next()
                .unwrap_or_else(|| output_dir.join(document.file()));
            Ok(Generated { path, pages })
        }
    }
}
