use clap::{Args, Parser, Subcommand};
use layerpage_codegen::{Canvas, CompileOptions, CompilerOutput, ShadowMode, StyleOptions};
use layerpage_model::{DesignTokens, Document, Loader, ModelError, Validation};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Page file written next to the input when no output is given.
const DEFAULT_OUTPUT: &str = "index.html";

#[derive(Parser)]
#[command(name = "layerpage")]
#[command(about = "Compile a design layer tree into a static HTML page")]
#[command(version)]
struct Cli {
    /// Log every skipped layer
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a layout JSON file to a standalone HTML page
    Build {
        /// Input layout JSON file
        path: PathBuf,

        /// Output HTML file (default: index.html next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Layer Page")]
        title: String,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Load and compile a layout JSON file without writing anything
    Check {
        /// Input layout JSON file
        path: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Extract design tokens from a layout JSON file
    Tokens {
        /// Input layout JSON file
        path: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct CompileArgs {
    /// Canvas size as WIDTHxHEIGHT, overriding the document metadata
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<Canvas>,

    /// Emit drop shadow and outer glow as one comma-joined box-shadow
    #[arg(long)]
    combine_shadows: bool,

    /// Write blend modes as CSS keywords (`color-burn` instead of `color_burn`)
    #[arg(long)]
    css_blend_modes: bool,

    /// Add numeric suffixes to colliding class names
    #[arg(long)]
    unique_classes: bool,

    /// Fail on structurally broken layers instead of skipping them
    #[arg(long)]
    strict: bool,
}

impl CompileArgs {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            canvas: self.canvas,
            style: StyleOptions {
                shadow_mode: if self.combine_shadows {
                    ShadowMode::Combine
                } else {
                    ShadowMode::LastWins
                },
                hyphenate_blend_modes: self.css_blend_modes,
            },
            unique_class_names: self.unique_classes,
        }
    }

    fn validation(&self) -> Validation {
        if self.strict {
            Validation::Strict
        } else {
            Validation::Lenient
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error reading {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Error writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Model { path: String, source: ModelError },

    #[error("Error encoding tokens: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Build {
            path,
            output,
            title,
            compile,
        } => cmd_build(&path, output.as_deref(), &title, &compile),
        Command::Check { path, compile } => cmd_check(&path, &compile),
        Command::Tokens { path, output } => cmd_tokens(&path, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_canvas(value: &str) -> Result<Canvas, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let parse = |n: &str| {
        n.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid canvas dimension `{n}`"))
    };
    Ok(Canvas {
        width: parse(width)?,
        height: parse(height)?,
    })
}

fn read_document(path: &Path, validation: Validation) -> Result<Document, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Loader::new(validation)
        .load_document(&source)
        .map_err(|source| CliError::Model {
            path: path.display().to_string(),
            source,
        })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn default_output(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or(Path::new("."))
        .join(DEFAULT_OUTPUT)
}

fn compile_document(
    path: &Path,
    args: &CompileArgs,
) -> Result<(Document, CompilerOutput), CliError> {
    let doc = read_document(path, args.validation())?;
    let output = layerpage_codegen::compile(&doc, &args.options());

    let tokens = DesignTokens::from_document(&doc);
    tracing::info!(
        design_width = ?doc.metadata.design_width,
        design_height = ?doc.metadata.design_height,
        top_level = doc.layers.len(),
        elements = output.elements,
        colors = tokens.colors.len(),
        font_sizes = tokens.font_sizes.len(),
        spacings = tokens.spacings.len(),
        "Compiled {}",
        path.display()
    );
    Ok((doc, output))
}

fn cmd_build(
    path: &Path,
    output: Option<&Path>,
    title: &str,
    args: &CompileArgs,
) -> Result<(), CliError> {
    let (_, compiled) = compile_document(path, args)?;

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(path));
    write_file(&out_path, &compiled.page(title))?;

    eprintln!("Built: {}", out_path.display());
    Ok(())
}

fn cmd_check(path: &Path, args: &CompileArgs) -> Result<(), CliError> {
    let (doc, compiled) = compile_document(path, args)?;
    eprintln!(
        "OK: {} ({} top-level layers, {} elements)",
        path.display(),
        doc.layers.len(),
        compiled.elements
    );
    Ok(())
}

fn cmd_tokens(path: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let doc = read_document(path, Validation::Lenient)?;
    let json = serde_json::to_string_pretty(&DesignTokens::from_document(&doc))?;

    match output {
        Some(out_path) => {
            write_file(out_path, &json)?;
            eprintln!("Tokens: {}", out_path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
