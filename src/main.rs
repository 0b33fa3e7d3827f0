//! manbuilder — generate nroff man pages from XML page definitions.
//!
//! - `manbuilder -f nroff < page.xml > page.1`
//! - `manbuilder -i page.xml -o page.1`

mod error;
mod expand;
mod model;
mod parser;
mod render;
mod text;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Path meaning stdin or stdout.
const STDIO: &str = "-";

#[derive(Parser)]
#[command(
    name = "manbuilder",
    about = "Generate nroff man pages from XML page definitions"
)]
struct Cli {
    /// XML input file, or "-" for stdin
    #[arg(short = 'i', long, default_value = STDIO)]
    input: PathBuf,

    /// Output file, or "-" for stdout
    #[arg(short = 'o', long, default_value = STDIO)]
    output: PathBuf,

    /// Format of the output file
    #[arg(
        short = 'f',
        long,
        default_value = "nroff",
        value_parser = PossibleValuesParser::new(render::FORMATS.iter().copied())
    )]
    format: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let tags = expand::TagExpander::standard(program_name());
    let renderer = render::create_renderer(&cli.format, tags)?;
    log::debug!("rendering {} as {}", cli.input.display(), cli.format);

    let content = read_input(&cli.input)?;
    let mut diagnostics = error::Diagnostics::default();
    let parsed = parser::parse(&content, &mut diagnostics);
    for warning in diagnostics.warnings() {
        eprintln!("warning: {}", warning);
    }
    let doc = parsed.with_context(|| format!("failed to parse {}", cli.input.display()))?;

    write_output(&cli.output, renderer.as_ref(), &doc)
}

/// Base name of the running executable, for `$$SCRIPTNAME$$`.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manbuilder".to_string())
}

fn is_stdio(path: &Path) -> bool {
    path == Path::new(STDIO)
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdio(path) {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Render into the output. Files are closed when dropped; stdout stays open.
fn write_output(path: &Path, renderer: &dyn render::Renderer, doc: &model::Document) -> Result<()> {
    if is_stdio(path) {
        let mut out = io::stdout().lock();
        renderer.render(doc, &mut out).context("failed to write stdout")?;
        out.flush().context("failed to write stdout")?;
        return Ok(());
    }

    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    renderer
        .render(doc, &mut out)
        .with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
