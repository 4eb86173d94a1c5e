//! Minimal CLI: load → (generate | order | batch)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use swagger_decls::{Generated, ModelCollection, Syntax, document};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn Swagger/OpenAPI model definitions into dependency-ordered type declarations
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate declarations for one document
    Generate(GenerateOut),
    /// print the emission order, one model name per line
    Order(OrderOut),
    /// generate every matching document independently, in parallel
    Batch(BatchOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// schema document (JSON), or '-' for stdin
    #[arg(long, short)]
    input: String,

    /// JSON Pointer to the schema document inside the input (e.g. /bundle/api)
    #[arg(long)]
    json_pointer: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum Target {
    /// React `prop-types` validators
    #[default]
    PropTypes,
    /// TypeScript type aliases
    Typescript,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[arg(long, value_enum, default_value_t = Target::PropTypes)]
    target: Target,

    /// text for the "generated from" header (defaults to the input path)
    #[arg(long)]
    source_label: Option<String>,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// exit non-zero when any declaration carries a missing-reference/unresolved-type marker
    #[arg(long, default_value_t = false)]
    deny_markers: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct OrderOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct BatchOut {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON Pointer applied to every input
    #[arg(long)]
    json_pointer: Option<String>,

    #[arg(long, value_enum, default_value_t = Target::PropTypes)]
    target: Target,

    /// directory receiving `<file-stem>.<ext>` per input
    #[arg(long)]
    out_dir: PathBuf,

    /// exit non-zero when any output carries a marker
    #[arg(long, default_value_t = false)]
    deny_markers: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Target {
    fn syntax(self) -> &'static dyn Syntax {
        match self {
            Target::PropTypes => &swagger_decls::PropTypes,
            Target::Typescript => &swagger_decls::TypeScript,
        }
    }
}

impl InputSettings {
    fn load(&self) -> Result<ModelCollection> {
        let pointer = self.json_pointer.as_deref();
        if self.input == "-" {
            let src = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
            return document::load_str(&src, pointer).context("failed to load schema document from stdin");
        }
        document::load_path(Path::new(&self.input), pointer)
            .with_context(|| format!("failed to load schema document {}", self.input))
    }

    fn source_label(&self) -> Option<&str> {
        (self.input != "-").then_some(self.input.as_str())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let models = target.input_settings.load()?;
                let syntax = target.target.syntax();
                let generated = swagger_decls::generate(&models, syntax)?;

                let label = target.source_label.as_deref().or(target.input_settings.source_label());
                let src = generated.render(&syntax.preamble(label));
                match target.out.as_ref() {
                    Some(out) => write_output(out, &src)?,
                    None => print!("{src}"),
                }

                report_markers(&target.input_settings.input, &generated);
                if target.deny_markers && generated.has_markers() {
                    bail!("{} inline marker(s) in generated output", generated.markers().count());
                }
                Ok(())
            }
            Command::Order(target) => {
                let models = target.input_settings.load()?;
                for name in swagger_decls::order(&models)? {
                    println!("{name}");
                }
                Ok(())
            }
            Command::Batch(target) => target.run(),
        }
    }
}

impl BatchOut {
    fn run(&self) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;

        let syntax = self.target.syntax();
        // one ModelCollection per document
        let results: Vec<(PathBuf, Result<Generated>)> = source_paths
            .into_par_iter()
            .map(|path| {
                let result = self.generate_one(&path, syntax);
                (path, result)
            })
            .collect();

        let mut failed = 0usize;
        let mut markers = 0usize;
        for (path, result) in &results {
            match result {
                Ok(generated) => {
                    report_markers(&path.display().to_string(), generated);
                    markers += generated.markers().count();
                }
                Err(error) => {
                    failed += 1;
                    eprintln!("{} {}: {error:#}", "error:".red().bold(), path.display());
                }
            }
        }
        tracing::info!(documents = results.len(), failed, markers, "batch finished");

        if failed > 0 {
            bail!("{failed} of {} document(s) failed", results.len());
        }
        if self.deny_markers && markers > 0 {
            bail!("{markers} inline marker(s) in generated output");
        }
        Ok(())
    }

    fn generate_one(&self, path: &Path, syntax: &dyn Syntax) -> Result<Generated> {
        let models = document::load_path(path, self.json_pointer.as_deref())
            .with_context(|| format!("failed to load schema document {}", path.display()))?;
        let generated = swagger_decls::generate(&models, syntax)?;

        let stem = path
            .file_stem()
            .with_context(|| format!("no file name in {}", path.display()))?;
        let out = self.out_dir.join(format!("{}.{}", stem.to_string_lossy(), syntax.extension()));
        let label = path.display().to_string();
        write_output(&out, &generated.render(&syntax.preamble(Some(&label))))?;
        Ok(generated)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: &Path, src: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))
}

fn report_markers(source: &str, generated: &Generated) {
    for (model, marker) in generated.markers() {
        eprintln!("{} {source}: {} {marker}", "warning:".yellow().bold(), model.bold());
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
