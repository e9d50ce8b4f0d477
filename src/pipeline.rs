use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::graph::{build_graph, dot_string, Graph};
use crate::normalizer::{classify_and_wrap, WrapStrategy};
use crate::parser::{JavaParser, SyntaxError};

/// One raw input: fragment text plus the optional header metadata forwarded
/// into the emitted graph. Immutable once received.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub text: String,
    pub header: Option<String>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, header: Option<String>) -> Self {
        Self {
            text: text.into(),
            header,
        }
    }
}

/// A rejected candidate: its strategy tag, the wrapped source that was
/// tried, and the syntax errors the parser reported for it.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub strategy: WrapStrategy,
    pub source: String,
    pub errors: Vec<SyntaxError>,
}

/// Result of processing one fragment. A failure carries every attempt for
/// the diagnostic artifact; it never aborts the batch.
pub enum FragmentOutcome {
    Success {
        graph: Graph,
        strategy: WrapStrategy,
    },
    Failure {
        attempts: Vec<Attempt>,
    },
}

/// Per-fragment driver: normalize, try candidates in ranked order against
/// the parser, compact the first accepted tree. Owns its parser, so
/// fragments processed by different generators share no state.
pub struct GraphGenerator {
    parser: JavaParser,
    verbose: bool,
}

impl GraphGenerator {
    pub fn new() -> Result<Self> {
        Self::with_verbose(false)
    }

    /// Verbose mode keeps chain nodes instead of eliding them.
    pub fn with_verbose(verbose: bool) -> Result<Self> {
        Ok(Self {
            parser: JavaParser::new()?,
            verbose,
        })
    }

    pub fn process(&mut self, fragment: &Fragment) -> FragmentOutcome {
        let mut attempts = Vec::new();
        for candidate in classify_and_wrap(&fragment.text) {
            match self.parser.parse(&candidate.source) {
                Ok(unit) => {
                    return FragmentOutcome::Success {
                        graph: build_graph(&unit, self.verbose),
                        strategy: candidate.strategy,
                    }
                }
                Err(errors) => attempts.push(Attempt {
                    strategy: candidate.strategy,
                    source: candidate.source,
                    errors,
                }),
            }
        }
        FragmentOutcome::Failure { attempts }
    }
}

/// Header metadata travels as a `// ...` comment on the first line of a
/// snippet file.
pub fn extract_header(source: &str) -> Option<String> {
    let first_line = source.lines().next()?;
    first_line
        .trim()
        .strip_prefix("//")
        .map(|rest| rest.trim().to_string())
}

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub error_dir: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateSummary {
    pub generated: usize,
    pub failed: usize,
}

/// Batch driver: walk `input_dir` for `.java` snippet files, emit a `.dot`
/// graph per parseable fragment at the mirrored relative path under
/// `output_dir`, and a failure artifact under `error_dir` for the rest.
pub fn generate_dir(cfg: &GenerateConfig) -> Result<GenerateSummary> {
    let mut generator = GraphGenerator::with_verbose(cfg.verbose)?;
    let mut summary = GenerateSummary::default();

    for entry in WalkDir::new(&cfg.input_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }
        match generate_file(&mut generator, cfg, path) {
            Ok(true) => summary.generated += 1,
            Ok(false) => {
                summary.failed += 1;
                eprintln!(
                    "[graph_generator] Skipping {}: every candidate was rejected",
                    path.display()
                );
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!("[graph_generator] Failed to process {}: {}", path.display(), e);
            }
        }
    }
    Ok(summary)
}

fn generate_file(generator: &mut GraphGenerator, cfg: &GenerateConfig, path: &Path) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let fragment = Fragment::new(content.clone(), extract_header(&content));

    match generator.process(&fragment) {
        FragmentOutcome::Success { graph, .. } => {
            let out_path = resolve_output_path(&cfg.input_dir, path, &cfg.output_dir);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let dot = dot_string(&graph, fragment.header.as_deref());
            fs::write(&out_path, dot)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            Ok(true)
        }
        FragmentOutcome::Failure { attempts } => {
            write_failure_artifact(
                &cfg.error_dir,
                path,
                fragment.header.as_deref(),
                &fragment.text,
                &attempts,
            )?;
            Ok(false)
        }
    }
}

/// `<output_dir>/<relative dir of the snippet>/<stem>.dot`
fn resolve_output_path(input_dir: &Path, java_file: &Path, output_dir: &Path) -> PathBuf {
    let stem = java_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "snippet".to_string());
    let mut out = output_dir.to_path_buf();
    if let Some(parent) = java_file.parent() {
        if let Some(rel) = pathdiff::diff_paths(parent, input_dir) {
            out = out.join(rel);
        }
    }
    out.join(format!("{}.dot", stem))
}

/// Diagnostic artifact for a fragment every candidate failed on: the
/// forwarded header, the original text, then each attempt's tag, wrapped
/// source, and reported errors.
fn write_failure_artifact(
    error_dir: &Path,
    source_path: &Path,
    header: Option<&str>,
    original: &str,
    attempts: &[Attempt],
) -> Result<()> {
    fs::create_dir_all(error_dir)
        .with_context(|| format!("Failed to create {}", error_dir.display()))?;
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "snippet".to_string());
    let artifact_path = error_dir.join(format!("{}.txt", stem));

    let mut buf = String::new();
    buf.push_str("header:\n");
    buf.push_str(header.unwrap_or(""));
    buf.push_str("\n\n");
    buf.push_str("original:\n");
    buf.push_str(original);
    buf.push_str("\n\n");
    for attempt in attempts {
        buf.push_str(&format!("wrap={}\n", attempt.strategy));
        buf.push_str(&attempt.source);
        buf.push('\n');
        for error in &attempt.errors {
            buf.push_str(&format!("error: {}\n", error));
        }
        buf.push('\n');
    }
    fs::write(&artifact_path, buf)
        .with_context(|| format!("Failed to write {}", artifact_path.display()))
}

#[derive(Clone, Debug)]
pub struct ValidateConfig {
    pub input_dir: PathBuf,
    pub error_dir: PathBuf,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ValidateSummary {
    pub valid: usize,
    pub invalid: usize,
}

/// Parse-only sweep over already-wrapped snippet files: no re-wrapping, just
/// acceptance checking. Rejected files get an error artifact.
pub fn validate_dir(cfg: &ValidateConfig) -> Result<ValidateSummary> {
    let mut parser = JavaParser::new()?;
    let mut summary = ValidateSummary::default();

    for entry in WalkDir::new(&cfg.input_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("[dir_validator] Failed to read {}: {}", path.display(), e);
                continue;
            }
        };
        match parser.parse(&content) {
            Ok(_) => summary.valid += 1,
            Err(errors) => {
                summary.invalid += 1;
                eprintln!(
                    "[dir_validator] {} has {} syntax error(s)",
                    path.display(),
                    errors.len()
                );
                write_invalid_artifact(&cfg.error_dir, path, &content, &errors)?;
            }
        }
    }
    Ok(summary)
}

fn write_invalid_artifact(
    error_dir: &Path,
    source_path: &Path,
    source: &str,
    errors: &[SyntaxError],
) -> Result<()> {
    fs::create_dir_all(error_dir)
        .with_context(|| format!("Failed to create {}", error_dir.display()))?;
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "snippet".to_string());
    let artifact_path = error_dir.join(format!("{}.txt", stem));

    let mut buf = String::new();
    buf.push_str("header:\n");
    buf.push_str(&extract_header(source).unwrap_or_default());
    buf.push_str("\n\n");
    buf.push_str("source:\n");
    buf.push_str(source);
    buf.push_str("\n\nerrors:\n");
    for error in errors {
        buf.push_str(&format!("{}\n", error));
    }
    fs::write(&artifact_path, buf)
        .with_context(|| format!("Failed to write {}", artifact_path.display()))
}
