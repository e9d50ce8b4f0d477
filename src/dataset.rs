use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::normalizer::classify_and_wrap;

pub const DEFAULT_INPUT: &str = "MLCQCodeSmellSamples.json";
pub const NORMALIZED_INPUT: &str = "MLCQCodeSmellSamples.normalized.json";

/// The four label slots of the exported vector: feature envy, long method,
/// blob, data class.
const LABEL_KEYS: [&str; 4] = ["feature envy", "long method", "blob", "data class"];

#[derive(Debug, Clone, Deserialize)]
pub struct LabelInfo {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub present: Option<bool>,
    #[serde(default)]
    pub vote_count: Option<i64>,
}

/// One dataset record. Every field is tolerated missing; real exports are
/// ragged.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleEntry {
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub start_line: i64,
    #[serde(default)]
    pub end_line: i64,
    #[serde(default)]
    pub code_snippet: Option<String>,
    #[serde(default)]
    pub smell: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub labels: Option<HashMap<String, LabelInfo>>,
    #[serde(default)]
    pub y: Option<Vec<bool>>,
}

#[derive(Clone, Debug)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub java_dir: PathBuf,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportSummary {
    pub written: usize,
}

/// Prefer the normalized export when it exists next to the raw one.
pub fn resolve_default_input() -> PathBuf {
    let normalized = PathBuf::from(NORMALIZED_INPUT);
    if normalized.exists() {
        normalized
    } else {
        PathBuf::from(DEFAULT_INPUT)
    }
}

pub fn read_entries(path: &Path) -> Result<Vec<SampleEntry>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Turn every dataset record into a wrapped, header-commented `.java`
/// snippet file under `java_dir`, ready for the graph generator.
pub fn import_dataset(cfg: &ImportConfig) -> Result<ImportSummary> {
    let entries = read_entries(&cfg.input)?;
    fs::create_dir_all(&cfg.java_dir)
        .with_context(|| format!("Failed to create {}", cfg.java_dir.display()))?;

    let mut name_counts: HashMap<String, usize> = HashMap::new();
    let mut summary = ImportSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        let base_name = build_base_name(entry);
        let count = name_counts.entry(base_name.clone()).or_insert(0);
        *count += 1;
        let file_name = apply_suffix(&base_name, *count);

        let header = build_header(entry, index);
        let source = build_java_source(entry.code_snippet.as_deref().unwrap_or(""), &header);

        let java_path = cfg.java_dir.join(file_name);
        fs::write(&java_path, source)
            .with_context(|| format!("Failed to write {}", java_path.display()))?;
        summary.written += 1;
    }
    Ok(summary)
}

fn build_java_source(snippet: &str, header: &str) -> String {
    let candidates = classify_and_wrap(snippet);
    // classify_and_wrap always yields at least the fallback; the first
    // candidate is the selected wrap
    let source = &candidates[0].source;
    add_header_comment(header, source)
}

fn add_header_comment(header: &str, source: &str) -> String {
    if header.is_empty() {
        return source.to_string();
    }
    format!("// {}\n{}", header, source)
}

/// `<commit>_<start>_<end>_<y-compact>_<file>`
fn build_base_name(entry: &SampleEntry) -> String {
    let commit = safe_token(entry.commit_hash.as_deref());
    let file = Regex::new(r"\s+")
        .unwrap()
        .replace_all(&extract_file_name(entry.file_path.as_deref()), "_")
        .into_owned();
    format!(
        "{}_{}_{}_{}_{}",
        commit,
        entry.start_line,
        entry.end_line,
        format_y_compact(entry),
        file
    )
}

fn build_header(entry: &SampleEntry, index: usize) -> String {
    let mut header = format!("json_index={}", index);
    append_header_field(&mut header, "commit_hash", entry.commit_hash.as_deref());
    append_header_field(&mut header, "file_path", entry.file_path.as_deref());
    append_header_field(&mut header, "start_line", Some(&entry.start_line.to_string()));
    append_header_field(&mut header, "end_line", Some(&entry.end_line.to_string()));
    append_header_field(&mut header, "y", Some(&format_y(entry)));
    escape_header(&header)
}

fn append_header_field(header: &mut String, key: &str, value: Option<&str>) {
    header.push(' ');
    header.push_str(key);
    header.push('=');
    header.push_str(value.unwrap_or(""));
}

fn escape_header(header: &str) -> String {
    header.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Lowercased, `[a-z0-9]`-only token; `unknown` when nothing survives.
fn safe_token(value: Option<&str>) -> String {
    let value = value.unwrap_or("").trim().to_lowercase();
    let collapsed = Regex::new(r"[^a-z0-9]+")
        .unwrap()
        .replace_all(&value, "_")
        .into_owned();
    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

fn extract_file_name(path: Option<&str>) -> String {
    match path {
        None | Some("") => "unknown".to_string(),
        Some(path) => match path.rfind('/') {
            Some(pos) => path[pos + 1..].to_string(),
            None => path.to_string(),
        },
    }
}

fn format_y(entry: &SampleEntry) -> String {
    let y = resolve_y(entry);
    format!("[{}, {}, {}, {}]", y[0], y[1], y[2], y[3])
}

fn format_y_compact(entry: &SampleEntry) -> String {
    let y = resolve_y(entry);
    format!("[{},{},{},{}]", y[0], y[1], y[2], y[3])
}

/// The explicit `y` vector wins; otherwise derive it from the labels map.
fn resolve_y(entry: &SampleEntry) -> [bool; 4] {
    if let Some(y) = &entry.y {
        if y.len() >= 4 {
            return [y[0], y[1], y[2], y[3]];
        }
    }
    let mut resolved = [false; 4];
    for (slot, key) in LABEL_KEYS.iter().enumerate() {
        resolved[slot] = label_present(entry, key);
    }
    resolved
}

fn label_present(entry: &SampleEntry, label_key: &str) -> bool {
    entry
        .labels
        .as_ref()
        .and_then(|labels| labels.get(label_key))
        .and_then(|info| info.present)
        .unwrap_or(false)
}

/// Duplicate base names get `_00N` suffixes, before the extension when the
/// base already carries one.
fn apply_suffix(base_name: &str, count: usize) -> String {
    let name = if count <= 1 {
        base_name.to_string()
    } else if let Some(stripped) = base_name.strip_suffix(".java") {
        format!("{}_{:03}.java", stripped, count)
    } else {
        format!("{}_{:03}", base_name, count)
    };
    if name.ends_with(".java") {
        name
    } else {
        format!("{}.java", name)
    }
}
