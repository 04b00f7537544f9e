// JSON Lines document loader.
//
// Each line is one record. Field names follow the news collectors' output
// (`date`, `company`, `title`, `content`) with the canonical names accepted
// as well. Anything else on the record is kept as string metadata.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::document::{clean_text, Document};

/// A raw record as it appears in a collector's output file.
///
/// Field values are kept untyped so one odd record (a numeric date, an
/// object where text should be) becomes a rejected document instead of
/// failing the whole file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    subgroup: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Strings as-is, numbers in their decimal form. Anything else is not a
/// usable scalar.
fn scalar(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Timestamp text for the bucketer. Non-scalar values keep their JSON form,
/// which never parses as a date, so the document is rejected downstream.
fn timestamp_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl RawRecord {
    /// Convert into a Document. `fallback_id` is used when the record has no
    /// id; `label` overrides the record's own subgroup.
    fn into_document(self, fallback_id: String, label: Option<&str>) -> Document {
        let id = match self.id {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => fallback_id,
            Some(other) => other.to_string(),
        };

        // Explicit text wins; otherwise title + content like the collectors
        // concatenate them. All three missing means no text at all.
        let text = match (scalar(self.text), scalar(self.title), scalar(self.content)) {
            (Some(text), _, _) => Some(text),
            (None, None, None) => None,
            (None, title, content) => Some(format!(
                "{} {}",
                title.unwrap_or_default(),
                content.unwrap_or_default()
            )),
        }
        .map(|t| clean_text(&t));

        // `timestamp` and `subgroup` take precedence over the collector names
        let timestamp = match self.timestamp {
            Some(value) if !value.is_null() => timestamp_text(Some(value)),
            _ => timestamp_text(self.date),
        };
        let own_subgroup = scalar(self.subgroup).or_else(|| scalar(self.company));

        let subgroup = label
            .map(str::to_string)
            .or(own_subgroup)
            .unwrap_or_default();

        let metadata = self
            .extra
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect();

        Document {
            id,
            text,
            timestamp,
            subgroup,
            metadata,
        }
    }
}

/// Parse JSON Lines content into documents.
///
/// `source` names the input in error messages and fallback ids. Blank lines
/// are skipped; a malformed line is an error (the file is not what the
/// collectors produce).
pub fn parse_json_lines(
    reader: impl BufRead,
    source: &str,
    label: Option<&str>,
) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read {source}:{line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: RawRecord = serde_json::from_str(&line)
            .with_context(|| format!("malformed record at {source}:{line_no}"))?;
        documents.push(record.into_document(format!("{source}:{line_no}"), label));
    }

    Ok(documents)
}

/// Load documents from a JSON Lines file, optionally tagging every record
/// with a subgroup label.
pub fn load_json_lines(path: &Path, label: Option<&str>) -> Result<Vec<Document>> {
    let file = File::open(path)
        .with_context(|| format!("document file not found: {}", path.display()))?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let documents = parse_json_lines(BufReader::new(file), &source, label)?;
    info!(
        path = %path.display(),
        documents = documents.len(),
        label = label.unwrap_or("-"),
        "Loaded documents"
    );
    Ok(documents)
}
