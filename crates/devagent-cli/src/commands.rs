//! Subcommand implementations.
//!
//! Each command writes its human or JSON output to the given writer.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use devagent_core::{
    build_upload, read_or_placeholder, reconstruct, stats, DirectoryUpload, FsEntry,
    InteractionLog, KeyValueStore,
};
use devagent_types::{Category, ChatRole, FileTreeNode, InteractionRecord, NodeKind};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use tracing::info;

const PREVIEW_CHARS: usize = 60;

/// Parse `KEY=VALUE` pairs. Values that parse as JSON are kept as JSON,
/// anything else is stored as a string.
pub fn parse_metadata(pairs: &[String]) -> Result<Option<Map<String, Value>>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut map = Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid metadata '{}': expected KEY=VALUE", pair);
        };
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        map.insert(key.trim().to_string(), value);
    }
    Ok(Some(map))
}

pub fn add<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    category: Category,
    input: &str,
    output: &str,
    metadata: &[String],
    out: &mut W,
) -> Result<()> {
    let record = log.append(category, input, output, parse_metadata(metadata)?);
    writeln!(out, "{}", record.id)?;
    Ok(())
}

pub fn list<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    limit: Option<usize>,
    category: Option<Category>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let records: Vec<InteractionRecord> = log
        .all()
        .into_iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    for record in &records {
        writeln!(
            out,
            "{}  {:<10} {}",
            format_millis(record.created_at),
            record.category.slug(),
            preview(&record.input)
        )?;
    }
    Ok(())
}

pub fn show_stats<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let stats = stats(&log.all());
    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
        return Ok(());
    }

    for (category, count) in stats.entries() {
        writeln!(out, "{:<10} {}", category.label(), count)?;
    }
    writeln!(out, "{:<10} {}", "Total", stats.total)?;
    Ok(())
}

pub fn chat_show<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let messages = reconstruct(&log.all());
    if json {
        serde_json::to_writer_pretty(&mut *out, &messages)?;
        writeln!(out)?;
        return Ok(());
    }

    for message in &messages {
        let who = match message.role {
            ChatRole::User => "you",
            ChatRole::Agent => "agent",
        };
        writeln!(out, "[{}] {}: {}", format_millis(message.timestamp), who, message.text)?;
    }
    Ok(())
}

pub fn remove<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    category: Category,
    out: &mut W,
) -> Result<()> {
    let before = log.all().len();
    log.remove_category(category);
    let removed = before.saturating_sub(log.all().len());
    writeln!(out, "Removed {} {} record(s)", removed, category)?;
    Ok(())
}

pub fn clear<S: KeyValueStore, W: Write>(log: &InteractionLog<S>, out: &mut W) -> Result<()> {
    log.clear();
    writeln!(out, "History cleared")?;
    Ok(())
}

/// Write the log as pretty JSON to `file`, or to `out` when no file is given.
pub fn export<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    file: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let records = log.export();
    let body = serde_json::to_string_pretty(&records)?;
    match file {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(target: "devagent::log", "Exported {} record(s) to {}", records.len(), path.display());
        }
        None => writeln!(out, "{}", body)?,
    }
    Ok(())
}

pub fn import<S: KeyValueStore, W: Write>(
    log: &InteractionLog<S>,
    file: &Path,
    out: &mut W,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<InteractionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an exported history", file.display()))?;

    let count = records.len();
    if !log.import(records) {
        bail!("Failed to import history");
    }
    writeln!(out, "Imported {} record(s)", count)?;
    Ok(())
}

pub async fn tree<W: Write>(dir: &Path, json: bool, out: &mut W) -> Result<()> {
    let root = build_upload(DirectoryUpload::scan(dir).await?);
    let display = root.display_root();

    if json {
        serde_json::to_writer_pretty(&mut *out, display)?;
        writeln!(out)?;
        return Ok(());
    }

    render(display, 0, out)?;
    Ok(())
}

fn render<P, W: Write>(node: &FileTreeNode<P>, depth: usize, out: &mut W) -> Result<()> {
    let suffix = if node.kind == NodeKind::Directory { "/" } else { "" };
    writeln!(out, "{}{}{}", "  ".repeat(depth), node.name, suffix)?;
    for child in &node.children {
        render(child, depth + 1, out)?;
    }
    Ok(())
}

/// Print one uploaded file. `path` is the node's path key, with or without the
/// collapsed folder prefix.
pub async fn cat<W: Write>(dir: &Path, path: &str, out: &mut W) -> Result<()> {
    let root = build_upload(DirectoryUpload::scan(dir).await?);
    let display = root.display_root();
    let prefixed = format!("{}/{}", display.path, path);

    let entry: &FsEntry = root
        .find(path)
        .or_else(|| root.find(&prefixed))
        .and_then(|node| node.payload.as_ref())
        .with_context(|| format!("No file '{}' in {}", path, dir.display()))?;

    writeln!(out, "{}", read_or_placeholder(entry).await)?;
    Ok(())
}

fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
