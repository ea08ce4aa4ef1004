//! Integration tests for the devagent subcommands.
//!
//! These drive the same functions the binary dispatches to, against an
//! in-memory or temporary SQLite store.

use devagent_cli::commands;
use devagent_cli::config::{Backend, Config};
use devagent_cli::state::AppState;
use devagent_core::{InteractionLog, MemoryStore};
use devagent_types::{Category, ChatMessage, InteractionRecord, UsageStats};
use std::path::Path;
use tempfile::TempDir;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

fn seeded_log() -> InteractionLog<MemoryStore> {
    let log = InteractionLog::new(MemoryStore::new());
    log.append(Category::Debugging, "thread 'main' panicked", "check bounds", None);
    log.append(Category::Chat, "what is a trait?", "an interface", None);
    log.append(Category::Review, "fn add(a: i32) {}", "missing return", None);
    log
}

// ============================================================================
// HISTORY COMMANDS
// ============================================================================

#[test]
fn test_add_prints_id_and_records() {
    let log = InteractionLog::new(MemoryStore::new());
    let mut out = Vec::new();

    commands::add(
        &log,
        Category::TestGeneration,
        "def f(): pass",
        "def test_f(): ...",
        &["framework=pytest".to_string()],
        &mut out,
    )
    .unwrap();

    let all = log.all();
    assert_eq!(all.len(), 1);
    assert_eq!(output(out).trim(), all[0].id);
    assert_eq!(all[0].metadata.as_ref().unwrap()["framework"], "pytest");
}

#[test]
fn test_list_filters_and_limits() {
    let log = seeded_log();

    let mut out = Vec::new();
    commands::list(&log, None, None, false, &mut out).unwrap();
    let text = output(out);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("review"));
    assert!(lines[2].contains("thread 'main' panicked"));

    let mut out = Vec::new();
    commands::list(&log, Some(1), Some(Category::Chat), true, &mut out).unwrap();
    let records: Vec<InteractionRecord> = serde_json::from_slice(&out).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].input, "what is a trait?");
}

#[test]
fn test_stats_json() {
    let log = seeded_log();
    let mut out = Vec::new();
    commands::show_stats(&log, true, &mut out).unwrap();

    let stats: UsageStats = serde_json::from_slice(&out).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.bugs, 1);
    assert_eq!(stats.chats, 1);
    assert_eq!(stats.reviews, 1);
    assert_eq!(stats.tests, 0);
}

#[test]
fn test_stats_text_has_total() {
    let log = InteractionLog::new(MemoryStore::new());
    let mut out = Vec::new();
    commands::show_stats(&log, false, &mut out).unwrap();

    let text = output(out);
    assert!(text.lines().any(|l| l.starts_with("Total") && l.ends_with(" 0")));
}

#[test]
fn test_chat_show_and_clear() {
    let log = seeded_log();

    let mut out = Vec::new();
    commands::chat_show(&log, true, &mut out).unwrap();
    let messages: Vec<ChatMessage> = serde_json::from_slice(&out).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "what is a trait?");
    assert_eq!(messages[1].timestamp, messages[0].timestamp + 1);

    let mut out = Vec::new();
    commands::remove(&log, Category::Chat, &mut out).unwrap();
    assert_eq!(output(out).trim(), "Removed 1 chat record(s)");

    let remaining: Vec<_> = log.all().into_iter().map(|r| r.category).collect();
    assert_eq!(remaining, vec![Category::Review, Category::Debugging]);
}

#[test]
fn test_clear_empties_history() {
    let log = seeded_log();
    commands::clear(&log, &mut Vec::new()).unwrap();
    assert!(log.all().is_empty());
}

#[test]
fn test_export_import_between_stores() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("history.json");

    let source = seeded_log();
    commands::export(&source, Some(&file), &mut Vec::new()).unwrap();

    let target = InteractionLog::new(MemoryStore::new());
    let mut out = Vec::new();
    commands::import(&target, &file, &mut out).unwrap();

    assert_eq!(output(out).trim(), "Imported 3 record(s)");
    assert_eq!(target.all(), source.all());
}

#[test]
fn test_export_to_stdout() {
    let source = seeded_log();
    let mut out = Vec::new();
    commands::export(&source, None, &mut out).unwrap();

    let records: Vec<InteractionRecord> = serde_json::from_slice(&out).unwrap();
    assert_eq!(records, source.all());
}

#[test]
fn test_import_rejects_garbage() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("bad.json");
    std::fs::write(&file, "{\"not\": \"a list\"}").unwrap();

    let log = seeded_log();
    assert!(commands::import(&log, &file, &mut Vec::new()).is_err());
    assert_eq!(log.all().len(), 3);
}

#[test]
fn test_import_failure_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("history.json");
    std::fs::write(&file, "[]").unwrap();

    let log = seeded_log();
    log.store().set_failing(true);
    assert!(commands::import(&log, &file, &mut Vec::new()).is_err());
}

// ============================================================================
// STATE AND CONFIG
// ============================================================================

#[test]
fn test_app_state_sqlite_backend() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        db_path: temp_dir.path().join("data").join("devagent.db"),
        storage_key: "test_key".to_string(),
        history_limit: 2,
        backend: Backend::Sqlite,
    };

    {
        let state = AppState::new(config.clone()).unwrap();
        for i in 0..3 {
            state.log.append(Category::Refactor, i.to_string(), "", None);
        }
    }

    let state = AppState::new(config).unwrap();
    let inputs: Vec<_> = state.log.all().into_iter().map(|r| r.input).collect();
    assert_eq!(inputs, vec!["2", "1"]);
}

#[test]
fn test_config_file_defaults_and_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devagent.toml");
    std::fs::write(&path, "history_limit = 25\nbackend = \"memory\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.history_limit, 25);
    assert_eq!(config.backend, Backend::Memory);
    assert_eq!(config.storage_key, "devagent_db_v1");
    assert!(config.db_path.ends_with(Path::new("devagent/devagent.db")));
}

#[test]
fn test_config_rejects_unknown_backend() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devagent.toml");
    std::fs::write(&path, "backend = \"postgres\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

// ============================================================================
// PROJECT TREE
// ============================================================================

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_tree_renders_collapsed_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop");
    write(&root, "src/cart.rs", "pub struct Cart;");
    write(&root, "Cargo.toml", "[package]");

    let mut out = Vec::new();
    commands::tree(&root, false, &mut out).await.unwrap();

    assert_eq!(output(out), "shop/\n  Cargo.toml\n  src/\n    cart.rs\n");
}

#[tokio::test]
async fn test_cat_accepts_short_and_full_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("shop");
    write(&root, "src/cart.rs", "pub struct Cart;");

    let mut out = Vec::new();
    commands::cat(&root, "shop/src/cart.rs", &mut out).await.unwrap();
    assert_eq!(output(out), "pub struct Cart;\n");

    let mut out = Vec::new();
    commands::cat(&root, "src/cart.rs", &mut out).await.unwrap();
    assert_eq!(output(out), "pub struct Cart;\n");

    assert!(commands::cat(&root, "src/missing.rs", &mut Vec::new()).await.is_err());
}
