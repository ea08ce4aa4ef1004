//! Generation port and logged agent tasks.
//!
//! The backend that turns prompts into text lives outside this crate. It is
//! reached only through [`Generator`].

use crate::interaction_log::InteractionLog;
use crate::kv::KeyValueStore;
use crate::Result;
use devagent_types::{Category, ChatMessage, InteractionRecord};
use tracing::{debug, warn};

/// Text generation backend.
pub trait Generator {
    /// Run one agent task. `secondary` carries task-specific extra text, such
    /// as an error log for debugging or a framework name for test generation.
    fn generate(&self, category: Category, primary: &str, secondary: Option<&str>) -> Result<String>;

    /// Reply to `message` given the transcript so far.
    fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String>;
}

/// Run a non-chat agent task and record it in the log.
///
/// Generation errors are returned to the caller, which is expected to show a
/// fallback message. Nothing is logged for a failed generation.
pub fn run_task<S: KeyValueStore>(
    log: &InteractionLog<S>,
    generator: &dyn Generator,
    category: Category,
    primary: &str,
    secondary: Option<&str>,
) -> Result<InteractionRecord> {
    let output = generator
        .generate(category, primary, secondary)
        .inspect_err(|e| warn!(target: "devagent::agent", "{} task failed: {}", category, e))?;

    let metadata = secondary.map(|extra| {
        let mut map = serde_json::Map::new();
        map.insert("secondary".to_string(), serde_json::Value::String(extra.to_string()));
        map
    });

    debug!(target: "devagent::agent", "{} task produced {} bytes", category, output.len());
    Ok(log.append(category, primary, output, metadata))
}
