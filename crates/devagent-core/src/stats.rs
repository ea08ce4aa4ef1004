//! Usage statistics projection.

use devagent_types::{InteractionRecord, UsageStats};

/// Count records per category. Recomputed on every call.
pub fn stats(records: &[InteractionRecord]) -> UsageStats {
    let mut stats = UsageStats {
        total: records.len(),
        ..UsageStats::default()
    };
    for record in records {
        *stats.count_mut(record.category) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InteractionLog, MemoryStore};
    use devagent_types::Category;

    #[test]
    fn test_empty_log_is_all_zero() {
        let stats = stats(&[]);
        assert_eq!(stats, UsageStats::default());
        assert_eq!(stats.total, 0);
        assert!(stats.entries().all(|(_, count)| count == 0));
    }

    #[test]
    fn test_single_debugging_record() {
        let log = InteractionLog::new(MemoryStore::new());
        log.append(Category::Debugging, "trace", "fix", None);

        let stats = stats(&log.all());
        assert_eq!(stats.bugs, 1);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.count(Category::Debugging), 1);
        assert_eq!(stats.count(Category::Chat), 0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let log = InteractionLog::new(MemoryStore::new());
        for category in Category::ALL {
            log.append(category, "", "", None);
        }
        log.append(Category::Chat, "", "", None);
        log.append(Category::TestGeneration, "", "", None);

        let stats = stats(&log.all());
        assert_eq!(stats.total, 8);
        assert_eq!(stats.chats, 2);
        assert_eq!(stats.tests, 2);
        assert_eq!(stats.entries().map(|(_, c)| c).sum::<usize>(), stats.total);
    }

    #[test]
    fn test_reflects_current_log() {
        let log = InteractionLog::new(MemoryStore::new());
        log.append(Category::Chat, "a", "b", None);
        assert_eq!(stats(&log.all()).chats, 1);

        log.remove_category(Category::Chat);
        assert_eq!(stats(&log.all()).chats, 0);
    }
}
