//! Usage statistics over the interaction log.

use crate::Category;
use serde::{Deserialize, Serialize};

/// Per-category record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of records in the log.
    pub total: usize,
    pub tests: usize,
    pub bugs: usize,
    pub reviews: usize,
    pub refactors: usize,
    pub logs: usize,
    pub chats: usize,
}

impl UsageStats {
    /// Count for a single category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::TestGeneration => self.tests,
            Category::Debugging => self.bugs,
            Category::Review => self.reviews,
            Category::Refactor => self.refactors,
            Category::LogAnalysis => self.logs,
            Category::Chat => self.chats,
        }
    }

    /// Mutable counter for a single category.
    pub fn count_mut(&mut self, category: Category) -> &mut usize {
        match category {
            Category::TestGeneration => &mut self.tests,
            Category::Debugging => &mut self.bugs,
            Category::Review => &mut self.reviews,
            Category::Refactor => &mut self.refactors,
            Category::LogAnalysis => &mut self.logs,
            Category::Chat => &mut self.chats,
        }
    }

    /// `(category, count)` pairs in dashboard order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.count(c)))
    }
}
