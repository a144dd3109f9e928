//! Collaborator seams for the operation controller.
//!
//! Both collaborators are defined as single-method traits so the real
//! implementations (the grammar engine, the LLM paraphraser) can be
//! swapped for deterministic doubles in tests.

use async_trait::async_trait;

use crate::command::Category;
use crate::error::Result;

/// The external grammar-driven command generator.
///
/// The core assumes nothing beyond "returns non-empty task text"; the
/// real engine lives outside this workspace.
#[async_trait]
pub trait CommandGenerator: Send + Sync {
    async fn generate(&self, category: Category) -> Result<String>;
}

/// Produces alternative phrasings of a task command.
#[async_trait]
pub trait Rephraser: Send + Sync {
    async fn rephrase(&self, task: &str) -> Result<Vec<String>>;
}
