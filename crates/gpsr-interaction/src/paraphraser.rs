//! Alternative-phrasing service backed by the chat endpoint.

use async_trait::async_trait;
use tracing::debug;

use gpsr_core::config::LlmConfig;
use gpsr_core::error::Result;
use gpsr_core::service::Rephraser;

use crate::chat_client::ChatClient;
use crate::phrasing::parse_phrasings;

/// Instruction prompt for the model: exactly three paraphrases, ordered
/// most formal to most casual, entities preserved verbatim, output as a
/// markdown list and nothing else.
pub const REPHRASE_SYSTEM_PROMPT: &str = r#"
You are tasked with generating **three paraphrased versions** of a given task command.

Your input will be a **single task command**.
Your output must be **a single Markdown list** containing **three alternative phrasings** of that command **and nothing else**.

---

### **Guidelines**

* **Complexity gradient:**

  * The **first paraphrase** should use the **most complex or formal** sentence structure.
  * Each subsequent paraphrase should become **progressively simpler and more natural**.

* **Content preservation:**

  * Keep all **entities, objects, and locations exactly the same** (e.g., "coke" must remain "coke").
  * You may **restructure the sentence** as long as meaning and entities are preserved.

* **Tone and style:**

  * Maintain a **natural, conversational tone** write as if real people might say it.
  * Avoid robotic or overly formal phrasing unless required for the most complex version.
"#;

/// Composes the chat client with the fixed rephrasing prompt and the
/// strict reply parser.
///
/// Transport, protocol and parse failures propagate unchanged; retry
/// policy, if any, belongs to the caller.
pub struct Paraphraser {
    client: ChatClient,
}

impl Paraphraser {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: ChatClient::new(config),
        }
    }

    pub fn with_client(client: ChatClient) -> Self {
        Self { client }
    }

    /// Asks the model for alternative phrasings of `task`.
    pub async fn rephrase(&self, task: &str) -> Result<Vec<String>> {
        let reply = self
            .client
            .complete(REPHRASE_SYSTEM_PROMPT, &[task])
            .await?;
        debug!(%task, reply_len = reply.len(), "received phrasing reply");
        parse_phrasings(&reply)
    }
}

#[async_trait]
impl Rephraser for Paraphraser {
    async fn rephrase(&self, task: &str) -> Result<Vec<String>> {
        Paraphraser::rephrase(self, task).await
    }
}
