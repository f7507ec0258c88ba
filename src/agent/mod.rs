//! Conversation agent
//!
//! Owns the system prompt, the persisted conversation state, the chat
//! client, and the tool executor. One `run` call is one user turn: send the
//! transcript to the model, execute any requested tools, get the final
//! answer, persist.

use crate::chat::{ChatClient, ChatMessage, ChatOptions};
use crate::cli::config::Config;
use crate::errors::Result;
use crate::store::{HistoryStore, MemoryStore, UserDataStore};
use crate::tools::{ToolContext, ToolExecutor, ToolRegistry};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The Pixy conversation agent
pub struct Agent {
    client: ChatClient,
    executor: ToolExecutor,
    history: HistoryStore,
    memory: Arc<Mutex<MemoryStore>>,
    user_data: Arc<Mutex<UserDataStore>>,
    system_prompt: String,
    options: ChatOptions,
    history_limit: usize,
    max_tool_rounds: usize,
}

impl Agent {
    /// Build an agent from configuration, loading persisted state from
    /// `data_dir`. Missing or corrupt state files degrade to empty stores.
    pub fn new(config: &Config, ollama_url: &str, model: &str, data_dir: &Path) -> Result<Self> {
        let client = ChatClient::new(ollama_url, model)?;
        let executor = ToolExecutor::new(ToolRegistry::with_builtins(&config.tools));

        let history = HistoryStore::open(data_dir.join("history.json"));
        let memory = Arc::new(Mutex::new(MemoryStore::open(data_dir.join("memory.json"))));
        let user_data = Arc::new(Mutex::new(UserDataStore::open(
            data_dir.join("user_data.json"),
        )));

        info!(model = model, history_len = history.len(), "agent ready");

        Ok(Self {
            client,
            executor,
            history,
            memory,
            user_data,
            system_prompt: config.agent.system_prompt.clone(),
            options: ChatOptions {
                temperature: config.agent.temperature,
            },
            history_limit: config.agent.history_limit,
            max_tool_rounds: config.agent.max_tool_rounds,
        })
    }

    /// Check that the model server is reachable
    pub async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    /// One conversation turn: forward the user message, run requested
    /// tools, return the assistant's final text.
    pub async fn run(&mut self, user_message: &str, user_id: &str) -> Result<String> {
        self.history.push(ChatMessage::user(user_message));

        let ctx = ToolContext::new(
            user_id,
            Arc::clone(&self.memory),
            Arc::clone(&self.user_data),
        );
        let schemas = self.executor.registry().enabled_schemas();

        let mut rounds = 0;
        let answer = loop {
            let messages = self.transcript();
            let response = self.client.chat(&messages, &schemas, &self.options).await?;

            if !response.has_tool_calls() || rounds >= self.max_tool_rounds {
                if response.has_tool_calls() {
                    warn!(rounds, "tool round limit reached, taking answer as-is");
                }
                let answer = response.content.clone();
                self.history.push(response);
                break answer;
            }

            rounds += 1;
            debug!(round = rounds, calls = response.tool_calls.len(), "executing tool calls");

            let calls = response.tool_calls.clone();
            self.history.push(response);
            for call in &calls {
                let result = self.executor.dispatch(call, &ctx).await;
                self.history
                    .push(ChatMessage::tool(result.tool_name, result.content));
            }
        };

        self.persist_history();

        if self.history.len() > self.history_limit {
            if let Err(e) = self.summarize_oldest(self.history_limit / 2).await {
                warn!(error = %e, "history summarization failed, keeping full transcript");
            }
        }

        Ok(answer)
    }

    /// Summarize everything but the `keep` most recent messages into one
    /// system message through the model, then persist.
    pub async fn summarize_oldest(&mut self, keep: usize) -> Result<()> {
        if self.history.len() <= keep {
            return Ok(());
        }

        let split = self.history.len() - keep;
        let mut prompt = String::from(
            "Summarize the following conversation, focusing on the key concepts \
             and important points. Keep the summary concise.\n",
        );
        for msg in &self.history.messages()[..split] {
            prompt.push_str(&format!("{:?}: {}\n", msg.role, msg.content));
        }

        let response = self
            .client
            .chat(&[ChatMessage::user(prompt)], &[], &self.options)
            .await?;

        info!(summarized = split, kept = keep, "replaced oldest history with summary");
        self.history.replace_oldest_with_summary(
            keep,
            ChatMessage::system(format!("Summary of key points: {}", response.content)),
        );
        self.persist_history();
        Ok(())
    }

    /// Transcript sent to the model: system prompt plus the full history
    fn transcript(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(self.history.messages().iter().cloned());
        messages
    }

    /// Save the history; a failed save degrades the session, never aborts it
    fn persist_history(&self) {
        if let Err(e) = self.history.save() {
            warn!(error = %e, "failed to save history, continuing in memory");
        }
    }
}
