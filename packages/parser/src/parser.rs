use crate::extract::extract_operations;
use crate::openai::DEFAULT_MODEL;
use crate::prompt::{instruction_prompt, DOCUMENT_CONTEXT_CHARS};
use crate::{heuristics, CompletionProvider, CompletionRequest, Message, ParseError};
use scribe_common::Operation;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub model: String,
    pub temperature: f32,
    /// Upper bound on one completion call
    pub timeout: Duration,
    /// Characters of the document sent as context
    pub context_chars: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(30),
            context_chars: DOCUMENT_CONTEXT_CHARS,
        }
    }
}

/// Natural language → operations
pub struct CommandParser {
    provider: Option<Arc<dyn CompletionProvider>>,
    options: ParserOptions,
}

impl CommandParser {
    pub fn new(provider: Arc<dyn CompletionProvider>, options: ParserOptions) -> Self {
        Self {
            provider: Some(provider),
            options,
        }
    }

    /// Parser that never calls a model
    pub fn heuristic_only() -> Self {
        Self {
            provider: None,
            options: ParserOptions::default(),
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `instruction` against the current document text.
    ///
    /// Never fails and never returns an empty list: anything that goes wrong
    /// in the model tier drops to the keyword tier.
    pub async fn parse_instruction(&self, instruction: &str, document_text: &str) -> Vec<Operation> {
        match self.parse_with_model(instruction, document_text).await {
            Ok(operations) => {
                info!(count = operations.len(), "Parsed instruction with model");
                operations
            }
            Err(ParseError::NoProvider) => {
                debug!("No completion provider, using keyword parsing");
                heuristics::parse(instruction)
            }
            Err(e) => {
                warn!(error = %e, "Model parsing failed, falling back to keyword parsing");
                heuristics::parse(instruction)
            }
        }
    }

    /// Model tier alone. `Ok` is always non-empty.
    pub async fn parse_with_model(
        &self,
        instruction: &str,
        document_text: &str,
    ) -> Result<Vec<Operation>, ParseError> {
        let provider = self.provider.as_ref().ok_or(ParseError::NoProvider)?;

        let prompt = instruction_prompt(instruction, document_text, self.options.context_chars);
        let request = CompletionRequest::new(self.options.model.clone(), vec![Message::user(prompt)])
            .with_temperature(self.options.temperature);

        debug!(provider = provider.name(), model = %self.options.model, "Requesting operations");

        let response = tokio::time::timeout(self.options.timeout, provider.complete(request))
            .await
            .map_err(|_| ParseError::Timeout(self.options.timeout))??;

        let operations = extract_operations(&response.content)?;
        if operations.is_empty() {
            return Err(ParseError::NoOperations);
        }
        Ok(operations)
    }
}
