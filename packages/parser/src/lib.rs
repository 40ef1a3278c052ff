//! # Scribe Parser
//!
//! Turns a natural-language instruction into a sequence of
//! [`Operation`](scribe_common::Operation)s.
//!
//! Two tiers, first success wins:
//!
//! 1. **Model tier**: prompt a [`CompletionProvider`] and pull a JSON array
//!    of operations out of whatever text comes back.
//! 2. **Keyword tier**: deterministic heuristics over the instruction. Always
//!    yields at least one operation.
//!
//! ```rust,ignore
//! use scribe_parser::{CommandParser, OpenAiProvider, ParserOptions};
//!
//! let provider = Arc::new(OpenAiProvider::new(api_key));
//! let parser = CommandParser::new(provider, ParserOptions::default());
//! let operations = parser.parse_instruction("添加一段话“项目已完成”", "").await;
//! ```

pub mod completion;
pub mod error;
pub mod extract;
pub mod heuristics;
pub mod openai;
pub mod parser;
pub mod prompt;

pub use completion::{CompletionProvider, CompletionRequest, CompletionResponse, Message, Role};
pub use error::{CompletionError, CompletionResult, ParseError};
pub use openai::OpenAiProvider;
pub use parser::{CommandParser, ParserOptions};
