//! Conversation state and tool-call types for the tool loop.
//!
//! # Main types
//!
//! - [`Conversation`]: append-only message list owned by one loop run.
//! - [`ToolCall`]: a raw tool-call record as a transport returned it.
//! - [`ToolInvocation`]: the single tool request a parsing strategy extracted from
//!   a model response; dispatched by the loop and recorded on the assistant message.
//!
//! # Example
//!
//! ```rust
//! use toolloop::{Conversation, Message};
//!
//! let mut conversation = Conversation::new("You are a helpful assistant.", "What is 2+2?");
//! conversation.push_assistant("4", None);
//! assert_eq!(conversation.len(), 3);
//! assert!(matches!(conversation.messages()[0], Message::System(_)));
//! ```

pub mod conversation;

pub use conversation::{Conversation, ToolCall, ToolInvocation};
