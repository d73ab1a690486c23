//! Classifier module - intent classification backends
//!
//! Provides the classifier contract plus an OpenAI-compatible implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiClassifier;
pub use traits::{Decision, IntentClassifier};
