//! Adapters that call the real remote APIs.

pub mod openai;
