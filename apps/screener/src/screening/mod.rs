// Resume screening: one ranking call per submit, driven by a status machine.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod controller;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod ranking_client;
pub mod view;

pub use models::{FailureKind, ScreeningFailure};
