pub mod client;
pub mod handlers;
mod prompts;
mod services;

pub use client::{CompletionClient, OpenAiClient};
pub use handlers::classify_routes;
pub use services::{advise, classify};
