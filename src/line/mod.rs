pub mod client;
pub mod dto;
pub mod messages;
pub mod signature;

pub use client::{LineClient, MessagingClient};
pub use messages::{Action, Message};
