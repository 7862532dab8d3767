//! Multi-turn flow without a session store.
//!
//! image -> food card (signed eat token) -> eat postback -> record saved + location prompt
//! -> location message -> latest record located. Decline, commands and free text
//! leave nothing behind.

mod command;
pub mod handlers;
mod postback;
pub mod services;
mod token;

pub use handlers::webhook_routes;
pub use services::food_card;
