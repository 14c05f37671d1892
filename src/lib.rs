// Core layer - shared types and configuration
pub mod core;

// Chat layer - transport seam: line model, handler trait, dispatch
pub mod chat;

// Features layer - all feature modules
pub mod features;

// Console layer - operator commands
pub mod console;

// Re-export core config for convenience
pub use core::Config;

// Re-export the chat seam
pub use chat::{ChatLine, HandlerContext, HandlerRegistry, LineHandler, Reply};

// Re-export feature items
pub use features::{
    // Choices
    ChoicesHandler,
    // Dice
    DiceHandler,
    // Eightball
    EightBallHandler,
    // Reminders
    DeliveryHandler, Message, RecipientKey, RemindHandler, Reminds,
};

// Re-export console items
pub use console::ConsoleCommand;
