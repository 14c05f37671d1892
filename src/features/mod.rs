// Features layer - all feature modules
pub mod choices;
pub mod dice;
pub mod eightball;
pub mod reminders;

// Re-export handler types for registration convenience
pub use choices::ChoicesHandler;
pub use dice::DiceHandler;
pub use eightball::EightBallHandler;
pub use reminders::{DeliveryHandler, Message, RecipientKey, RemindHandler, Reminds};
