use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use anzu::chat::{ChatLine, HandlerContext, HandlerRegistry, Reply};
use anzu::console::ConsoleCommand;
use anzu::core::Config;
use anzu::features::choices::ChoicesHandler;
use anzu::features::dice::DiceHandler;
use anzu::features::eightball::EightBallHandler;
use anzu::features::reminders::{DeliveryHandler, RemindHandler, Reminds};

/// Build the handler registry with every feature enabled.
///
/// The scheduling handler runs before the delivery poll so a freshly queued
/// zero-delay reminder is confirmed before the same line can deliver it.
fn build_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(RemindHandler::new()));
    registry.register(Arc::new(DeliveryHandler::new()));
    registry.register(Arc::new(DiceHandler::new()));
    registry.register(Arc::new(EightBallHandler::new()));
    registry.register(Arc::new(ChoicesHandler::new()));
    registry
}

/// Parse a console-injected chat line: `<#channel> <nick> <text...>`.
///
/// Lets an operator exercise the dispatch path by hand; the IRC transport
/// feeds real traffic through the same [`HandlerRegistry::dispatch`] call.
fn parse_injected_line(input: &str) -> Option<ChatLine> {
    let mut parts = input.splitn(3, ' ');
    let target = parts.next()?;
    if !target.starts_with('#') {
        return None;
    }
    let nick = parts.next()?;
    let text = parts.next()?;
    Some(ChatLine::new(nick, target, text))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    info!("Starting {} for {}:{}", config.nick, config.server, config.port);

    let reminds = Arc::new(Reminds::from_config(&config));
    reminds.start()?;
    info!("Loaded {} pending reminders", reminds.len());

    let registry = build_registry();
    let ctx = Arc::new(HandlerContext::new(reminds.clone(), config));

    info!("Console ready: save [file] | load [file] | list | quit, or `#chan nick text` to inject a line");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(input) = lines.next_line().await? {
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = ConsoleCommand::parse(input) {
            if command == ConsoleCommand::Quit {
                break;
            }
            match command.run(&reminds) {
                Ok(output) => println!("{output}"),
                Err(e) => error!("Console command failed: {e:#}"),
            }
            continue;
        }

        if let Some(line) = parse_injected_line(input) {
            for reply in registry.dispatch(ctx.clone(), &line).await {
                match reply {
                    Reply::Channel(text) => println!("[{}] {}", line.target, text),
                    Reply::Notice(text) => println!("[notice -> {}] {}", line.nick, text),
                }
            }
            continue;
        }

        println!("unknown command: {input}");
    }

    reminds.exit()?;
    info!("Reminder snapshots saved, bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_features() {
        assert_eq!(build_registry().len(), 5);
    }

    #[test]
    fn test_parse_injected_line() {
        let line = parse_injected_line("#chan alice -roll the dice").unwrap();
        assert_eq!(line.target, "#chan");
        assert_eq!(line.nick, "alice");
        assert_eq!(line.text, "-roll the dice");
    }

    #[test]
    fn test_parse_injected_line_rejects_non_channel() {
        assert!(parse_injected_line("alice hi").is_none());
        assert!(parse_injected_line("#chan alice").is_none());
    }
}
