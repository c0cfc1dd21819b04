//! Walk through the built-in actions against hand-built trackers.
//!
//! Run with: cargo run -p agent-actions --example walk_actions
//!
//! The user lookup goes to `API_USERS_URL` (default: the public demo API),
//! so that step needs network access.

use action_core::{IntentPrediction, LatestMessage, Tracker};
use agent_actions::{default_registry, ActionRegistry, ActionsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agent_actions=debug".parse()?)
                .add_directive("transfer_form=debug".parse()?),
        )
        .init();

    println!("=== Agent Actions Walkthrough ===\n");

    let registry = default_registry(&ActionsConfig::from_env()?)?;

    println!("Registered actions:");
    for (name, desc) in registry.get_descriptions() {
        println!("  - {}: {}", name, desc);
    }
    println!();

    walk_transfer_form(&registry).await?;
    walk_disambiguation(&registry).await?;
    walk_user_lookup(&registry).await?;

    println!("\n=== Done ===");
    Ok(())
}

async fn walk_transfer_form(registry: &ActionRegistry) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Transfer form ---");

    let turns = vec![
        Tracker::new("demo").with_latest_message(LatestMessage::new("je veux envoyer via momo", "transfer_money")),
        Tracker::new("demo")
            .with_slot("transfer_type", "mobile_money")
            .with_slot("requested_slot", "amount")
            .with_latest_message(LatestMessage::new("12 500", "provide_info")),
        Tracker::new("demo")
            .with_slot("transfer_type", "mobile_money")
            .with_slot("amount", "12500")
            .with_slot("requested_slot", "phone_number")
            .with_latest_message(LatestMessage::new("237 677 12 34 56", "provide_info")),
    ];

    for tracker in turns {
        let response = registry.run("validate_transfer_form", &tracker).await?;
        for event in &response.events {
            println!("  {}", event.description());
        }
        for text in response.texts() {
            println!("  bot: {}", text);
        }
    }

    let done = Tracker::new("demo")
        .with_slot("transfer_type", "mobile_money")
        .with_slot("amount", "12500")
        .with_slot("phone_number", "677123456");
    let response = registry.run("action_submit_transfer", &done).await?;
    println!("  bot: {}", response.texts().join(" / "));
    println!();
    Ok(())
}

async fn walk_disambiguation(registry: &ActionRegistry) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Disambiguation ---");

    let message = LatestMessage::new("euh", "nlu_fallback").with_ranking(vec![
        IntentPrediction::new("nlu_fallback", 0.5),
        IntentPrediction::new("transfer_money", 0.3),
        IntentPrediction::new("ask_user_info", 0.2),
    ]);
    let response = registry
        .run("action_default_ask_affirmation", &Tracker::new("demo").with_latest_message(message))
        .await?;
    for message in &response.responses {
        for button in &message.buttons {
            println!("  [{}] -> {}", button.title, button.payload);
        }
    }
    println!();
    Ok(())
}

async fn walk_user_lookup(registry: &ActionRegistry) -> Result<(), Box<dyn std::error::Error>> {
    println!("--- User lookup ---");

    for id in ["4", "11", "abc"] {
        let tracker = Tracker::new("demo").with_slot("user_id", id);
        let response = registry.run("action_get_user_info", &tracker).await?;
        println!("  id {}: {}", id, response.texts().join(" / "));
    }
    Ok(())
}
