//! Verify a webhook delivery and decode its event.
//!
//! Reads the secret from `LOYVERSE_WEBHOOK_SECRET` (defaults to `secret`)
//! and checks a sample payload signed with it.
//!
//! Run with: cargo run --example verify_webhook

use loyverse_rs::models::WebhookEventType;
use loyverse_rs::webhook::{WebhookVerifier, SIGNATURE_HEADER};

fn main() -> loyverse_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let secret = std::env::var("LOYVERSE_WEBHOOK_SECRET").unwrap_or_else(|_| "secret".to_string());
    let verifier = WebhookVerifier::new(secret);

    let body = br#"{
        "event_type": "ORDER_CREATED",
        "data": {"receipt_number": "1-1001", "total_money": 12.5},
        "timestamp": "2024-05-01T12:00:00.000Z"
    }"#;

    // A real receiver would read this from the request headers
    let signature = verifier.sign(body);
    println!("{}: {}", SIGNATURE_HEADER, signature);

    let event = verifier.parse(body, Some(&signature))?;
    match event.event_type {
        WebhookEventType::OrderCreated => {
            println!("New receipt {}", event.data["receipt_number"]);
        }
        other => println!("Ignoring {} event", other),
    }

    let tampered = verifier.verify(b"{\"event_type\":\"ORDER_CREATED\"}", Some(&signature));
    println!("Tampered payload accepted: {}", tampered);

    Ok(())
}
