//! Create a category and an item with two variants.
//!
//! Run with: LOYVERSE_ACCESS_TOKEN=... cargo run --example create_item

use loyverse_rs::models::{NewCategory, NewItem};
use loyverse_rs::{Error, LoyverseClient};
use serde_json::json;

#[tokio::main]
async fn main() -> loyverse_rs::Result<()> {
    tracing_subscriber::fmt::init();

    let client = LoyverseClient::from_env()?;

    let category = client
        .categories()
        .create(&NewCategory::new("Coffee").with_color("BROWN"))
        .await?;
    let category_id = category["id"].as_str().unwrap_or_default();
    println!("Created category {}", category_id);

    let item = NewItem::new("Latte")
        .with_category(category_id)
        .with_track_stock(true)
        .with_variant(json!({"option1_value": "Small", "sku": "LATTE-S", "default_price": 3.5}))
        .with_variant(json!({"option1_value": "Large", "sku": "LATTE-L", "default_price": 4.5}));

    match client.items().create(&item).await {
        Ok(created) => println!("Created item {}", created["id"]),
        Err(Error::BadRequest(err)) => {
            println!("Rejected: {:?}", err.message);
            if let Some(details) = err.details {
                println!("Details: {}", details);
            }
        }
        Err(err) => return Err(err),
    }

    Ok(())
}
