//! Basic usage example.
//!
//! Builds a client from environment variables, lists categories and items,
//! then pages through recent receipts one page at a time.
//!
//! Run with: LOYVERSE_ACCESS_TOKEN=... cargo run --example basic_usage

use chrono::{Duration, Utc};
use loyverse_rs::api::{ItemsQuery, ReceiptsQuery};
use loyverse_rs::models::SortOrder;
use loyverse_rs::{ListOptions, LoyverseClient};

#[tokio::main]
async fn main() -> loyverse_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = LoyverseClient::from_env()?;

    let categories = client.categories().list().await?;
    println!("Found {} categories:", categories.len());
    for category in &categories {
        println!("  - {}", category["name"].as_str().unwrap_or("(unnamed)"));
    }

    let week_ago = Utc::now() - Duration::days(7);
    let items = client.items().list(&ItemsQuery::since(week_ago)).await?;
    println!("\n{} items changed in the last week", items.len());

    // Page through receipts manually, newest first
    let query = ReceiptsQuery::default().order(SortOrder::Desc);
    let mut options = ListOptions::single_page().with_limit(50);
    let mut pages = 0;

    loop {
        let page = client.receipts().list_page(&query, options.clone()).await?;
        pages += 1;
        println!("\nPage {} ({} receipts):", pages, page.len());
        for receipt in &page {
            println!(
                "  #{} total={}",
                receipt["receipt_number"].as_str().unwrap_or("?"),
                receipt["total_money"]
            );
        }

        match page.cursor() {
            Some(cursor) if pages < 3 => options = options.with_cursor(cursor),
            _ => break,
        }
    }

    Ok(())
}
