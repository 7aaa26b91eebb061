//! Example demonstrating full pagination traversal.
//!
//! Run with: `cargo run --example paginate_customers`

use pmo_client::{fetch_all_pages, Client, PageQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("pmo_client=info")
        .init();

    let client = Client::builder().base_url("http://localhost:4000")?.build()?;

    client
        .authenticate("james.miller@huronhome.ca", "password123")
        .await?;

    // One page at a time.
    let first = client
        .list_customers(PageQuery::default().with_limit(100))
        .await?;
    println!(
        "Page {} of {}: {} customers, more: {}",
        first.pagination.page,
        first.pagination.total_pages,
        first.results.len(),
        first.pagination.has_more,
    );

    // Or walk every page in order.
    let all = fetch_all_pages(|page| {
        let client = client.clone();
        async move {
            client
                .list_customers(PageQuery::page(page).with_limit(100))
                .await
        }
    })
    .await?;
    println!("Fetched {} customers in total", all.len());

    Ok(())
}
