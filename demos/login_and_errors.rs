//! Example demonstrating authentication and error handling.
//!
//! This example shows how to:
//! - Authenticate and let the client manage the bearer token
//! - Match on error kinds to drive different recovery paths
//! - Inspect the machine code, status, and detail on an error
//!
//! Run with: `cargo run --example login_and_errors`

use pmo_client::{Client, CustomerCreate, ErrorKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("pmo_client=info")
        .init();

    let client = Client::builder().base_url("http://localhost:4000")?.build()?;

    println!("=== Step 1: Authenticate ===");
    match client
        .authenticate("james.miller@huronhome.ca", "password123")
        .await
    {
        Ok(session) => {
            println!("Authenticated as {}", session.user.name);
            println!("Token valid: {}", client.is_authenticated());
        }
        Err(e) if e.kind == ErrorKind::Authentication => {
            println!("Bad credentials: {}", e.message);
            return Ok(());
        }
        Err(e) if e.kind == ErrorKind::Transport => {
            println!("Server unreachable after retries: {}", e.message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!("\n=== Step 2: Fetch a customer that may not exist ===");
    match client.get_customer("invalid-uuid").await {
        Ok(customer) => println!("Found: {}", customer.name),
        Err(e) if e.kind == ErrorKind::NotFound => println!("Not found: {}", e.message),
        Err(e) => {
            println!("API error [{}]: {}", e.code, e.message);
            if let Some(status) = e.http_status {
                println!("  Status: {}", status.as_u16());
            }
            if let Some(detail) = &e.detail {
                println!("  Detail: {detail}");
            }
            println!("  Retryable: {}", e.is_retryable());
        }
    }

    println!("\n=== Step 3: Create a customer ===");
    let customer = client
        .create_customer(CustomerCreate {
            primary_phone: Some("+1 555 1234".to_string()),
            city: Some("Toronto".to_string()),
            province: Some("ON".to_string()),
            ..CustomerCreate::new("John Doe")
        })
        .await?;
    println!("Created customer {}", customer.id);

    Ok(())
}
