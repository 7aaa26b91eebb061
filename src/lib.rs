//! # pmo-client - A typed client for the PMO platform API
//!
//! `pmo-client` wraps the PMO platform's REST API in a retry-aware, typed
//! async client built on `reqwest`. It handles bearer-token authentication,
//! bounded retries with exponential backoff, a fixed error taxonomy, and
//! page-cursor traversal, so resource operations stay pure data-shape
//! transformations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pmo_client::{Client, CustomerCreate, PageQuery};
//!
//! #[tokio::main]
//! async fn main() -> pmo_client::Result<()> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:4000")?
//!         .build()?;
//!
//!     // Authenticate; the bearer token is stored on the client.
//!     let session = client
//!         .authenticate("james.miller@huronhome.ca", "password123")
//!         .await?;
//!     println!("Authenticated: {}", session.user.name);
//!
//!     // Create a customer.
//!     let customer = client
//!         .create_customer(CustomerCreate {
//!             primary_phone: Some("+1 555 1234".to_string()),
//!             ..CustomerCreate::new("John Doe")
//!         })
//!         .await?;
//!     println!("Created customer {}", customer.id);
//!
//!     // List a page of customers.
//!     let page = client.list_customers(PageQuery::default()).await?;
//!     println!(
//!         "{} of {} customers",
//!         page.results.len(),
//!         page.pagination.total
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure resolves to an [`ApiError`] with one of seven [`ErrorKind`]s.
//! The kind fixes the retry policy: transport failures, 429s, and 5xx
//! responses are retried with exponential backoff up to the attempt budget;
//! authentication, permission, not-found, and validation failures surface
//! immediately.
//!
//! ```no_run
//! use pmo_client::{Client, ErrorKind};
//!
//! # async fn example(client: Client) {
//! match client.get_customer("c-404").await {
//!     Ok(customer) => println!("found {}", customer.name),
//!     Err(e) if e.kind == ErrorKind::NotFound => println!("no such customer"),
//!     Err(e) if e.kind == ErrorKind::Authentication => println!("re-authenticate first"),
//!     Err(e) => println!("[{}] {}", e.code, e.message),
//! }
//! # }
//! ```
//!
//! ## Retries
//!
//! The default policy makes up to 3 attempts with 1s/2s gaps. Configure it
//! through the builder:
//!
//! ```no_run
//! use pmo_client::{Backoff, Client, RetryPolicy};
//! use std::time::Duration;
//!
//! # fn example() -> pmo_client::Result<()> {
//! let client = Client::builder()
//!     .base_url("http://localhost:4000")?
//!     .retry_policy(RetryPolicy::new(5).with_backoff(Backoff::Exponential {
//!         base: Duration::from_millis(500),
//!         max: Duration::from_secs(10),
//!         jitter: true,
//!     }))
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod pagination;
mod request;
pub mod resources;
pub mod retry;
mod token;

pub use client::{Client, ClientBuilder};
pub use error::{ApiError, ErrorKind, Result};
pub use pagination::{fetch_all_pages, Page, PageQuery, Pagination};
pub use request::RequestSpec;
pub use resources::{
    auth::{AuthSession, User},
    calendar::{Attendee, AttendeeKind, Booking, BookingCreate, BookingMetadata},
    customers::{Customer, CustomerCreate, CustomerUpdate},
    linkages::{Linkage, LinkageCreate, LinkageQuery},
    tasks::{Task, TaskCreate, TaskPriority, TaskStage, TaskUpdate},
};
pub use retry::{Backoff, RetryPolicy};
pub use token::{Credential, TokenState};
