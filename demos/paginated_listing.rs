//! Paginated Listing
//!
//! This example collects every item of a cursor-paginated listing.
//!
//! Key concepts:
//! - A step function that fetches one page and returns the next request
//! - `Page::from_json` decoding the response body
//! - The same listing collected with `Deferred` futures and with a
//!   Stillwater effect reading its environment
//!
//! Run with: cargo run --example paginated_listing

use collect_until::core::{collect_until, Concat};
use collect_until::effects::{Deferred, Effectful};
use collect_until::{Page, PageError, PageRequest};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::effect::{BoxedEffect, Effect};
use stillwater::prelude::*;

type Step = (Vec<String>, Option<PageRequest>);

/// Fake listing endpoint: cursor -> JSON body.
#[derive(Clone)]
struct ListingServer {
    bodies: Arc<HashMap<Option<String>, String>>,
}

impl ListingServer {
    fn new() -> Self {
        let mut bodies = HashMap::new();
        bodies.insert(
            None,
            r#"{"results": ["alpha", "beta"], "next_cursor": "p2", "has_more": true}"#.to_string(),
        );
        bodies.insert(
            Some("p2".to_string()),
            r#"{"results": ["gamma"], "next_cursor": "p3", "has_more": true}"#.to_string(),
        );
        bodies.insert(
            Some("p3".to_string()),
            r#"{"results": ["delta", "epsilon"], "next_cursor": null, "has_more": false}"#
                .to_string(),
        );
        Self {
            bodies: Arc::new(bodies),
        }
    }

    fn get(&self, request: &PageRequest) -> Result<Page<String>, PageError> {
        let key = request.cursor.as_ref().map(|c| c.as_str().to_string());
        println!("  [GET] page {} (cursor: {:?})", request.index, key);
        let body = self.bodies.get(&key).map(String::as_str).unwrap_or("{}");
        Page::from_json(body)
    }
}

fn main() {
    println!("=== Paginated Listing Example ===\n");

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");

    // Deferred: each step is a boxed future
    println!("Collecting with Deferred futures:");
    let server = ListingServer::new();
    let collector = collect_until(Deferred::<PageError>::new(), Concat).run(
        move |request: PageRequest| -> BoxFuture<'static, Result<Step, PageError>> {
            let server = server.clone();
            async move {
                let page = server.get(&request)?;
                Ok::<_, PageError>(page.into_step(&request))
            }
            .boxed()
        },
    );
    let items: Result<Vec<String>, PageError> =
        runtime.block_on(collector.collect(PageRequest::first()));
    println!("  Items: {:?}\n", items);

    // Effectful: the server is the environment
    println!("Collecting with a Stillwater effect:");
    let collector = collect_until(Effectful::<PageError, ListingServer>::new(), Concat).run(
        |request: PageRequest| -> BoxedEffect<Step, PageError, ListingServer> {
            from_fn(move |server: &ListingServer| {
                server.get(&request).map(|page| page.into_step(&request))
            })
            .boxed()
        },
    );
    let effect: BoxedEffect<Vec<String>, PageError, ListingServer> =
        collector.collect(PageRequest::first());
    let items = runtime.block_on(effect.run(&ListingServer::new()));
    println!("  Items: {:?}\n", items);

    println!("Key Takeaways:");
    println!("- The step function only knows how to fetch one page");
    println!("- collect_until drives it until no cursor is returned");
    println!("- The effect type decides when and how each step runs");

    println!("\n=== Example Complete ===");
}
