//! A toy faucet endpoint: POST a json body, get a plain-text receipt.
//!
//! Run with `cargo run --example faucet`, then:
//!
//! ```text
//! curl -d '{"address": "abc"}' -H 'Content-Type: application/json' 127.0.0.1:8080
//! ```

use std::sync::Arc;

use simple_http::codec::MessageBuilder;
use simple_http::connection::Session;
use simple_http::protocol::ParsedMessage;
use simple_http::server::Server;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = match Server::bind("127.0.0.1:8080", handle_fund_request).await {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    info!(port = 8080, "start listening");
    if let Err(e) = server.run().await {
        error!(cause = %e, "server stopped");
    }
}

fn handle_fund_request(session: Arc<Session>, message: ParsedMessage) {
    let body = std::str::from_utf8(message.body()).unwrap_or("");
    info!(method = message.method().unwrap_or("-"), body, "received request");

    // failures are reported in the body text, the framing stays 200 OK
    let reply = match message.header("Content-Type") {
        Some("application/json") => format!("ok, accepted {} bytes\n", body.len()),
        Some(other) => format!("rejected: unsupported content type {other}\n"),
        None => "rejected: missing content type\n".to_string(),
    };

    let mut builder = MessageBuilder::new();
    builder.write_content(&reply, "text/plain");
    session.write(builder.into_message());
}
