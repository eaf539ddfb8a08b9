//! Interactive console front-end for a running prompt relay
//!
//! Reads one prompt per line from stdin and prints the answer or an error.

use anyhow::Result;
use clap::Parser;
use prompt_relay::client::{
    AccountPanel, ChatSession, InMemoryMessageStore, RelayClient, StaticAuth, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "relay-chat")]
#[command(author, version, about = "AI chat assistant console", long_about = None)]
struct Args {
    /// Base URL of the relay server
    #[arg(long, env = "RELAY_SERVER_URL", default_value = "http://localhost:3000")]
    server_url: String,

    /// Show the console as signed in
    #[arg(long)]
    signed_in: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let client = RelayClient::new(&args.server_url);
    let mut session = ChatSession::new();

    let panel = AccountPanel::resolve(
        &StaticAuth(args.signed_in),
        &InMemoryMessageStore::with_messages(Vec::new()),
    );

    println!("AI Chat Assistant ({})", client.endpoint());
    println!("{}", panel.render());
    println!("Enter your prompt, or Ctrl+D to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.set_prompt(line);

        println!("Generating...");
        session.submit(&client).await;

        match session.view() {
            View::Answer(answer) => println!("Response:\n{}\n", answer),
            View::Error(error) => println!("Error: {}\n", error),
            View::Idle | View::Busy => {}
        }
    }

    Ok(())
}
