use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use anyhow::Result;
use clap::Parser;
use client_core::{
    config::{load_settings, resolve_backend_base},
    RecommendClient, DEFAULT_PROMPT, QUICK_PROMPTS,
};
use shared::protocol::DEFAULT_TOP_K;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

use render::ConsoleRenderer;

#[derive(Parser, Debug)]
struct Args {
    /// Site description to analyze; defaults to a sample urban arterial prompt.
    #[arg(long)]
    prompt: Option<String>,
    /// Use one of the built-in quick prompts (1-4) instead of --prompt.
    #[arg(long)]
    quick: Option<u8>,
    /// Backend base URL; overrides BACKEND_URL and recommender.toml.
    #[arg(long)]
    backend_url: Option<String>,
    /// How many recommendations to request.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: u32,
    /// Keep reading prompts from stdin after the first query, one per line.
    #[arg(long)]
    interactive: bool,
    /// Disable ANSI styling.
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();
    let args = Args::parse();

    let settings = load_settings();
    let raw_base = args.backend_url.unwrap_or_else(|| settings.backend_url.clone());
    let backend_base = resolve_backend_base(&raw_base)?;
    debug!(
        backend_base = %backend_base,
        timeout_secs = settings.request_timeout_secs,
        "resolved backend"
    );

    let client = RecommendClient::new_with_options(
        backend_base,
        args.top_k,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let renderer = ConsoleRenderer::new(!args.no_color);

    let prompt = if let Some(n) = args.quick {
        let index = usize::from(n);
        if index == 0 || index > QUICK_PROMPTS.len() {
            anyhow::bail!("--quick must be between 1 and {}", QUICK_PROMPTS.len());
        }
        QUICK_PROMPTS[index - 1].to_string()
    } else {
        args.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string())
    };

    print!("{}", renderer.header());
    run_query(&client, &renderer, &prompt).await;

    if args.interactive {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else { break };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            run_query(&client, &renderer, &line).await;
        }
    }

    print!("{}", renderer.footer(client.backend_base()));
    Ok(())
}

async fn run_query(client: &RecommendClient, renderer: &ConsoleRenderer, prompt: &str) {
    if prompt.trim().is_empty() {
        return;
    }
    print!("{}", renderer.status_line(prompt));
    client.submit(prompt).await;
    let snapshot = client.snapshot().await;
    print!("{}", renderer.render(&snapshot));
}

/// Log filter from `RUST_LOG` when set, otherwise quiet at warn.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
