use clap::{Arg, Command};
use std::env;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod agent;
mod error;
mod mcp;
mod results;
mod tools;
mod utils;

use agent::{AgentDescriptor, DEFAULT_MODEL};
use mcp::server::McpServer;
use utils::pdf::LopdfEngine;

/// Prints a framed, centered block of lines to stderr.
fn print_box(lines: &[&str]) {
    const BOX_WIDTH: usize = 60;
    const CONTENT_WIDTH: usize = BOX_WIDTH - 4;

    eprintln!("\n\x1b[36m╔{}╗", "═".repeat(BOX_WIDTH - 2));
    for line in lines {
        let visible_len = strip_ansi_codes(line).chars().count();
        if visible_len >= CONTENT_WIDTH {
            eprintln!("║  {}\x1b[36m  ║", line);
            continue;
        }
        let padding = CONTENT_WIDTH - visible_len;
        let left = padding / 2;
        eprintln!(
            "║  {}{}{}\x1b[36m║",
            " ".repeat(left),
            line,
            " ".repeat(padding - left)
        );
    }
    eprintln!("╚{}╝\x1b[0m\n", "═".repeat(BOX_WIDTH - 2));
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            result.push(ch);
            continue;
        }
        if chars.next() == Some('[') {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        }
    }

    result
}

#[tokio::main]
async fn main() {
    let matches = Command::new("pdf-text-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A Model Context Protocol server that extracts text from PDF files")
        .long_about(
            "This MCP server exposes the simple_pdf_extractor agent with two tools:\n\
            - extract_pdf_text: Extract raw text from a PDF file\n\
            - get_simple_info: Get a file's name and size",
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("ID")
                .help("Model identifier advertised to the agent runtime")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors and skip the startup banner")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // stdout carries JSON-RPC, so logs go to stderr. RUST_LOG wins over --quiet.
    let default_level = if matches.get_flag("quiet") {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let model = matches
        .get_one::<String>("model")
        .cloned()
        .or_else(|| env::var("PDF_AGENT_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());


    if !matches.get_flag("quiet") {
        print_box(&[
            "",
            "\x1b[1m\x1b[31m simple_pdf_extractor \x1b[0m",
            "",
            "\x1b[0m PDF text extraction tools over MCP \x1b[0m",
            "",
        ]);
    }

    let agent = AgentDescriptor::new(model, Arc::new(LopdfEngine));
    info!("Starting MCP server for agent {} (model: {})", agent.name(), agent.model());

    let mut server = McpServer::new(agent);
    if let Err(e) = server.start().await {
        error!("Server stopped: {}", e);
        process::exit(1);
    }
}
