//! rxmlrpc CLI: decode an XML-RPC methodResponse to JSON.

#[cfg(feature = "fast-alloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use rxmlrpc::json::response_to_json;
use rxmlrpc::Response;
use std::io::Read;
use std::process;

#[derive(Parser)]
#[command(
    name = "rxmlrpc",
    about = "Decode an XML-RPC methodResponse to JSON",
    after_help = "Exit status: 0 on success, 1 on a decode failure, 2 when the response is a fault."
)]
struct Cli {
    /// Input file (- for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Pretty-printed JSON output (2-space indent)
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(response) => {
            if matches!(response, Response::Fault(_)) {
                process::exit(2);
            }
        }
        Err(message) => {
            eprintln!("rxmlrpc: {message}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Response, String> {
    let xml = read_input(&cli.input)
        .map_err(|err| format!("read {}: {err}", display_name(&cli.input)))?;
    let response = rxmlrpc::decode_response(&xml).map_err(|err| err.to_string())?;

    let json = response_to_json(&response);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
    .map_err(|err| err.to_string())?;
    println!("{rendered}");

    Ok(response)
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}
