//! generate crud mutation documents for a table
//!
//! fetches the schema from a graphql endpoint via introspection and prints
//! (and optionally writes) the create/update/delete mutation documents for
//! one entity type.
//!
//! command help reference (kept in sync with `crudgen --help`):
#[doc = concat!("```text\n", include_str!("crudgen-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("crudgen-help.txt");

use crudgen::{Client, ClientConfig, GeneratedMutation, Generator, DEFAULT_ENDPOINT};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Args {
    table: String,
    url: String,
    write: bool,
    replace: bool,
    out: Option<PathBuf>,
}

enum ParseArgsError {
    Help,
    Message(String),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    println!("GraphQL CRUD Generator\n");
    println!("Reading schema at: {}\n", args.url);

    let client = match Client::new(ClientConfig::new(&args.url)) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let schema = match client.fetch_schema().await {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("could not post introspection query to {}: {err}", args.url);
            std::process::exit(1);
        }
    };

    println!("Creating mutation documents for table: {}\n", args.table);

    let generator = Generator::new(&schema, &args.table);
    let mutations = match generator.generate_all() {
        Ok(mutations) => mutations,
        Err(err) => {
            eprintln!("generation failed: {err}");
            std::process::exit(1);
        }
    };

    let out_file = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.graphql", generator.type_name())));

    if args.write && args.replace && out_file.exists() {
        if let Err(err) = std::fs::remove_file(&out_file) {
            eprintln!("failed to remove {}: {err}", out_file.display());
            std::process::exit(1);
        }
    }

    println!("Generation finished, results below:\n");
    for mutation in &mutations {
        if let Err(err) = emit(mutation, &args, &out_file) {
            eprintln!("failed to write {}: {err}", out_file.display());
            std::process::exit(1);
        }
    }
}

fn emit(mutation: &GeneratedMutation, args: &Args, out_file: &Path) -> std::io::Result<()> {
    println!("{}", mutation.document);
    if args.write {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(out_file)?;
        writeln!(file, "{}", mutation.document)?;
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut table = None;
    let mut url = None;
    let mut write = false;
    let mut replace = false;
    let mut out = None;

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--table" | "-t" => table = iter.next(),
            "--url" | "-u" => url = iter.next(),
            "--write" | "-w" => write = true,
            "--replace" | "-r" => replace = true,
            "--out" | "-o" => out = iter.next().map(PathBuf::from),
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    let table =
        table.ok_or_else(|| ParseArgsError::Message("--table is required".to_string()))?;

    Ok(Args {
        table,
        url: url.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        write,
        replace,
        out,
    })
}
