//! Generate raw HTTP/2 request frames for replay with `openssl s_client`.

use clap::Parser;
use h2gen::generate::GenerateOptions;
use h2gen::h2::Error;
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "h2gen")]
#[command(about = "Generate HTTP/2 frames for manual protocol testing")]
struct Args {
    /// IP address to connect to
    ip: String,

    /// Host to send requests to
    #[arg(long, default_value = "www.google.com")]
    host: String,

    /// URL to hit
    #[arg(long, default_value = "/teapot")]
    url: String,

    /// HTTP request method
    #[arg(long, default_value = "GET")]
    method: String,

    /// Request scheme
    #[arg(long, default_value = "https")]
    scheme: String,

    /// Extra request header as `name: value` (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Number of times to repeat the request
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Exclude HTTP/2 preface and settings frame
    #[arg(long)]
    no_preface: bool,

    /// Generate both early data and normal output
    #[arg(long)]
    early_data: bool,

    /// Specify a different path for early data
    #[arg(long)]
    early_data_url: Option<String>,

    /// Output file name (without extension)
    #[arg(long, default_value = "h2_request")]
    output: String,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Split `name: value`; a leading `:` belongs to the name (`:method: POST`)
fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = match s.strip_prefix(':') {
        Some(rest) => rest
            .split_once(':')
            .map(|(name, value)| (format!(":{}", name.trim()), value)),
        None => s
            .split_once(':')
            .map(|(name, value)| (name.trim().to_string(), value)),
    }
    .filter(|(name, _)| !name.is_empty() && name != ":")
    .ok_or_else(|| format!("expected `name: value`, got {:?}", s))?;
    Ok((name, value.trim().to_string()))
}

impl From<Args> for GenerateOptions {
    fn from(args: Args) -> Self {
        GenerateOptions {
            ip: args.ip,
            host: args.host,
            url: args.url,
            method: args.method,
            scheme: args.scheme,
            headers: args.headers,
            repeat: args.repeat,
            no_preface: args.no_preface,
            early_data: args.early_data,
            early_data_url: args.early_data_url,
            output: args.output,
        }
    }
}

fn run(options: GenerateOptions) -> Result<String, Error> {
    let generation = options.plan()?;
    generation.write_to(Path::new("."))?;
    Ok(generation.command)
}

fn main() -> ExitCode {
    let args = Args::parse();
    h2gen::logging::init(&args.log_level);

    match run(args.into()) {
        Ok(command) => {
            println!("{}", command);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
