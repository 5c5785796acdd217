//! classroom-inspect
//!
//! Feeds a raw classroom API response body through the codec and prints the
//! normalized records as JSON, the same shape the web layer returns.
//!
//! Usage:
//!   classroom-inspect statuses.json --kind statuses --content-type "application/json; charset=tis-620"
//!   curl ... | classroom-inspect - --kind members
//!
//! Logs go to stderr; stdout carries only the JSON output.

use std::{fs, io::Read, path::{Path, PathBuf}};
use anyhow::{Context, Result};
use clap::Parser;
use classroom_inspect::{render, run, InspectRequest, PayloadKind};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "classroom-inspect")]
#[command(about = "Normalize raw classroom API payloads")]
struct Args {
    /// Response body to read (`-` for stdin)
    input: PathBuf,

    /// Endpoint the payload came from
    #[arg(short, long, value_enum, default_value = "statuses")]
    kind: PayloadKind,

    /// Content-Type header the response was served with
    #[arg(long, env = "CLASSROOM_CONTENT_TYPE")]
    content_type: Option<String>,

    /// Charset override (takes precedence over the Content-Type)
    #[arg(long, env = "CLASSROOM_CHARSET")]
    charset: Option<String>,

    /// HTTP status the response was served with
    #[arg(long, default_value = "200")]
    http_status: u16,

    /// Identifier the viewer is known by (repeatable)
    #[arg(long = "viewer")]
    viewer: Vec<String>,

    /// Viewer's bearer token
    #[arg(long, env = "CLASSROOM_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Raw body of the viewer's profile response
    #[arg(long)]
    viewer_profile: Option<PathBuf>,

    /// Status id for like payloads
    #[arg(long)]
    status_id: Option<String>,

    /// Whether the like payload was a like (as opposed to an unlike)
    #[arg(long)]
    liked: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let body = read_input(&args.input)?;
    let viewer_profile = args
        .viewer_profile
        .as_ref()
        .map(|path| fs::read(path).with_context(|| format!("Failed to read {}", path.display())))
        .transpose()?;
    debug!("Read {} bytes from {:?}", body.len(), args.input);

    let request = InspectRequest {
        kind: args.kind,
        http_status: args.http_status,
        content_type: args.content_type,
        charset: args.charset,
        viewer: args.viewer,
        token: args.token,
        viewer_profile,
        status_id: args.status_id,
        liked: args.liked,
    };

    let normalized = run(&request, &body)?;
    println!("{}", render(&normalized, args.pretty)?);
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
