//! Command-line argument parsing.

use anyhow::{anyhow, bail, Context, Result};

use easynews_core::{MediaKind, MediaMeta};

pub const USAGE: &str = "\
Usage: easynews-search <movie|series|channel|tv> <name> [options]

Options:
  --season <N>    Season number (series only)
  --episode <N>   Episode number (series only)
  --year <N>      Release year
  --strict        Require the parsed release title to equal <name>
  --metrics       Print metrics to stderr when done
  -h, --help      Show this message

Environment:
  EASYNEWS_CONFIG      Config file path (default: config.toml)
  EASYNEWS_LOG_FORMAT  Set to \"json\" for JSON logs
  RUST_LOG             Log filter (default: info)";

/// A parsed search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub kind: MediaKind,
    pub meta: MediaMeta,
    pub strict: bool,
    pub metrics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Search(Args),
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut positional = Vec::new();
    let mut meta = MediaMeta::default();
    let mut strict = false;
    let mut metrics = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--strict" => strict = true,
            "--metrics" => metrics = true,
            "--season" => meta.season = Some(number(&arg, args.next())?),
            "--episode" => meta.episode = Some(number(&arg, args.next())?),
            "--year" => meta.year = Some(number(&arg, args.next())?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let kind = positional
        .next()
        .ok_or_else(|| anyhow!("Missing media kind"))?
        .parse::<MediaKind>()?;
    let name = positional
        .next()
        .ok_or_else(|| anyhow!("Missing title name"))?;
    if let Some(extra) = positional.next() {
        bail!("Unexpected argument: {}", extra);
    }
    if name.trim().is_empty() {
        bail!("Title name must not be empty");
    }

    meta.name = name;
    Ok(Invocation::Search(Args {
        kind,
        meta,
        strict,
        metrics,
    }))
}

fn number(flag: &str, value: Option<String>) -> Result<u32> {
    let value = value.ok_or_else(|| anyhow!("{} requires a value", flag))?;
    value
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", flag, value))
}
