//! AgenticClaims CLI — `acl` command.
//!
//! Read-only inspection of signed account claims: verify and print them,
//! run validation, check subject overlap, and query revocations.

use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use agentic_claims::account::{decode_account_claims, AccountClaims};
use agentic_claims::exports::subjects_overlap;
use agentic_claims::time::{now_secs, secs_to_rfc3339};
use agentic_claims::validation::ValidationResults;

// ── Input helpers ─────────────────────────────────────────────────────────────

/// Read a credential from a file, or from stdin when the path is `-`.
fn read_token(source: &Path) -> Result<String> {
    let mut raw = String::new();
    if source == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read credential from stdin")?;
    } else {
        raw = std::fs::read_to_string(source)
            .with_context(|| format!("failed to read {}", source.display()))?;
    }
    let token = raw.trim();
    if token.is_empty() {
        bail!("no credential found in {}", source.display());
    }
    Ok(token.to_string())
}

fn load_account(source: &Path) -> Result<AccountClaims> {
    let token = read_token(source)?;
    decode_account_claims(&token).with_context(|| format!("cannot decode {}", source.display()))
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// AgenticClaims CLI: inspect signed authorization claims.
#[derive(Parser, Debug)]
#[command(
    name = "acl",
    about = "AgenticClaims CLI",
    version,
    long_about = "acl: AgenticClaims CLI\n\nVerify, validate and inspect signed account claims.\nCredentials are read from a file, or from stdin when given as '-'."
)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify a credential's signature and print its claims
    Decode {
        /// Credential file, or '-' for stdin
        source: std::path::PathBuf,
    },

    /// Verify and validate a credential; exits non-zero when it is unusable
    Validate {
        /// Credential file, or '-' for stdin
        source: std::path::PathBuf,

        /// Do not treat expiry or activation time issues as blocking
        #[arg(long)]
        lenient_time: bool,
    },

    /// Report whether two subject patterns can match a common subject
    Overlap {
        /// First subject pattern
        a: String,
        /// Second subject pattern
        b: String,
    },

    /// Check whether a principal is revoked on an export or on the account
    Revoked {
        /// Credential file, or '-' for stdin
        source: std::path::PathBuf,

        /// Export index; omit to check the account's own revocations
        #[arg(long)]
        export: Option<usize>,

        /// Principal public key (or '*')
        #[arg(long)]
        principal: String,

        /// Issue time to check, in Unix seconds (default: now)
        #[arg(long)]
        at: Option<u64>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Decode { source } => cmd_decode(&source, json, verbose),
        Commands::Validate {
            source,
            lenient_time,
        } => cmd_validate(&source, lenient_time, json),
        Commands::Overlap { a, b } => cmd_overlap(&a, &b, json),
        Commands::Revoked {
            source,
            export,
            principal,
            at,
        } => cmd_revoked(&source, export, &principal, at, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `acl decode <SOURCE>`
fn cmd_decode(source: &Path, json: bool, verbose: bool) -> Result<()> {
    let claims = load_account(source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&claims)?);
        return Ok(());
    }

    println!("Signature valid.");
    println!("  ID:        {}", claims.id);
    println!("  Type:      {}", claims.claim_type);
    println!("  Issuer:    {}", claims.issuer);
    println!("  Subject:   {}", claims.subject);
    println!("  Issued At: {}", secs_to_rfc3339(claims.issued_at));
    if !claims.name.is_empty() {
        println!("  Name:      {}", claims.name);
    }
    if let Some(exp) = claims.expires {
        println!("  Expires:   {}", secs_to_rfc3339(exp));
    }
    if let Some(nbf) = claims.not_before {
        println!("  Not Before: {}", secs_to_rfc3339(nbf));
    }

    let exports = claims.exports();
    println!("  Exports ({}):", exports.len());
    for (i, export) in exports.iter().enumerate() {
        println!("    [{i}] {} {}", export.kind, export.subject);
        if verbose {
            for (principal, threshold) in export.revocations.iter() {
                println!("        revoked: {principal} <= {}", secs_to_rfc3339(threshold));
            }
        }
    }

    let imports = claims.imports();
    println!("  Imports ({}):", imports.len());
    for import in imports.iter() {
        println!("    {} {} from {}", import.kind, import.subject, import.account);
    }

    if verbose {
        println!();
        println!("{}", serde_json::to_string_pretty(&claims)?);
    }

    Ok(())
}

/// `acl validate <SOURCE> [--lenient-time]`
fn cmd_validate(source: &Path, lenient_time: bool, json: bool) -> Result<()> {
    let claims = load_account(source)?;

    let mut results = ValidationResults::new();
    claims.validate(&mut results);
    let blocking = results.is_blocking(!lenient_time);

    if json {
        let report = serde_json::json!({
            "subject": claims.subject,
            "blocking": blocking,
            "issues": results.issues,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if results.is_empty() {
        println!("Valid: {}", claims.subject);
    } else {
        println!("Issues for {}:", claims.subject);
        for issue in &results {
            println!("  {issue}");
        }
    }

    if blocking {
        log::info!("{} has blocking validation issues", claims.subject);
        return Err(anyhow!("credential is not usable"));
    }
    Ok(())
}

/// `acl overlap <A> <B>`
fn cmd_overlap(a: &str, b: &str, json: bool) -> Result<()> {
    let overlap = subjects_overlap(a, b);
    if json {
        let report = serde_json::json!({ "a": a, "b": b, "overlap": overlap });
        println!("{report}");
    } else if overlap {
        println!("{a:?} and {b:?} overlap");
    } else {
        println!("{a:?} and {b:?} are disjoint");
    }
    Ok(())
}

/// `acl revoked <SOURCE> --principal <PK> [--export N] [--at SECS]`
fn cmd_revoked(
    source: &Path,
    export: Option<usize>,
    principal: &str,
    at: Option<u64>,
    json: bool,
) -> Result<()> {
    let claims = load_account(source)?;
    let instant = at.unwrap_or_else(now_secs);

    let (scope, revoked) = match export {
        Some(index) => {
            let export = claims.exports().get(index).ok_or_else(|| {
                anyhow!(
                    "export index {index} out of range ({} exports)",
                    claims.exports().len()
                )
            })?;
            (
                format!("export {}", export.subject),
                export.is_revoked_at(principal, instant),
            )
        }
        None => (
            "account".to_string(),
            claims.is_revoked_at(principal, instant),
        ),
    };

    if json {
        let report = serde_json::json!({
            "scope": scope,
            "principal": principal,
            "at": instant,
            "revoked": revoked,
        });
        println!("{report}");
    } else if revoked {
        println!("{principal} is revoked on {scope} at {}", secs_to_rfc3339(instant));
    } else {
        println!("{principal} is not revoked on {scope} at {}", secs_to_rfc3339(instant));
    }
    Ok(())
}
