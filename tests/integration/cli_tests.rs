//! Integration tests for the CLI binary.
//!
//! Runs the `acl` binary against credentials written to temporary files.
//!
//! This test is registered as a [[test]] in the agentic-claims-cli crate
//! so that CARGO_BIN_EXE_acl is available.

use std::io::Write;
use std::process::{Command, Output};

use agentic_claims::account::AccountClaims;
use agentic_claims::claims::ClaimsBuilder;
use agentic_claims::crypto::{Ed25519KeyPair, KeyPair};
use agentic_claims::exports::Export;
use agentic_claims::Account;

/// Get a Command pointing to the `acl` binary.
fn acl_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_acl"))
}

fn run(args: &[&str]) -> Output {
    acl_binary()
        .args(args)
        .output()
        .expect("failed to execute acl")
}

/// Write a credential to a temp file, followed by a newline as editors do.
fn token_file(token: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "{token}").expect("write token");
    file
}

fn signed_account(configure: impl FnOnce(&mut AccountClaims)) -> String {
    let akp = Ed25519KeyPair::new_account();
    let mut claims = AccountClaims::new_account(&akp.public_key());
    configure(&mut claims);
    claims.encode(&akp).expect("encode")
}

fn path_of(file: &tempfile::NamedTempFile) -> &str {
    file.path().to_str().expect("utf-8 temp path")
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);

    assert!(
        output.status.success(),
        "acl --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("acl") || stdout.contains("AgenticClaims") || stdout.contains("Usage"),
        "acl --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = run(&["--version"]);

    assert!(
        output.status.success(),
        "acl --version should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0.1") || stdout.contains("acl"),
        "acl --version should contain version info, got: {stdout}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(
        !output.status.success(),
        "acl with unknown flag should exit with error"
    );
}

#[test]
fn cli_overlap_reports_json() {
    let output = run(&["--json", "overlap", "bar.foo", "bar.*"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["overlap"], true);

    let output = run(&["--json", "overlap", "bar.foo", "baz.*"]);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["overlap"], false);
}

#[test]
fn cli_decode_prints_claims() {
    let token = signed_account(|c| c.add_export(Export::stream("orders.>")));
    let file = token_file(&token);

    let output = run(&["--json", "decode", path_of(&file)]);
    assert!(
        output.status.success(),
        "decode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let claims: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(claims["type"], "account");
    assert_eq!(claims["data"]["exports"][0]["subject"], "orders.>");
    assert_eq!(claims["data"]["exports"][0]["type"], "stream");
}

#[test]
fn cli_decode_rejects_tampered_credential() {
    let token = signed_account(|_| {});
    let (unsigned, _) = token.rsplit_once('.').unwrap();
    let other = signed_account(|_| {});
    let (_, foreign_sig) = other.rsplit_once('.').unwrap();
    let file = token_file(&format!("{unsigned}.{foreign_sig}"));

    let output = run(&["decode", path_of(&file)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn cli_validate_clean_account() {
    let token = signed_account(|c| {
        c.exports_mut()
            .add([Export::service("bar"), Export::stream("bar")]);
    });
    let file = token_file(&token);

    let output = run(&["validate", path_of(&file)]);
    assert!(
        output.status.success(),
        "validate failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn cli_validate_flags_overlapping_exports() {
    let token = signed_account(|c| {
        c.exports_mut()
            .add([Export::stream("bar.foo"), Export::stream("bar.*")]);
    });
    let file = token_file(&token);

    let output = run(&["--json", "validate", path_of(&file)]);
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["blocking"], true);
    assert_eq!(report["issues"].as_array().unwrap().len(), 1);
}

#[test]
fn cli_validate_lenient_time() {
    let akp = Ed25519KeyPair::new_account();
    let claims = ClaimsBuilder::<Account>::default()
        .subject(&akp.public_key())
        .expires(1)
        .build();
    let file = token_file(&claims.encode(&akp).unwrap());

    let strict = run(&["validate", path_of(&file)]);
    assert!(!strict.status.success(), "expired claims are blocking");

    let lenient = run(&["validate", "--lenient-time", path_of(&file)]);
    assert!(
        lenient.status.success(),
        "only a time issue stands: {}",
        String::from_utf8_lossy(&lenient.stdout)
    );
}

#[test]
fn cli_revoked_on_export_and_account() {
    let token = signed_account(|c| {
        let mut export = Export::stream("foo");
        export.revoke_at("bar", 1_000);
        c.add_export(export);
        c.revoke_at("baz", 2_000);
    });
    let file = token_file(&token);
    let path = path_of(&file);

    assert!(is_revoked(path, &["--export", "0", "--principal", "bar", "--at", "1000"]));
    assert!(!is_revoked(path, &["--export", "0", "--principal", "bar", "--at", "1001"]));
    assert!(is_revoked(path, &["--principal", "baz", "--at", "10"]));
    assert!(!is_revoked(path, &["--principal", "bar", "--at", "10"]));

    let out_of_range = run(&["revoked", path, "--export", "7", "--principal", "bar"]);
    assert!(!out_of_range.status.success());
}

fn is_revoked(path: &str, extra: &[&str]) -> bool {
    let mut args = vec!["--json", "revoked", path];
    args.extend_from_slice(extra);
    let output = run(&args);
    assert!(
        output.status.success(),
        "revoked failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    report["revoked"].as_bool().unwrap()
}

#[test]
fn cli_reads_from_stdin() {
    use std::process::Stdio;

    let token = signed_account(|c| c.add_export(Export::service("svc.echo")));
    let mut child = acl_binary()
        .args(["--json", "decode", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn acl");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(token.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let claims: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(claims["data"]["exports"][0]["type"], "service");
}
