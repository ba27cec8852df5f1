//! Account Exports — publish exports, catch overlaps, revoke an importer.
//!
//! Run with:
//!   cargo run --example account_exports -p agentic-claims

use agentic_claims::account::{decode_account_claims, AccountClaims};
use agentic_claims::crypto::{Ed25519KeyPair, KeyPair};
use agentic_claims::exports::Export;
use agentic_claims::time::{now_secs, secs_to_rfc3339};
use agentic_claims::validation::ValidationResults;

fn main() {
    // ── 1. Create an account and its exports ────────────────────────────────
    //
    // Account claims are self-signed: the issuer and subject are the same
    // account key, so anyone can verify them with nothing but the token.
    let akp = Ed25519KeyPair::new_account();
    let mut account = AccountClaims::new_account(&akp.public_key());
    account.add_export(Export::stream("orders.>").with_name("orders"));
    account.add_export(Export::service("svc.echo"));
    println!("Account created");
    println!("  Key:     {}", akp.public_key());
    println!("  Exports: {}", account.exports().len());
    println!();

    // ── 2. Validate, then add a conflicting export ──────────────────────────
    let mut vr = ValidationResults::new();
    account.validate(&mut vr);
    println!("Validation issues: {}", vr.len());

    let mut trial = account.clone();
    trial.add_export(Export::stream("orders.eu"));
    let mut vr = ValidationResults::new();
    trial.validate(&mut vr);
    println!("After adding 'orders.eu' as a stream:");
    for issue in &vr {
        println!("  {issue}");
    }
    println!("  Blocking: {}", vr.is_blocking(false));
    println!();

    // ── 3. Revoke an importer on the stream export ──────────────────────────
    //
    // Credentials the importer obtained at or before the threshold are
    // rejected. Later credentials pass, and the threshold never moves back.
    let importer = Ed25519KeyPair::new_account().public_key().to_text();
    let threshold = now_secs();
    account.exports_mut()[0].revoke_at(importer.clone(), threshold);
    println!("Revoked {importer}");
    println!("  Until:   {}", secs_to_rfc3339(threshold));
    println!();

    // ── 4. Encode, decode, and confirm the revocation traveled ──────────────
    let token = account.encode(&akp).expect("encode should succeed");
    println!("Token ({} bytes): {}...", token.len(), &token[..48]);

    let decoded = decode_account_claims(&token).expect("decode should succeed");
    println!("  Claim ID: {}", decoded.id);
    println!(
        "  Revoked at threshold:  {}",
        decoded.exports()[0].is_revoked_at(&importer, threshold)
    );
    println!(
        "  Revoked one sec later: {}",
        decoded.exports()[0].is_revoked_at(&importer, threshold + 1)
    );
}
