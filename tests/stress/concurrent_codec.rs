//! Stress test: independent credentials are encoded, decoded, and
//! validated in parallel, each on its own inputs.

use std::sync::Arc;
use std::thread;

use agentic_claims::account::{decode_account_claims, AccountClaims};
use agentic_claims::crypto::{Ed25519KeyPair, KeyPair};
use agentic_claims::exports::Export;
use agentic_claims::validation::ValidationResults;

#[test]
fn stress_parallel_encode_decode() {
    let handles: Vec<_> = (0..8)
        .map(|t| {
            thread::spawn(move || {
                let akp = Ed25519KeyPair::new_account();
                for i in 0..100 {
                    let mut account = AccountClaims::new_account(&akp.public_key());
                    let mut export = Export::stream(format!("thread{t}.op{i}"));
                    export.revoke_at("bar", 1_000 + i);
                    account.add_export(export);

                    let token = account.encode(&akp).expect("encode should succeed");
                    let decoded = decode_account_claims(&token).expect("decode should succeed");

                    let mut vr = ValidationResults::new();
                    decoded.validate(&mut vr);
                    assert!(vr.is_empty(), "thread {t} op {i}: {vr:?}");
                    assert!(decoded.exports()[0].is_revoked_at("bar", 1_000 + i));
                    assert!(!decoded.exports()[0].is_revoked_at("bar", 1_001 + i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}

#[test]
fn stress_shared_token_decoded_by_many_threads() {
    let akp = Ed25519KeyPair::new_account();
    let mut account = AccountClaims::new_account(&akp.public_key());
    account.add_export(Export::service("svc.echo"));
    let token = Arc::new(account.encode(&akp).expect("encode should succeed"));
    let expected = akp.public_key().to_text();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let token = Arc::clone(&token);
            let expected = expected.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let decoded = decode_account_claims(&token).expect("decode should succeed");
                    assert_eq!(decoded.issuer, expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}
