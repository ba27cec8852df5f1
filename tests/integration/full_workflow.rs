//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Create an account key and account claims
//! 2. Add exports and validate them
//! 3. Revoke importers on an export
//! 4. Encode, decode, and check revocations survived
//! 5. Clear and re-revoke

use agentic_claims::account::{decode_account_claims, AccountClaims};
use agentic_claims::crypto::{Ed25519KeyPair, KeyPair};
use agentic_claims::exports::Export;
use agentic_claims::validation::ValidationResults;

#[test]
fn full_workflow_export_revocation() {
    // ── Step 1: Create the account ──────────────────────────────────────
    let akp = Ed25519KeyPair::new_account();
    let apk = akp.public_key();
    let mut account = AccountClaims::new_account(&apk);

    // ── Step 2: Add an export and validate ──────────────────────────────
    account.add_export(Export::stream("foo"));
    let mut vr = ValidationResults::new();
    account.validate(&mut vr);
    assert!(vr.is_empty(), "fresh account should validate cleanly: {vr:?}");

    // ── Step 3: Revoke ──────────────────────────────────────────────────
    let pub_key = "bar";
    let now = agentic_claims::time::now_secs();

    // Clearing before anything was revoked is safe
    account.exports_mut()[0].clear_revocation(pub_key);
    assert!(
        !account.exports()[0].is_revoked_at(pub_key, now),
        "no revocation was added so is revoked should be false"
    );

    account.exports_mut()[0].revoke_at(pub_key, now + 100);
    assert!(
        account.exports()[0].is_revoked_at(pub_key, now),
        "revocation should hold when timestamp is in the future"
    );
    assert!(
        !account.exports()[0].is_revoked_at(pub_key, now + 150),
        "revocation should time out"
    );

    // Can't move the threshold in
    account.exports_mut()[0].revoke_at(pub_key, now + 50);
    assert!(
        account.exports()[0].is_revoked_at(pub_key, now + 60),
        "revocation should hold, 100 > 50"
    );

    // ── Step 4: Round trip ──────────────────────────────────────────────
    let encoded = account.encode(&akp).expect("encode should succeed");
    let decoded = decode_account_claims(&encoded).expect("decode should succeed");
    assert!(
        decoded.exports()[0].is_revoked_at(pub_key, now + 60),
        "revocation should last across encoding"
    );
    assert!(!decoded.exports()[0].is_revoked_at(pub_key, now + 101));
    assert_eq!(decoded.exports(), account.exports());

    let mut vr = ValidationResults::new();
    decoded.validate(&mut vr);
    assert!(vr.is_empty(), "decoded account should validate: {vr:?}");

    // ── Step 5: Clear and re-revoke ─────────────────────────────────────
    account.exports_mut()[0].clear_revocation(pub_key);
    assert!(
        !account.exports()[0].is_revoked_at(pub_key, now),
        "revocations should be cleared"
    );

    account.exports_mut()[0].revoke_at(pub_key, now + 1000);
    assert!(
        account.exports()[0].is_revoked(pub_key),
        "revocation should be true when revoked into the future"
    );

    // The earlier encoding is unaffected by later edits
    let again = decode_account_claims(&encoded).expect("decode should succeed");
    assert_eq!(
        again.exports()[0].revocations.threshold(pub_key),
        Some(now + 100)
    );
}

#[test]
fn full_workflow_overlap_scenarios() {
    let akp = Ed25519KeyPair::new_account();

    let cases: [(Vec<Export>, usize); 4] = [
        (vec![Export::stream("bar.foo"), Export::stream("bar.*")], 1),
        (vec![Export::service("bar.foo"), Export::stream("bar.*")], 0),
        (vec![Export::service("bar"), Export::stream("bar")], 0),
        (vec![Export::service("bar"), Export::service("bar")], 1),
    ];

    for (exports, expected) in cases {
        let mut account = AccountClaims::new_account(&akp.public_key());
        account.exports_mut().add(exports);

        // Overlap findings survive an encode/decode round trip unchanged
        let decoded = decode_account_claims(&account.encode(&akp).unwrap()).unwrap();
        for claims in [&account, &decoded] {
            let mut vr = ValidationResults::new();
            claims.exports().validate(&mut vr);
            assert_eq!(vr.len(), expected, "exports: {:?}", claims.exports());
        }
    }
}

#[test]
fn full_workflow_user_revocation_by_account() {
    let akp = Ed25519KeyPair::new_account();
    let ukp = Ed25519KeyPair::new_user();
    let mut account = AccountClaims::new_account(&akp.public_key());

    let user_key = ukp.public_key().to_text();
    let now = agentic_claims::time::now_secs();
    account.revoke_at(user_key.clone(), now);

    let decoded = decode_account_claims(&account.encode(&akp).unwrap()).unwrap();
    assert!(decoded.is_revoked_at(&user_key, now - 10));
    assert!(!decoded.is_revoked_at(&user_key, now + 1));
}
