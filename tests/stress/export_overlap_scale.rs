//! Scale test: pairwise overlap checking over large export sets.

use agentic_claims::exports::{Export, Exports};
use agentic_claims::validation::ValidationResults;

#[test]
fn stress_1000_disjoint_exports_validate_cleanly() {
    let mut exports = Exports::new();
    exports.add((0..1000).map(|i| Export::stream(format!("orders.{i}.>"))));

    let mut vr = ValidationResults::new();
    exports.validate(&mut vr);
    assert!(vr.is_empty(), "disjoint exports should not overlap");
}

#[test]
fn stress_wildcard_overlaps_every_sibling() {
    let mut exports = Exports::new();
    exports.add((0..500).map(|i| Export::stream(format!("orders.{i}"))));
    exports.add([Export::stream("orders.*")]);

    let mut vr = ValidationResults::new();
    exports.validate(&mut vr);
    assert_eq!(vr.len(), 500, "one issue per overlapping pair");
}

#[test]
fn stress_kinds_are_independent_namespaces() {
    let mut exports = Exports::new();
    exports.add((0..300).map(|i| Export::stream(format!("x.{i}"))));
    exports.add((0..300).map(|i| Export::service(format!("x.{i}"))));

    let mut vr = ValidationResults::new();
    exports.validate(&mut vr);
    assert!(vr.is_empty());
}

#[test]
fn stress_10k_revocations_per_export() {
    let mut export = Export::stream("foo");
    for i in 0..10_000u64 {
        export.revoke_at(format!("principal-{i}"), i);
        // Moving the threshold in is ignored
        export.revoke_at(format!("principal-{i}"), 0);
    }
    assert_eq!(export.revocations.len(), 10_000);
    for i in (0..10_000u64).step_by(997) {
        assert!(export.is_revoked_at(&format!("principal-{i}"), i));
        assert!(!export.is_revoked_at(&format!("principal-{i}"), i + 1));
    }
}
