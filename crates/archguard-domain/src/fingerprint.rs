use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule violation.
///
/// Identity fields:
/// - check_id (the rule id)
/// - code
/// - full type name
///
/// The catalog path is left out so moving a type between catalog files keeps its identity.
pub fn fingerprint_for_type(check_id: &str, code: &str, type_name: &str) -> String {
    let canonical = [check_id, code, type_name].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
