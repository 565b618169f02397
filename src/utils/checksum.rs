use sha2::{Digest, Sha256};

/// Checksum binding a migration's forward and rollback SQL together. The
/// same value is recorded as `current_hash` on every chain link the
/// migration produces, so any edit to either script breaks the chain.
pub fn chain_checksum(forward_sql: &str, rollback_sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(forward_sql.as_bytes());
    hasher.update(rollback_sql.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_deterministic() {
        let a = chain_checksum("CREATE INDEX idx ON t (c)", "DROP INDEX idx");
        let b = chain_checksum("CREATE INDEX idx ON t (c)", "DROP INDEX idx");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_checksum_changes_with_forward_sql() {
        let a = chain_checksum("CREATE INDEX idx ON t (c)", "DROP INDEX idx");
        let b = chain_checksum("CREATE INDEX idx2 ON t (c)", "DROP INDEX idx");
        assert_ne!(a, b);
    }

    #[test]
    fn test_checksum_changes_with_rollback_sql() {
        let a = chain_checksum("CREATE INDEX idx ON t (c)", "DROP INDEX idx");
        let b = chain_checksum("CREATE INDEX idx ON t (c)", "DROP INDEX IF EXISTS idx");
        assert_ne!(a, b);
    }

    #[test]
    fn test_checksum_matches_concatenation() {
        // Hashing the two scripts separately must equal hashing the
        // concatenated text, since the chain definition is
        // sha256(forward_sql + rollback_sql)
        let joined = chain_checksum("ab", "");
        let split = chain_checksum("a", "b");
        assert_eq!(joined, split);
    }
}
