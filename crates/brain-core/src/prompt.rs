//! Prompt fingerprinting, used to tell which system prompt served a turn.

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt string, hex encoded.
pub fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
