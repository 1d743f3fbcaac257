use serde::Serialize;

use crate::core::ChartKind;
use crate::error::{ChartError, ChartResult};

/// Stable content key: blake3 over the canonical JSON encoding of `value`.
///
/// Structurally equal values (same field order, same numbers) always map to
/// the same key.
pub fn fingerprint<T>(value: &T) -> ChartResult<String>
where
    T: Serialize + ?Sized,
{
    let bytes = serde_json::to_vec(value)
        .map_err(|e| ChartError::InvalidData(format!("value cannot be fingerprinted: {e}")))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Prompt cache key. Whitespace around the prompt does not change the key.
#[must_use]
pub fn prompt_key(kind: ChartKind, prompt: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update(&[0]);
    hasher.update(prompt.trim().as_bytes());
    hasher.finalize().to_hex().to_string()
}
