use super::embedder::Embedding;

/// Two embeddings of different length were compared.
///
/// Both sides always come from the same model, so this indicates a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Embedding dimension mismatch: {left} vs {right}")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

/// Cosine similarity in [-1, 1].
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> Result<f32, DimensionMismatch> {
    let (a, b) = (a.as_slice(), b.as_slice());
    if a.len() != b.len() {
        return Err(DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    // Rounding can push identical vectors marginally past 1.0
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
