pub mod embedder;
pub mod providers;
pub mod recommendations;
pub mod retrieval;
pub mod similarity;

pub use embedder::{Embedder, Embedding, FastEmbedder};
pub use recommendations::RecommendationEngine;
