//! Resolvers — find the stored question closest to a freshly parsed one.
//!
//! Records from the question-bank cache are normalised into [`DatasetRecord`]s,
//! vectorized once as bag-of-words counts, and scored against each query by
//! cosine similarity.

pub mod index;
pub mod record;
pub mod tokenize;
pub mod vector;

pub use index::{BestMatch, DatasetIndex, DatasetStatus};
pub use record::{normalize_question, strip_html, CachedFile, DatasetCache, DatasetRecord};
pub use tokenize::tokenize;
pub use vector::{cosine_similarity, vectorize, SparseVector};
