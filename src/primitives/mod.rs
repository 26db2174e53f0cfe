//! Core compute primitives (Vector, Matrix, sparse rows).
//!
//! Item features live in a [`FeatureMatrix`], which hides whether the
//! backing storage is dense ([`Matrix`]) or compressed sparse rows
//! ([`SparseMatrix`]). Algorithms only see row access, weighted row means
//! and dot products.

mod feature_matrix;
mod matrix;
mod sparse;
mod vector;

pub use feature_matrix::FeatureMatrix;
pub use matrix::Matrix;
pub use sparse::SparseMatrix;
pub use vector::Vector;
