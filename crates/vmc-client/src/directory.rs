//! The lookups a filter session needs from a college directory.

use std::future::Future;

use vmc_model::{CollegeQuery, CollegeRecord};

use crate::error::Result;

/// Read-only college directory.
///
/// Implemented by [`DirectoryClient`](crate::DirectoryClient) over HTTP; tests
/// provide in-memory implementations.
pub trait CollegeDirectory: Send + Sync {
    /// Specializations offered under `stream`.
    fn specializations(&self, stream: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Cities with colleges offering `stream`.
    fn cities(&self, stream: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Colleges matching a stream, specialization and optional city.
    fn colleges(
        &self,
        query: &CollegeQuery,
    ) -> impl Future<Output = Result<Vec<CollegeRecord>>> + Send;

    /// Free-text college search.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<CollegeRecord>>> + Send;
}
