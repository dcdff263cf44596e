use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Searches and counts either complete with a normal result (an unreachable goal is a normal
/// result: an empty path collection or a zero count) or fail with one of the variants below.
/// Nothing is logged-and-swallowed internally; every failure propagates to the caller.
///
/// # Examples
///
/// ```rust
/// use pathscope::{Error, Graph, SearchOptions};
///
/// let graph: Graph<u32> = Graph::new(0);
/// let result = graph.breadth_first(
///     &SearchOptions::default(),
///     |_| Err(Error::callback("goal predicate exploded")),
///     |_| Ok(true),
/// );
///
/// assert!(matches!(result, Err(Error::Callback(_))));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied callback (edge generator, goal predicate or path predicate) reported a
    /// failure. The whole search aborts and no partial output is returned.
    #[error("Search callback failed: {0}")]
    Callback(Box<dyn std::error::Error + Send + Sync>),

    /// A path count exceeded the range of `u64`. Counting fails hard rather than wrapping or
    /// clamping.
    #[error("Path count overflowed u64")]
    CountOverflow,

    /// The dedicated worker thread pool for a search could not be constructed.
    #[error("Failed to build search worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Builds a [`Error::Callback`] from anything convertible into a boxed error, so search
    /// closures can fail with plain strings or with their own error types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathscope::Error;
    ///
    /// let from_str = Error::callback("solver rejected the state");
    /// let from_err = Error::callback(std::io::Error::other("lookup failed"));
    /// assert!(matches!(from_str, Error::Callback(_)));
    /// assert!(matches!(from_err, Error::Callback(_)));
    /// ```
    pub fn callback(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Callback(source.into())
    }
}
