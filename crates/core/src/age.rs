//! Age source trait — how old is the transcript a hit came from?

/// Looks up the age of a hit's source artifact.
///
/// Returns `None` when the age cannot be determined (missing file, clock
/// skew, unreadable metadata). The recall pipeline treats `None` as age 0,
/// i.e. "assume recent", and never fails the batch over it.
pub trait AgeSource: Send + Sync {
    /// Age in days of the artifact at `path`.
    fn age_days(&self, path: &str) -> Option<f64>;
}

impl<F> AgeSource for F
where
    F: Fn(&str) -> Option<f64> + Send + Sync,
{
    fn age_days(&self, path: &str) -> Option<f64> {
        self(path)
    }
}
