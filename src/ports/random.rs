//! Random source port - injectable randomness for the policy

/// Source of uniform randomness used by the selection policy.
///
/// The policy draws exactly one [`RandomSource::next_unit`] per selection to
/// decide EXPLORE vs EXPLOIT, followed by exactly one
/// [`RandomSource::next_index`] to pick within the candidate slice.
///
/// # Examples
///
/// ```
/// use chicken_advisor::ports::RandomSource;
///
/// struct AlwaysFirst;
///
/// impl RandomSource for AlwaysFirst {
///     fn next_unit(&mut self) -> f64 {
///         0.999
///     }
///
///     fn next_index(&mut self, _len: usize) -> usize {
///         0
///     }
/// }
/// ```
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
