/// Source of uniform choices, injected so selection can be replayed in tests
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}
