/// Splits `tokens` into consecutive batches of at most `max` entries.
///
/// Order is preserved and only the last batch may be short. Empty input,
/// or a zero `max`, yields no batches.
pub fn chunk_tokens<T>(tokens: &[T], max: usize) -> Vec<&[T]> {
    if max == 0 {
        return Vec::new();
    }
    tokens.chunks(max).collect()
}
