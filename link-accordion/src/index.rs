/// Resolve the default-open index against a collection of `len` headings.
///
/// Non-negative indices select from the start, negative ones from the end
/// (`-1` is the last heading). Anything out of range means no section opens.
pub fn resolve_default_index(index: Option<isize>, len: usize) -> Option<usize> {
    let index = index?;
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    } else {
        index.unsigned_abs()
    };
    (resolved < len).then_some(resolved)
}
