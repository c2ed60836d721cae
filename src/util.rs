/// Finds the length of the common prefix between two byte strings.
///
/// Comparison is byte-wise; returns 0 when either input is empty.
pub fn prefix_match(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Returns the longest shared leading byte run of `a` and `b`, and its length.
///
/// The returned slice borrows from `a`.
///
/// ```
/// use radix_mut::longest_common_prefix;
///
/// assert_eq!(longest_common_prefix(b"water", b"watsol"), (&b"wat"[..], 3));
/// assert_eq!(longest_common_prefix(b"", b"watsol"), (&b""[..], 0));
/// ```
pub fn longest_common_prefix<'a>(a: &'a [u8], b: &[u8]) -> (&'a [u8], usize) {
    let len = prefix_match(a, b);
    (&a[..len], len)
}

/// Renders a label for log output.
pub(crate) fn show(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
