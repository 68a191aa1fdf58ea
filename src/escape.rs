/// Trait for neutralizing script content in untrusted string leaves.
///
/// The injection traversal passes every string leaf it visits through an
/// `Escaper`. Numbers, booleans and nulls are never escaped.
///
/// # Invariants
///
/// Implementations MUST:
/// - Be pure: the same input always produces the same output
/// - Be idempotent: escaping an already escaped string returns it unchanged,
///   so re-running the cleaner never double-escapes
///
/// # Examples
///
/// ```
/// use input_guard::{Escaper, HtmlEscaper};
///
/// let escaped = HtmlEscaper.escape("<b>hi</b>");
/// assert_eq!(escaped, "&lt;b&gt;hi&lt;/b&gt;");
/// ```
pub trait Escaper {
    /// Returns the escaped form of `input`.
    fn escape(&self, input: &str) -> String;
}

impl<E: Escaper + ?Sized> Escaper for &E {
    fn escape(&self, input: &str) -> String {
        (**self).escape(input)
    }
}

/// Escapes tag delimiters so markup in a string cannot be rendered.
///
/// Replaces:
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
///
/// Ampersands and quotes are left alone, which keeps the escape idempotent.
///
/// # Examples
///
/// ```
/// use input_guard::{Escaper, HtmlEscaper};
///
/// let once = HtmlEscaper.escape("<script>alert('xss');</script>");
/// assert_eq!(once, "&lt;script&gt;alert('xss');&lt;/script&gt;");
///
/// // A second pass changes nothing
/// assert_eq!(HtmlEscaper.escape(&once), once);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape(&self, input: &str) -> String {
        if !input.contains(['<', '>']) {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len() + 8);
        for c in input.chars() {
            match c {
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                _ => output.push(c),
            }
        }
        output
    }
}

/// An escaper that returns its input unchanged (for testing only).
///
/// **WARNING:** This escaper performs NO escaping. Use it to test key
/// rewriting or depth handling in isolation from string escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEscaper;

impl Escaper for IdentityEscaper {
    fn escape(&self, input: &str) -> String {
        input.to_string()
    }
}
