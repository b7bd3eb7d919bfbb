use std::fmt;

use super::core::Sequence;
use super::Element;

/// How many elements `Display` shows before eliding the rest.
pub const DISPLAY_LIMIT: usize = 50;

/// A bounded rendering of a sequence, as returned by [`Sequence::preview`].
///
/// At most `limit + 1` elements are pulled from the sequence, so previewing
/// a long lazy sequence does not force all of it.
pub struct Preview<'a, T> {
    sequence: &'a Sequence<T>,
    limit: usize,
}

impl<T: Element> Sequence<T> {
    /// Render at most `limit` elements, followed by `...` if there are more.
    pub fn preview(&self, limit: usize) -> Preview<'_, T> {
        Preview {
            sequence: self,
            limit,
        }
    }

    /// Render every element.
    pub fn to_full_string(&self) -> String
    where
        T: fmt::Display,
    {
        self.preview(usize::MAX).to_string()
    }
}

impl<T> fmt::Display for Preview<'_, T>
where
    T: Element + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.sequence.iter().enumerate() {
            if i == self.limit {
                if i > 0 {
                    f.write_str(" ")?;
                }
                f.write_str("...")?;
                break;
            }
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl<T> fmt::Display for Sequence<T>
where
    T: Element + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.preview(DISPLAY_LIMIT), f)
    }
}

impl<T> fmt::Debug for Sequence<T>
where
    T: Element + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_display_short() {
        assert_snapshot!(Sequence::from(vec![1, 2, 3]).to_string(), @"[1, 2, 3]");
    }

    #[test]
    fn test_display_empty() {
        assert_snapshot!(Sequence::<i32>::empty().to_string(), @"[]");
    }

    #[test]
    fn test_display_elides_past_limit() {
        let sequence = (0..100).collect::<Sequence<_>>();
        let rendered = sequence.to_string();
        assert!(rendered.starts_with("[0, 1, 2, "));
        assert!(rendered.ends_with("48, 49 ...]"));
    }

    #[test]
    fn test_preview() {
        let sequence = Sequence::from(vec!["a", "b", "c"]);
        assert_snapshot!(sequence.preview(2).to_string(), @"[a, b ...]");
        assert_snapshot!(sequence.preview(3).to_string(), @"[a, b, c]");
        assert_snapshot!(sequence.preview(0).to_string(), @"[...]");
    }

    #[test]
    fn test_preview_does_not_force_lazy_tail() {
        let sequence = Sequence::lazy(0..);
        assert_snapshot!(sequence.preview(3).to_string(), @"[0, 1, 2 ...]");
    }

    #[test]
    fn test_full_string() {
        let sequence = (0..60).collect::<Sequence<_>>();
        let rendered = sequence.to_full_string();
        assert!(rendered.ends_with("58, 59]"));
    }

    #[test]
    fn test_debug() {
        let sequence = Sequence::lazy(vec!["x".to_string()]).add("y".to_string());
        assert_snapshot!(format!("{:?}", sequence), @r#"["x", "y"]"#);
    }
}
