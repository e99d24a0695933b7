//! Book / locator split of a reference string

/// A reference split into its book and locator parts.
///
/// "1 Samuel 2:8-10" -> book "1 Samuel", locator "2:8-10"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation<'a> {
    pub book: &'a str,
    pub locator: &'a str,
}

impl<'a> Citation<'a> {
    /// The book is everything before the first space that is followed by a
    /// digit and preceded by at least one letter. `None` without a locator.
    pub fn split(reference: &'a str) -> Option<Self> {
        let reference = reference.trim();
        for (idx, _) in reference.match_indices(' ') {
            let head = &reference[..idx];
            let rest = &reference[idx + 1..];
            if rest.starts_with(|c: char| c.is_ascii_digit())
                && head.chars().any(char::is_alphabetic)
            {
                return Some(Citation {
                    book: head.trim_end(),
                    locator: rest,
                });
            }
        }
        None
    }

    /// Book without a leading ordinal ("2 Kgs" -> "Kgs")
    pub fn base_book(&self) -> &'a str {
        match self.book.split_once(' ') {
            Some((first, rest)) if first.chars().all(|c| c.is_ascii_digit()) => rest.trim_start(),
            _ => self.book,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let c = Citation::split("John 3:16").unwrap();
        assert_eq!(c.book, "John");
        assert_eq!(c.locator, "3:16");
        assert_eq!(c.base_book(), "John");
    }

    #[test]
    fn test_split_numbered_book() {
        let c = Citation::split("1 Samuel 2:8-10").unwrap();
        assert_eq!(c.book, "1 Samuel");
        assert_eq!(c.locator, "2:8-10");
        assert_eq!(c.base_book(), "Samuel");
    }

    #[test]
    fn test_split_multi_word_book() {
        let c = Citation::split("Song Of Songs 2:8-14").unwrap();
        assert_eq!(c.book, "Song Of Songs");
        assert_eq!(c.base_book(), "Song Of Songs");
    }

    #[test]
    fn test_split_pseudo_chapter() {
        let c = Citation::split("Ps 151 1").unwrap();
        assert_eq!(c.book, "Ps");
        assert_eq!(c.locator, "151 1");
    }

    #[test]
    fn test_split_without_locator() {
        assert_eq!(Citation::split("Genesis"), None);
        assert_eq!(Citation::split("Some prose here"), None);
        assert_eq!(Citation::split(""), None);
    }
}
