//! Character frequency counting on top of [`Tree`].

use crate::tree::Tree;

/// Key that every character other than a letter or a space is counted under.
pub const OTHER: char = '_';

/// Counts how often each character class occurs in `input`.
///
/// ASCII letters are counted case-insensitively under their lowercase form and spaces under
/// `' '`. Everything else, digits and punctuation and non-ASCII characters alike, is counted
/// under [`OTHER`]. The returned tree is left exactly as the insertions shaped it; call
/// [`Tree::balance`] on it if it came out lopsided.
///
/// # Examples
///
/// ```
/// use iterbst::letter_count;
///
/// let counts = letter_count("abBccc_ 123 *");
///
/// assert_eq!(counts.search(&'a'), Some(&1));
/// assert_eq!(counts.search(&'b'), Some(&2));
/// assert_eq!(counts.search(&'c'), Some(&3));
/// assert_eq!(counts.search(&' '), Some(&2));
/// assert_eq!(counts.search(&'_'), Some(&5));
/// ```
pub fn letter_count(input: &str) -> Tree<char, i32> {
    let mut tree = Tree::new();
    for c in input.chars() {
        let key = match c.to_ascii_lowercase() {
            letter @ 'a'..='z' => letter,
            ' ' => ' ',
            _ => OTHER,
        };
        let count = tree.search(&key).copied().unwrap_or(0);
        tree.insert(key, count + 1);
    }
    tree
}
