//! Splitting grid lines into words.
//!
//! Fitness and validity both look at a line the same way: split on the block
//! symbol and drop the empty pieces. Both go through [`split_words`].

/// Splits `line` on `block`, skipping zero-length words.
///
/// # Example
///
/// ```
/// use crossga_engine::words::split_words;
///
/// let words: Vec<_> = split_words("#ca##og", '#').collect();
/// assert_eq!(words, ["ca", "og"]);
/// ```
pub fn split_words(line: &str, block: char) -> impl Iterator<Item = &str> {
    line.split(block).filter(|word| !word.is_empty())
}

/// Returns `true` if `line` contains two block symbols next to each other.
#[must_use]
pub fn has_adjacent_blocks(line: &str, block: char) -> bool {
    let mut prev_block = false;
    for ch in line.chars() {
        let is_block = ch == block;
        if is_block && prev_block {
            return true;
        }
        prev_block = is_block;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_line() {
        assert_eq!(split_words("cat#dog", '#').collect::<Vec<_>>(), ["cat", "dog"]);
    }

    #[test]
    fn test_split_skips_empty_words() {
        assert_eq!(split_words("#a##b#", '#').collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(split_words("####", '#').count(), 0);
        assert_eq!(split_words("", '#').count(), 0);
    }

    #[test]
    fn test_split_multibyte_letters() {
        assert_eq!(split_words("blå*øl", '*').collect::<Vec<_>>(), ["blå", "øl"]);
    }

    #[test]
    fn test_adjacent_blocks() {
        assert!(has_adjacent_blocks("ca##og", '#'));
        assert!(has_adjacent_blocks("##", '#'));
        assert!(!has_adjacent_blocks("#a#b#", '#'));
        assert!(!has_adjacent_blocks("#", '#'));
    }
}
