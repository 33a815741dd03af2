//! Natural ("human") ordering of file names
//!
//! Runs of ASCII digits compare by numeric value, everything else compares
//! case-insensitively, so `track2` sorts before `track10`.

use std::cmp::Ordering;
use walkdir::DirEntry;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> impl Iterator<Item = Chunk<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    })
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Compare two strings in natural order
///
/// Ties (e.g. `01` vs `1`, `A` vs `a`) fall back to plain byte order so the
/// result is a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(x, y),
            (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => cmp_text(x, y),
            (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
            (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Compare two walk entries by file name in natural order
pub fn natural_entry_cmp(a: &DirEntry, b: &DirEntry) -> Ordering {
    natural_cmp(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(
            sorted(&["track2.flac", "track10.flac", "track1.flac"]),
            vec!["track1.flac", "track2.flac", "track10.flac"]
        );
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(sorted(&["b.mp3", "A.mp3", "c.mp3"]), vec!["A.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn leading_zeros_and_case_ties_are_stable() {
        assert_eq!(natural_cmp("01", "1"), "01".cmp("1"));
        assert_eq!(natural_cmp("a", "A"), "a".cmp("A"));
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn digits_sort_before_text() {
        assert_eq!(natural_cmp("1 intro", "intro"), Ordering::Less);
        assert_eq!(natural_cmp("track", "track1"), Ordering::Less);
    }
}
