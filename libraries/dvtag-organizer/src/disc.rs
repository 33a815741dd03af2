//! Disc number assignment

/// Hands out disc numbers, one per group, across every format of a run
///
/// Numbering is active only when the run holds more than one audio file in
/// total; an inactive sequence yields `None` forever. An active one yields
/// `Some(1)`, `Some(2)`, ... regardless of how many files each group holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscSequence {
    next: Option<u32>,
}

impl DiscSequence {
    /// Sequence for a run holding `total_files` audio files
    pub fn for_total(total_files: usize) -> Self {
        Self {
            next: (total_files > 1).then_some(1),
        }
    }

    /// Whether groups receive disc numbers
    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }
}

impl Iterator for DiscSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let disc = self.next?;
        self.next = Some(disc + 1);
        Some(disc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_never_gets_a_disc() {
        let mut discs = DiscSequence::for_total(1);
        assert!(!discs.is_active());
        assert_eq!(discs.next(), None);
        assert_eq!(discs.next(), None);
    }

    #[test]
    fn empty_run_is_inactive() {
        assert!(!DiscSequence::for_total(0).is_active());
    }

    #[test]
    fn counts_groups_from_one() {
        let discs = DiscSequence::for_total(2);
        assert_eq!(discs.take(3).collect::<Vec<_>>(), [1, 2, 3]);
    }
}
