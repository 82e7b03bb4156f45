/// Deterministic set of selected party indices backed by a bitset.
///
/// Indices refer to positions in a [`crate::PartyTable`].
///
/// Ordering contract:
/// - Iteration yields indices in ascending order, which is table order
///   (most seats first).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    words: Vec<u64>,
    len: usize,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection from one checked flag per table row.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .enumerate()
            .filter(|(_, checked)| **checked)
            .map(|(idx, _)| idx as u32)
            .collect()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, index: u32) -> bool {
        let (word, bit) = word_bit(index);
        self.words
            .get(word)
            .is_some_and(|w| (w & (1u64 << bit)) != 0)
    }

    /// Inserts `index` into the set.
    ///
    /// Returns `true` if the set changed.
    pub fn insert(&mut self, index: u32) -> bool {
        self.ensure_capacity(index);
        let (word, bit) = word_bit(index);
        let mask = 1u64 << bit;
        let w = &mut self.words[word];
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        self.len += 1;
        true
    }

    /// Removes `index` from the set.
    ///
    /// Returns `true` if the set changed.
    pub fn remove(&mut self, index: u32) -> bool {
        let (word, bit) = word_bit(index);
        let Some(w) = self.words.get_mut(word) else {
            return false;
        };
        let mask = 1u64 << bit;
        if (*w & mask) == 0 {
            return false;
        }
        *w &= !mask;
        self.len -= 1;
        true
    }

    /// Drops every index `>= len`.
    pub fn truncate(&mut self, len: u32) {
        let stale: Vec<u32> = self.iter().filter(|idx| *idx >= len).collect();
        for idx in stale {
            self.remove(idx);
        }
    }

    /// Checked flags for a table of `len` rows.
    pub fn to_flags(&self, len: usize) -> Vec<bool> {
        (0..len).map(|idx| self.contains(idx as u32)).collect()
    }

    /// Iterates selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        SelectionIndexIter {
            words: &self.words,
            word_index: 0,
            current_word: 0,
            base_index: 0,
        }
    }

    fn ensure_capacity(&mut self, index: u32) {
        let (word, _bit) = word_bit(index);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
    }
}

// Trailing zero words are left behind by `remove`, so compare members.
impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for SelectionSet {}

impl FromIterator<u32> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut s = Self::new();
        for idx in iter {
            s.insert(idx);
        }
        s
    }
}

fn word_bit(index: u32) -> (usize, u32) {
    let word = (index / 64) as usize;
    let bit = index % 64;
    (word, bit)
}

struct SelectionIndexIter<'a> {
    words: &'a [u64],
    word_index: usize,
    current_word: u64,
    base_index: u32,
}

impl Iterator for SelectionIndexIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let tz = self.current_word.trailing_zeros();
                self.current_word &= !(1u64 << tz);
                return Some(self.base_index + tz);
            }

            let w = *self.words.get(self.word_index)?;
            self.current_word = w;
            self.base_index = (self.word_index as u32) * 64;
            self.word_index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionSet;

    #[test]
    fn insert_remove_contains_and_len() {
        let mut s = SelectionSet::new();
        assert!(s.is_empty());
        assert!(!s.contains(1));

        assert!(s.insert(1));
        assert!(s.contains(1));
        assert_eq!(s.len(), 1);
        assert!(!s.insert(1));
        assert_eq!(s.len(), 1);

        assert!(s.remove(1));
        assert!(!s.contains(1));
        assert_eq!(s.len(), 0);
        assert!(!s.remove(1));
    }

    #[test]
    fn iter_is_sorted() {
        let s: SelectionSet = [10, 2, 65].into_iter().collect();
        let got: Vec<u32> = s.iter().collect();
        assert_eq!(got, vec![2, 10, 65]);
    }

    #[test]
    fn flags_roundtrip() {
        let flags = [false, true, true, false, true];
        let s = SelectionSet::from_flags(&flags);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(s.to_flags(flags.len()), flags.to_vec());
    }

    #[test]
    fn truncate_drops_out_of_range() {
        let mut s: SelectionSet = [0, 3, 70].into_iter().collect();
        s.truncate(4);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn equality_ignores_spare_capacity() {
        let mut a: SelectionSet = [1, 100].into_iter().collect();
        a.remove(100);
        let b: SelectionSet = [1].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut s: SelectionSet = [5, 6].into_iter().collect();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.iter().count(), 0);
    }
}
