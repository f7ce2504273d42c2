use std::{cell::OnceCell, fmt};
use tracing::debug;
#[cfg(feature = "profiling")]
use tracing::info;

#[cfg(feature = "profiling")]
use std::time::Instant;

pub mod kmr;
pub mod symbol;

#[cfg(any(test, feature = "instructions"))]
pub mod instructions;

use kmr::Arrays;
pub use symbol::{SentinelError, Symbol};

/// Suffix array and inverse rank array of a text, built by radius doubling
/// in O(n log² n).
///
/// The text is normalized at construction: `sentinel` is appended unless
/// it already occurs somewhere in the input. Both arrays are computed
/// together on first request and cached for the lifetime of the value.
///
/// # Precondition
///
/// The sentinel should occur exactly once, at the end, and compare below
/// every other symbol. This is not checked (see [`SuffixArray::checked`]).
/// When it does not hold the result is still a permutation, ordered so that
/// a suffix sorts before every suffix it is a proper prefix of.
pub struct SuffixArray<S: Symbol> {
    text: Vec<S>,
    sentinel: S,
    arrays: OnceCell<Arrays>,
}

impl<S: Symbol> SuffixArray<S> {
    /// Normalizes `text` with [`Symbol::DEFAULT_SENTINEL`].
    pub fn new<I>(text: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self::build(text, S::DEFAULT_SENTINEL)
    }

    /// Normalizes `text` with `sentinel`. Nothing is sorted yet.
    pub fn build<I>(text: I, sentinel: S) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            text: symbol::normalize(text, sentinel),
            sentinel,
            arrays: OnceCell::new(),
        }
    }

    /// Like `build`, but rejects texts violating the sentinel precondition.
    pub fn checked<I>(text: I, sentinel: S) -> Result<Self, SentinelError<S>>
    where
        I: IntoIterator<Item = S>,
    {
        let sa = Self::build(text, sentinel);
        symbol::check_sentinel(&sa.text, sentinel)?;
        Ok(sa)
    }

    /// Starting positions of all suffixes, in lexicographic order.
    pub fn suffix_array(&self) -> &[usize] {
        &self.arrays().suffix_array
    }

    /// Inverse of the suffix array: the sorted position of every suffix.
    pub fn rank_array(&self) -> &[usize] {
        &self.arrays().rank_array
    }

    /// The normalized text.
    #[inline(always)]
    pub fn text(&self) -> &[S] {
        &self.text
    }

    #[inline(always)]
    pub fn sentinel(&self) -> S {
        self.sentinel
    }

    /// Length of the normalized text, sentinel included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: a normalized text holds at least the sentinel.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The `k`-th smallest suffix.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    pub fn suffix(&self, k: usize) -> &[S] {
        &self.text[self.suffix_array()[k]..]
    }

    /// Panics unless every suffix sorts strictly before the next one.
    pub fn check_valid(&self) {
        let key = |i: usize| self.text[i..].iter().map(|c| c.ordinal());

        for win in self.suffix_array().windows(2) {
            if let &[i, j] = win {
                if !key(i).lt(key(j)) {
                    panic!(
                        "suffix {} {:?} >= suffix {} {:?}",
                        i,
                        &self.text[i..],
                        j,
                        &self.text[j..]
                    );
                }
            } else {
                unreachable!()
            }
        }
    }

    fn arrays(&self) -> &Arrays {
        self.arrays.get_or_init(|| {
            debug!(len = self.text.len(), "building suffix array");

            #[cfg(feature = "profiling")]
            let before = Instant::now();

            let arrays = kmr::suffix_sort(&self.text);

            #[cfg(feature = "profiling")]
            info!(
                "suffix sort took {}",
                DurationSpeed(self.text.len() as u64, before.elapsed())
            );

            arrays
        })
    }
}

impl SuffixArray<char> {
    /// Suffix array over the characters of `text`, with sentinel `$`.
    pub fn from_str(text: &str) -> Self {
        Self::new(text.chars())
    }
}

impl SuffixArray<u8> {
    /// Suffix array over the bytes of `text`, with sentinel `b'$'`.
    pub fn from_bytes(text: &[u8]) -> Self {
        Self::new(text.iter().copied())
    }
}

impl<S: Symbol> fmt::Debug for SuffixArray<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SuffixArray")
            .field("len", &self.text.len())
            .field("sentinel", &self.sentinel)
            .field("sorted", &self.arrays.get().is_some())
            .finish()
    }
}

#[cfg(feature = "profiling")]
mod profiling {
    use std::fmt;

    pub struct DurationSpeed(pub u64, pub std::time::Duration);

    impl fmt::Display for DurationSpeed {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            let (symbols, duration) = (self.0, self.1);
            write!(f, "{:?} ({})", duration, Speed(symbols, duration))
        }
    }

    pub struct Speed(u64, std::time::Duration);

    impl fmt::Display for Speed {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            let (symbols, duration) = (self.0, self.1);
            let per_sec = symbols as f64 / duration.as_secs_f64();

            if per_sec > 1_000_000.0 {
                write!(f, "{:.2} M symbols / s", per_sec / 1_000_000.0)
            } else if per_sec > 1_000.0 {
                write!(f, "{:.1} K symbols / s", per_sec / 1_000.0)
            } else {
                write!(f, "{:.0} symbols / s", per_sec)
            }
        }
    }
}

#[cfg(feature = "profiling")]
use profiling::DurationSpeed;

#[cfg(test)]
mod tests {
    use super::instructions::apply_instructions;
    use super::*;
    use proptest::prelude::*;

    /// Sorts suffixes by direct comparison.
    fn naive_suffix_array<S: Symbol>(text: &[S]) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_by(|&a, &b| {
            let a = text[a..].iter().map(|c| c.ordinal());
            let b = text[b..].iter().map(|c| c.ordinal());
            a.cmp(b)
        });
        sa
    }

    fn assert_sound<S: Symbol>(sa: &SuffixArray<S>) {
        let n = sa.len();
        let suffixes = sa.suffix_array();
        let ranks = sa.rank_array();
        assert_eq!(suffixes.len(), n);
        assert_eq!(ranks.len(), n);

        let mut seen = vec![false; n];
        for &i in suffixes {
            assert!(!seen[i], "position {} listed twice", i);
            seen[i] = true;
        }

        for (k, &i) in suffixes.iter().enumerate() {
            assert_eq!(ranks[i], k);
        }

        sa.check_valid();
        assert_eq!(suffixes, &naive_suffix_array(sa.text())[..]);
    }

    #[test]
    fn banana() {
        let sa = SuffixArray::from_str("banana");
        assert_eq!(sa.text(), &['b', 'a', 'n', 'a', 'n', 'a', '$']);
        assert_eq!(sa.suffix_array(), &[6, 5, 3, 1, 0, 4, 2]);
        assert_eq!(sa.rank_array(), &[4, 3, 6, 2, 5, 1, 0]);

        let sorted: Vec<String> = (0..sa.len())
            .map(|k| sa.suffix(k).iter().collect())
            .collect();
        assert_eq!(
            sorted,
            ["$", "a$", "ana$", "anana$", "banana$", "na$", "nana$"]
        );
    }

    #[test]
    fn empty_text() {
        let sa = SuffixArray::from_str("");
        assert_eq!(sa.text(), &['$']);
        assert!(!sa.is_empty());
        assert_eq!(sa.suffix_array(), &[0]);
        assert_eq!(sa.rank_array(), &[0]);
    }

    #[test]
    fn sentinel_only() {
        let sa = SuffixArray::from_str("$");
        assert_eq!(sa.text(), &['$']);
        assert_eq!(sa.suffix_array(), &[0]);
    }

    #[test]
    fn repeated_symbol() {
        let sa = SuffixArray::from_bytes(b"aaa");
        assert_eq!(sa.text(), b"aaa$");
        assert_eq!(sa.suffix_array(), &[3, 2, 1, 0]);
        assert_eq!(sa.rank_array(), &[3, 2, 1, 0]);
    }

    #[test]
    fn mississippi() {
        let sa = SuffixArray::from_bytes(b"mississippi");
        assert_eq!(
            sa.suffix_array(),
            &[11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]
        );
        assert_sound(&sa);
    }

    #[test]
    fn custom_sentinel() {
        let sa = SuffixArray::build(b"abab".iter().copied(), 0u8);
        assert_eq!(sa.text(), &[b'a', b'b', b'a', b'b', 0]);
        assert_eq!(sa.sentinel(), 0);
        assert_eq!(sa.suffix_array(), &[4, 2, 0, 3, 1]);
        assert_sound(&sa);
    }

    #[test]
    fn wide_symbols() {
        let sa = SuffixArray::<u32>::new([300, 2, 300, 2]);
        assert_eq!(sa.text(), &[300, 2, 300, 2, 36]);
        assert_eq!(sa.suffix_array(), &[3, 1, 4, 2, 0]);
        assert_sound(&sa);
    }

    #[test]
    fn sentinel_inside_text_is_kept() {
        // no sentinel is appended; the last suffix "b" is a prefix of "b$b"
        let sa = SuffixArray::from_bytes(b"b$b");
        assert_eq!(sa.text(), b"b$b");
        assert_eq!(sa.suffix_array(), &[1, 2, 0]);
        assert_sound(&sa);
    }

    #[test]
    fn checked_construction() {
        assert!(SuffixArray::checked("banana".chars(), '$').is_ok());
        assert!(SuffixArray::checked("".chars(), '$').is_ok());
        assert_eq!(
            SuffixArray::checked("a$b".chars(), '$').unwrap_err(),
            SentinelError::Misplaced {
                sentinel: '$',
                position: 1
            }
        );
        assert_eq!(
            SuffixArray::checked("a b".chars(), '$').unwrap_err(),
            SentinelError::NotMinimal {
                sentinel: '$',
                symbol: ' ',
                position: 1
            }
        );
    }

    #[test]
    fn lazily_cached() {
        let sa = SuffixArray::from_str("abracadabra");
        assert!(format!("{:?}", sa).contains("sorted: false"));

        let first = sa.suffix_array().as_ptr();
        let ranks = sa.rank_array().to_vec();
        assert!(format!("{:?}", sa).contains("sorted: true"));

        assert_eq!(sa.suffix_array().as_ptr(), first);
        assert_eq!(sa.rank_array(), &ranks[..]);
        assert_eq!(sa.suffix_array(), &[11, 10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);
    }

    #[test]
    fn unicode() {
        let sa = SuffixArray::from_str("żółw");
        assert_eq!(sa.len(), 5);
        assert_sound(&sa);
    }

    proptest! {
        #[test]
        fn random_bytes(input in proptest::collection::vec(1u8..=255, 0..64)) {
            let sa = SuffixArray::build(input.iter().copied(), 0u8);
            assert_sound(&sa);
        }

        #[test]
        fn small_alphabet(input in "[ab]{0,12}") {
            let sa = SuffixArray::from_str(&input);
            let mut suffixes: Vec<&[char]> = (0..sa.len()).map(|i| &sa.text()[i..]).collect();
            suffixes.sort();
            let expected: Vec<&[char]> = (0..sa.len()).map(|k| sa.suffix(k)).collect();
            prop_assert_eq!(suffixes, expected);
            assert_sound(&sa);
        }

        #[test]
        fn repetitive(seed in proptest::collection::vec(b'a'..=b'c', 1..8), instructions in any::<[u8; 16]>()) {
            let text = apply_instructions(&seed, &instructions);
            let sa = SuffixArray::from_bytes(&text);
            assert_sound(&sa);
        }

        #[test]
        fn deterministic(input in proptest::collection::vec(any::<char>(), 0..32)) {
            let a = SuffixArray::build(input.iter().copied(), '\0');
            let b = SuffixArray::build(input.iter().copied(), '\0');
            prop_assert_eq!(a.suffix_array(), b.suffix_array());
            prop_assert_eq!(a.rank_array(), b.rank_array());
            prop_assert_eq!(a.suffix_array(), a.suffix_array());
        }
    }
}
