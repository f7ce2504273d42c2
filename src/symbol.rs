use std::{error::Error as StdError, fmt};

/// A symbol of the text alphabet.
///
/// Symbols are compared through their ordinal, which also seeds the
/// radius-1 rank table.
pub trait Symbol: Copy + Eq + fmt::Debug {
    /// Sentinel used when none is given explicitly.
    const DEFAULT_SENTINEL: Self;

    fn ordinal(self) -> u32;
}

impl Symbol for u8 {
    const DEFAULT_SENTINEL: Self = b'$';

    #[inline(always)]
    fn ordinal(self) -> u32 {
        self as u32
    }
}

impl Symbol for u16 {
    const DEFAULT_SENTINEL: Self = b'$' as u16;

    #[inline(always)]
    fn ordinal(self) -> u32 {
        self as u32
    }
}

impl Symbol for u32 {
    const DEFAULT_SENTINEL: Self = b'$' as u32;

    #[inline(always)]
    fn ordinal(self) -> u32 {
        self
    }
}

impl Symbol for char {
    const DEFAULT_SENTINEL: Self = '$';

    #[inline(always)]
    fn ordinal(self) -> u32 {
        self as u32
    }
}

/// Appends `sentinel` unless it already occurs somewhere in `text`.
///
/// A sentinel found in the middle of the text counts as present: nothing
/// is appended and the text is kept as given.
pub fn normalize<S, I>(text: I, sentinel: S) -> Vec<S>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let mut text: Vec<S> = text.into_iter().collect();
    if !text.contains(&sentinel) {
        text.push(sentinel);
    }
    text
}

/// Sentinel precondition violated by a normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentinelError<S> {
    /// The text does not end in the sentinel.
    Missing { sentinel: S },
    /// The sentinel occurs at `position`, before the end of the text.
    Misplaced { sentinel: S, position: usize },
    /// `symbol` at `position` does not compare above the sentinel.
    NotMinimal {
        sentinel: S,
        symbol: S,
        position: usize,
    },
}

impl<S: Symbol> fmt::Display for SentinelError<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SentinelError::Missing { sentinel } => {
                write!(f, "text does not end in sentinel {:?}", sentinel)
            }
            SentinelError::Misplaced { sentinel, position } => write!(
                f,
                "sentinel {:?} found at position {}, expected only at the end",
                sentinel, position
            ),
            SentinelError::NotMinimal {
                sentinel,
                symbol,
                position,
            } => write!(
                f,
                "symbol {:?} at position {} does not sort above sentinel {:?}",
                symbol, position, sentinel
            ),
        }
    }
}

impl<S: Symbol> StdError for SentinelError<S> {}

/// Checks that `text` ends in its only occurrence of `sentinel`, and that
/// every other symbol has a strictly greater ordinal.
pub fn check_sentinel<S: Symbol>(text: &[S], sentinel: S) -> Result<(), SentinelError<S>> {
    let Some((&last, body)) = text.split_last() else {
        return Err(SentinelError::Missing { sentinel });
    };

    let bound = sentinel.ordinal();
    for (position, &symbol) in body.iter().enumerate() {
        if symbol == sentinel {
            return Err(SentinelError::Misplaced { sentinel, position });
        }
        if symbol.ordinal() <= bound {
            return Err(SentinelError::NotMinimal {
                sentinel,
                symbol,
                position,
            });
        }
    }
    if last != sentinel {
        return Err(SentinelError::Missing { sentinel });
    }
    Ok(())
}
