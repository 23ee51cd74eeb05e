/*!
A streaming, offset-tracking JSON scanner.

The [`Tokenizer`] never builds a tree. It walks a byte buffer with a recursive-descent scan,
maintaining an explicit [`State`] stack, and reports container pushes/pops and scalar spans to a
[`Visitor`] as byte offsets into the original buffer. Everything downstream (the match engine,
the validator) is built on top of this single scan.
*/

mod scan;

use std::fmt;

use crate::loc::Loc;

/// The kind of a scanner state on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Object,
    List,
    /// An object's key. Always pushed and popped before its paired value; never visible to a
    /// [`Visitor`] as a sibling of that value on the stack.
    HashKey,
    String,
    /// `true`, `false`, `null`, or a number.
    Special,
}

impl StateKind {
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, StateKind::Object | StateKind::List)
    }
}

/// Bits describing the lexical shape of a [`StateKind::Special`] token.
///
/// Distinct from [`crate::matcher::NodeKind`]: this is what the scanner observed while reading
/// the token, not the classification the matcher reports to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecialFlags(u8);

impl SpecialFlags {
    pub const NUMERIC: SpecialFlags = SpecialFlags(1 << 0);
    pub const FLOAT: SpecialFlags = SpecialFlags(1 << 1);
    pub const EXPONENT: SpecialFlags = SpecialFlags(1 << 2);
    pub const NEGATIVE: SpecialFlags = SpecialFlags(1 << 3);
    pub const TRUE: SpecialFlags = SpecialFlags(1 << 4);
    pub const FALSE: SpecialFlags = SpecialFlags(1 << 5);
    pub const NULL: SpecialFlags = SpecialFlags(1 << 6);

    #[inline]
    pub const fn empty() -> Self {
        SpecialFlags(0)
    }

    #[inline]
    pub const fn contains(self, other: SpecialFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: SpecialFlags) -> Self {
        SpecialFlags(self.0 | other.0)
    }
}

impl std::ops::BitOr for SpecialFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for SpecialFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A single frame of the scanner's stack.
///
/// `pos_cur` carries different meanings depending on `kind`, matching the asymmetry of how each
/// token's end is detected: for [`StateKind::Object`]/[`StateKind::List`]/[`StateKind::String`]
/// it is the offset of the token's own closing byte (`}`, `]`, or the closing `"`) and the full
/// span is `pos_cur - pos_begin + 1`; for [`StateKind::Special`] it is already the offset one
/// past the last digit, so the span is `pos_cur - pos_begin`.
#[derive(Debug, Clone, Copy)]
pub struct State {
    pub level: usize,
    pub kind: StateKind,
    pub pos_begin: usize,
    pub pos_cur: usize,
    /// Count of direct children pushed under this container so far. For objects this counts
    /// both keys and values, so a pair position is `(nelem - 1) / 2`.
    pub nelem: u64,
    pub special_flags: SpecialFlags,
    /// Digit count for a `Special` state; unused otherwise.
    pub numval: u32,
}

impl State {
    #[inline]
    fn new(level: usize, kind: StateKind, pos_begin: usize) -> Self {
        State {
            level,
            kind,
            pos_begin,
            pos_cur: pos_begin,
            nelem: 0,
            special_flags: SpecialFlags::empty(),
            numval: 0,
        }
    }

    /// This state's own span, per the `pos_cur` convention described on the type.
    #[inline]
    pub fn span(&self) -> Loc {
        match self.kind {
            StateKind::Special => Loc::new(self.pos_begin, self.pos_cur - self.pos_begin),
            _ => Loc::new(self.pos_begin, self.pos_cur - self.pos_begin + 1),
        }
    }
}

/// An error produced while scanning malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerError {
    UnexpectedEof,
    UnexpectedByte { at: usize },
    UnterminatedString { at: usize },
    MaxDepthExceeded,
    TrailingContent { at: usize },
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::UnexpectedEof => write!(f, "unexpected end of input"),
            TokenizerError::UnexpectedByte { at } => write!(f, "unexpected byte at offset {at}"),
            TokenizerError::UnterminatedString { at } => {
                write!(f, "unterminated string starting at offset {at}")
            }
            TokenizerError::MaxDepthExceeded => write!(f, "maximum nesting depth exceeded"),
            TokenizerError::TrailingContent { at } => {
                write!(f, "trailing content after value at offset {at}")
            }
        }
    }
}

impl std::error::Error for TokenizerError {}

/// The maximum nesting depth the scanner will follow before giving up.
///
/// Chosen to comfortably exceed any realistic document while still bounding stack growth for
/// adversarial input; not a tunable, since it only exists to turn unbounded recursion into a
/// catchable error.
pub const MAX_DEPTH: usize = 512;

/// A handle a [`Visitor`] uses to steer the in-progress scan.
pub struct ScanControl<'a> {
    max_callback_level: &'a mut usize,
    stopped: &'a mut bool,
}

impl<'a> ScanControl<'a> {
    /// Suppress visitor calls for anything deeper than `level`. Pure performance: the scanner
    /// keeps parsing underneath the threshold, it just stops reporting it.
    #[inline]
    pub fn set_max_callback_level(&mut self, level: usize) {
        *self.max_callback_level = level;
    }

    #[inline]
    pub fn max_callback_level(&self) -> usize {
        *self.max_callback_level
    }

    /// Abort the scan outright. Unlike `set_max_callback_level`, this unwinds the whole
    /// recursive scan immediately; no further visitor calls fire, including pops for states
    /// still open on the stack.
    #[inline]
    pub fn stop(&mut self) {
        *self.stopped = true;
    }
}

/// Receives push/pop events from a [`Tokenizer`] scan.
///
/// `on_push` fires once a token's opening byte (and, for containers, nothing past it) has been
/// seen; `stack` includes the just-pushed state as its last element. `on_pop` fires once a
/// token's full span is known, with the about-to-be-removed state still the last element of
/// `stack`.
pub trait Visitor {
    fn on_push(&mut self, ctl: &mut ScanControl<'_>, stack: &[State], at: usize);
    fn on_pop(&mut self, ctl: &mut ScanControl<'_>, stack: &[State], at: usize);
}

/// A recursive-descent, offset-tracking JSON scanner.
pub struct Tokenizer {
    stack: Vec<State>,
    max_callback_level: usize,
    stopped: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            stack: Vec::with_capacity(16),
            max_callback_level: usize::MAX,
            stopped: false,
        }
    }

    /// Reset to a fresh state so the same `Tokenizer` can scan another document.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.max_callback_level = usize::MAX;
        self.stopped = false;
    }

    /// Scan a single JSON value out of `input`, reporting events to `visitor`.
    ///
    /// Leading and trailing insignificant whitespace is tolerated; anything else left over
    /// after the value is a [`TokenizerError::TrailingContent`].
    pub fn feed<V: Visitor>(
        &mut self,
        input: &[u8],
        visitor: &mut V,
    ) -> Result<(), TokenizerError> {
        self.reset();
        scan::run(self, input, visitor)
    }
}
