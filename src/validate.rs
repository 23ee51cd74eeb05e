/*!
Whole-buffer validation, reusing the tokenizer rather than a separate parser.

A mutation op that's about to splice a candidate value into a document needs to know it's
actually a single, complete JSON value before it touches any bytes. [`validate`] answers that
without materializing anything: it wraps the candidate in a tiny synthetic frame (so the same
depth/structure rules the tokenizer already enforces for real documents apply here too) and
drives one scan over it, using the scan's own pop events to enforce the `ValidateFlags` the
caller asked for.
*/

use crate::tokenizer::{ScanControl, State, StateKind, Tokenizer, TokenizerError, Visitor};

/// How a candidate value is framed before scanning, so the tokenizer's own container rules
/// (exactly one value, no trailing content) validate it for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Scan the bytes exactly as given: used to validate a full document.
    None,
    /// Wrap as `[<bytes>]`, used to validate a single array element.
    ArrayElement,
    /// Wrap as `{"k":<bytes>}`, used to validate a single object value.
    DictValue,
}

impl Framing {
    /// The wrapper's expected child count once exactly one value has been framed into it:
    /// one element for an array, one key plus one value for an object. `None` has no wrapper.
    fn expected_wrapper_nelem(self) -> Option<u64> {
        match self {
            Framing::None => None,
            Framing::ArrayElement => Some(1),
            Framing::DictValue => Some(2),
        }
    }
}

/// Flags controlling what [`validate`] enforces about the candidate beyond "well-formed JSON".
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateFlags {
    /// The candidate's own value must not be a container (object or array).
    pub primitive_only: bool,
    /// Under `ArrayElement`/`DictValue` framing, the wrapper must contain exactly the one
    /// element the framing added — no more. Ignored under `Framing::None`, which has no wrapper
    /// to overfill.
    pub single_value: bool,
}

/// The outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateResult {
    /// Exactly one well-formed value, and nothing else.
    Ok,
    /// The input ended before a value finished (an unterminated string, an open brace, ...).
    Partial,
    /// More than one value, or extra non-whitespace content, followed the first.
    MultipleElements,
    /// `ValidateFlags::primitive_only` was set and the candidate's value is an object or array.
    NotPrimitive,
    /// The value is malformed in some way other than truncation.
    Malformed(TokenizerError),
}

/// Validate `candidate` as a single JSON value, under `framing`, enforcing `flags`.
pub fn validate(candidate: &[u8], framing: Framing, flags: ValidateFlags) -> ValidateResult {
    let framed: Vec<u8>;
    let input: &[u8] = match framing {
        Framing::None => candidate,
        Framing::ArrayElement => {
            framed = frame(b"[", candidate, b"]");
            &framed
        }
        Framing::DictValue => {
            framed = frame(b"{\"k\":", candidate, b"}");
            &framed
        }
    };

    let mut tokenizer = Tokenizer::new();
    let mut visitor = ValidatingVisitor::new(framing);

    match tokenizer.feed(input, &mut visitor) {
        Ok(()) => {}
        Err(TokenizerError::UnexpectedEof) => return ValidateResult::Partial,
        Err(TokenizerError::TrailingContent { .. }) => return ValidateResult::MultipleElements,
        Err(other) => return ValidateResult::Malformed(other),
    }

    if flags.primitive_only {
        if let Some(kind) = visitor.value_kind {
            if kind.is_container() {
                return ValidateResult::NotPrimitive;
            }
        }
    }

    if flags.single_value {
        if let Some(expected) = framing.expected_wrapper_nelem() {
            match visitor.wrapper_nelem {
                Some(n) if n > expected => return ValidateResult::MultipleElements,
                Some(n) if n < expected => return ValidateResult::Partial,
                _ => {}
            }
        }
    }

    ValidateResult::Ok
}

fn frame(pre: &[u8], middle: &[u8], post: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pre.len() + middle.len() + post.len());
    out.extend_from_slice(pre);
    out.extend_from_slice(middle);
    out.extend_from_slice(post);
    out
}

/// Tracks just enough of the scan to answer `ValidateFlags`: the kind of the candidate's own
/// value (for `primitive_only`), and the wrapper's final child count (for `single_value`).
struct ValidatingVisitor {
    framing: Framing,
    value_kind: Option<StateKind>,
    wrapper_nelem: Option<u64>,
}

impl ValidatingVisitor {
    fn new(framing: Framing) -> Self {
        ValidatingVisitor {
            framing,
            value_kind: None,
            wrapper_nelem: None,
        }
    }
}

impl Visitor for ValidatingVisitor {
    fn on_push(&mut self, _ctl: &mut ScanControl<'_>, _stack: &[State], _at: usize) {}

    fn on_pop(&mut self, _ctl: &mut ScanControl<'_>, stack: &[State], _at: usize) {
        let state = *stack.last().expect("pop always yields a state");

        if state.kind == StateKind::HashKey {
            return;
        }

        match self.framing {
            Framing::None => {
                if state.level == 0 {
                    self.value_kind = Some(state.kind);
                }
            }
            Framing::ArrayElement | Framing::DictValue => {
                if state.level == 0 {
                    self.wrapper_nelem = Some(state.nelem);
                } else if state.level == 1 {
                    self.value_kind = Some(state.kind);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_complete_document() {
        assert_eq!(
            validate(br#"{"a":1}"#, Framing::None, ValidateFlags::default()),
            ValidateResult::Ok
        );
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(
            validate(br#"{"a":1"#, Framing::None, ValidateFlags::default()),
            ValidateResult::Partial
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(
            validate(br#"{"a":1} {"b":2}"#, Framing::None, ValidateFlags::default()),
            ValidateResult::MultipleElements
        );
    }

    #[test]
    fn validates_an_array_element_via_framing() {
        assert_eq!(
            validate(br#""hello""#, Framing::ArrayElement, ValidateFlags::default()),
            ValidateResult::Ok
        );
        assert_eq!(
            validate(br#""hello" "world""#, Framing::ArrayElement, ValidateFlags::default()),
            ValidateResult::Malformed(TokenizerError::UnexpectedByte { at: 9 })
        );
    }

    #[test]
    fn validates_a_dict_value_via_framing() {
        assert_eq!(
            validate(b"42", Framing::DictValue, ValidateFlags::default()),
            ValidateResult::Ok
        );
        assert_eq!(
            validate(b"4x2", Framing::DictValue, ValidateFlags::default()),
            ValidateResult::Malformed(TokenizerError::UnexpectedByte { at: 6 })
        );
    }

    #[test]
    fn single_value_rejects_a_comma_joined_array_candidate() {
        // `1,2` is itself a syntactically valid pair of array elements once framed — exactly
        // the case plain framing can't catch, since `[1,2]` is well-formed JSON.
        assert_eq!(
            validate(
                b"1,2",
                Framing::ArrayElement,
                ValidateFlags { single_value: true, ..Default::default() }
            ),
            ValidateResult::MultipleElements
        );
    }

    #[test]
    fn single_value_accepts_a_lone_array_candidate() {
        assert_eq!(
            validate(
                b"1",
                Framing::ArrayElement,
                ValidateFlags { single_value: true, ..Default::default() }
            ),
            ValidateResult::Ok
        );
    }

    #[test]
    fn primitive_only_rejects_a_container_candidate() {
        assert_eq!(
            validate(
                b"{}",
                Framing::ArrayElement,
                ValidateFlags { primitive_only: true, ..Default::default() }
            ),
            ValidateResult::NotPrimitive
        );
        assert_eq!(
            validate(
                b"[]",
                Framing::None,
                ValidateFlags { primitive_only: true, ..Default::default() }
            ),
            ValidateResult::NotPrimitive
        );
    }

    #[test]
    fn primitive_only_accepts_a_scalar_candidate() {
        assert_eq!(
            validate(
                br#""hello""#,
                Framing::DictValue,
                ValidateFlags { primitive_only: true, ..Default::default() }
            ),
            ValidateResult::Ok
        );
    }

    #[test]
    fn multi_element_document_without_framing_is_detected_via_trailing_content() {
        assert_eq!(
            validate(br#""hello" "world""#, Framing::None, ValidateFlags::default()),
            ValidateResult::MultipleElements
        );
    }
}
