/*
The behavior of malformed input isn't guaranteed beyond what `TokenizerError` documents, but we
want to make sure we avoid:

- attempting to index out-of-bounds
- infinite loops while scanning
- silently returning a `Complete` match over malformed input

There are two kinds of tests here:

- `err_*` tests that are inputs that should be detected as erroneous.
- `invalid_*` tests that are inputs that are erroneous but which the tokenizer doesn't detect as
  such on its own (surfacing instead as a `NoMatch`/`TypeMismatch` further up, or a validator
  rejection via framing).

Many of these cases are the kind fuzz testing turns up.
*/

use crate::matcher::{exec_match, MatchOptions, Matchres};
use crate::path::Path;
use crate::tokenizer::{Tokenizer, TokenizerError};
use crate::validate::{validate, Framing, ValidateFlags, ValidateResult};

struct NoopVisitor;

impl crate::tokenizer::Visitor for NoopVisitor {
    fn on_push(&mut self, _ctl: &mut crate::tokenizer::ScanControl<'_>, _stack: &[crate::tokenizer::State], _at: usize) {}
    fn on_pop(&mut self, _ctl: &mut crate::tokenizer::ScanControl<'_>, _stack: &[crate::tokenizer::State], _at: usize) {}
}

fn scan(input: &[u8]) -> Result<(), TokenizerError> {
    let mut tokenizer = Tokenizer::new();
    let mut visitor = NoopVisitor;
    tokenizer.feed(input, &mut visitor)
}

#[test]
fn err_truncated_object() {
    let input = b"{\"a\":42";

    assert_eq!(scan(input), Err(TokenizerError::UnexpectedEof));
}

#[test]
fn err_incomplete_string() {
    let input = b"{\"a\":\"this string is not finished}";

    assert!(matches!(scan(input), Err(TokenizerError::UnterminatedString { .. })));
}

#[test]
fn err_incomplete_string_escape() {
    // an odd number of trailing backslashes: the closing quote is escaped away, leaving the
    // string unterminated rather than closed.
    let input = br#"{"a":"\\\"}"#;

    assert!(matches!(scan(input), Err(TokenizerError::UnterminatedString { .. })));
}

#[test]
fn err_root_level_premature_close() {
    let input = b"{\"a\"],42}";

    assert!(scan(input).is_err());
}

#[test]
fn err_unexpected_byte_after_value() {
    let input = b"42 43";

    assert_eq!(scan(input), Err(TokenizerError::TrailingContent { at: 3 }));
}

#[test]
fn err_unexpected_byte_in_object() {
    let input = b"{\"a\" 1}";

    assert!(matches!(scan(input), Err(TokenizerError::UnexpectedByte { .. })));
}

#[test]
fn err_max_depth_exceeded() {
    let mut input = vec![b'['; 1024];
    input.extend(vec![b']'; 1024]);

    assert_eq!(scan(&input), Err(TokenizerError::MaxDepthExceeded));
}

#[test]
fn err_empty_input() {
    assert_eq!(scan(b""), Err(TokenizerError::UnexpectedEof));
}

#[test]
fn err_bare_key_without_colon() {
    let input = b"{\"a\" \"b\"}";

    assert!(scan(input).is_err());
}

#[test]
fn invalid_document_surfaces_as_no_match_status() {
    let input = b"{\"a\":";
    let m = exec_match(input, &Path::parse("a").unwrap(), MatchOptions::default());

    assert!(m.status.is_some());
    assert_eq!(m.matchres, Matchres::NoMatch);
}

#[test]
fn invalid_scalar_crossed_by_non_terminal_path() {
    let input = b"42";
    let m = exec_match(input, &Path::parse("a.b").unwrap(), MatchOptions::default());

    assert_eq!(m.matchres, Matchres::TypeMismatch);
}

#[test]
fn invalid_array_index_path_against_object() {
    let input = br#"{"a":1}"#;
    let m = exec_match(input, &Path::parse("a[0]").unwrap(), MatchOptions::default());

    assert_eq!(m.matchres, Matchres::TypeMismatch);
}

#[test]
fn invalid_object_key_path_against_array() {
    let input = b"[1,2,3]";
    let m = exec_match(input, &Path::parse("a").unwrap(), MatchOptions::default());

    assert_eq!(m.matchres, Matchres::TypeMismatch);
}

#[test]
fn validate_rejects_unterminated_string_candidate_via_framing() {
    assert!(matches!(
        validate(br#""unterminated"#, Framing::ArrayElement, ValidateFlags::default()),
        ValidateResult::Malformed(TokenizerError::UnterminatedString { .. })
    ));
}

#[test]
fn validate_reports_partial_for_truncated_container() {
    assert_eq!(
        validate(br#"{"a":1"#, Framing::None, ValidateFlags::default()),
        ValidateResult::Partial
    );
}

#[test]
fn validate_rejects_non_value_garbage() {
    assert!(matches!(
        validate(b"not json", Framing::None, ValidateFlags::default()),
        ValidateResult::Malformed(_)
    ));
}

#[test]
fn validate_rejects_container_candidate_under_primitive_only() {
    let flags = ValidateFlags { primitive_only: true, ..Default::default() };

    assert_eq!(
        validate(b"[1,2,3]", Framing::DictValue, flags),
        ValidateResult::NotPrimitive
    );
}

#[test]
fn validate_rejects_overfull_wrapper_under_single_value() {
    // A candidate that smuggles in a second key/value pair: `{"k":1,"extra":2}` parses as a
    // perfectly valid object, so only counting the wrapper's final child count catches it.
    let flags = ValidateFlags { single_value: true, ..Default::default() };

    assert_eq!(
        validate(br#"1,"extra":2"#, Framing::DictValue, flags),
        ValidateResult::MultipleElements
    );
}
