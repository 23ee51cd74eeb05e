//! The recursive-descent scan that drives a [`Tokenizer`].

use super::{ScanControl, SpecialFlags, State, StateKind, Tokenizer, TokenizerError, MAX_DEPTH};
use crate::tokenizer::Visitor;

pub(super) fn run<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
) -> Result<(), TokenizerError> {
    let start = skip_ws(input, 0);
    let end = scan_value(tok, input, visitor, start)?;

    if tok.stopped {
        return Ok(());
    }

    let trailing = skip_ws(input, end);
    if trailing != input.len() {
        return Err(TokenizerError::TrailingContent { at: trailing });
    }

    Ok(())
}

fn scan_value<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
    pos: usize,
) -> Result<usize, TokenizerError> {
    match input.get(pos) {
        Some(b'{') => scan_object(tok, input, visitor, pos),
        Some(b'[') => scan_array(tok, input, visitor, pos),
        Some(b'"') => scan_string(tok, input, visitor, pos, StateKind::String),
        Some(_) => scan_special(tok, input, visitor, pos),
        None => Err(TokenizerError::UnexpectedEof),
    }
}

fn scan_object<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
    pos: usize,
) -> Result<usize, TokenizerError> {
    push(tok, visitor, StateKind::Object, pos)?;
    if tok.stopped {
        return Ok(pos + 1);
    }

    let mut cur = skip_ws(input, pos + 1);

    if input.get(cur) == Some(&b'}') {
        pop(tok, visitor, cur);
        return Ok(cur + 1);
    }

    loop {
        if input.get(cur) != Some(&b'"') {
            return Err(TokenizerError::UnexpectedByte { at: cur });
        }
        cur = scan_string(tok, input, visitor, cur, StateKind::HashKey)?;
        if tok.stopped {
            return Ok(cur);
        }

        cur = skip_ws(input, cur);
        if input.get(cur) != Some(&b':') {
            return Err(TokenizerError::UnexpectedByte { at: cur });
        }
        cur = skip_ws(input, cur + 1);

        cur = scan_value(tok, input, visitor, cur)?;
        if tok.stopped {
            return Ok(cur);
        }

        cur = skip_ws(input, cur);
        match input.get(cur) {
            Some(b',') => cur = skip_ws(input, cur + 1),
            Some(b'}') => {
                pop(tok, visitor, cur);
                return Ok(cur + 1);
            }
            Some(_) => return Err(TokenizerError::UnexpectedByte { at: cur }),
            None => return Err(TokenizerError::UnexpectedEof),
        }
    }
}

fn scan_array<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
    pos: usize,
) -> Result<usize, TokenizerError> {
    push(tok, visitor, StateKind::List, pos)?;
    if tok.stopped {
        return Ok(pos + 1);
    }

    let mut cur = skip_ws(input, pos + 1);

    if input.get(cur) == Some(&b']') {
        pop(tok, visitor, cur);
        return Ok(cur + 1);
    }

    loop {
        cur = scan_value(tok, input, visitor, cur)?;
        if tok.stopped {
            return Ok(cur);
        }

        cur = skip_ws(input, cur);
        match input.get(cur) {
            Some(b',') => cur = skip_ws(input, cur + 1),
            Some(b']') => {
                pop(tok, visitor, cur);
                return Ok(cur + 1);
            }
            Some(_) => return Err(TokenizerError::UnexpectedByte { at: cur }),
            None => return Err(TokenizerError::UnexpectedEof),
        }
    }
}

fn scan_string<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
    pos: usize,
    kind: StateKind,
) -> Result<usize, TokenizerError> {
    push(tok, visitor, kind, pos)?;
    if tok.stopped {
        return Ok(pos + 1);
    }

    let close = scan_string_body(input, pos)?;
    pop(tok, visitor, close);
    Ok(close + 1)
}

/// Scans the body of a string whose opening quote sits at `pos`. Returns the offset of the
/// closing quote. Escapes aren't interpreted, only skipped over (this crate never unescapes).
fn scan_string_body(input: &[u8], pos: usize) -> Result<usize, TokenizerError> {
    let mut cur = pos + 1;
    loop {
        match input.get(cur) {
            None => return Err(TokenizerError::UnterminatedString { at: pos }),
            Some(b'"') => return Ok(cur),
            Some(b'\\') => {
                if input.get(cur + 1).is_none() {
                    return Err(TokenizerError::UnterminatedString { at: pos });
                }
                cur += 2;
            }
            Some(_) => cur += 1,
        }
    }
}

fn scan_special<V: Visitor>(
    tok: &mut Tokenizer,
    input: &[u8],
    visitor: &mut V,
    pos: usize,
) -> Result<usize, TokenizerError> {
    push(tok, visitor, StateKind::Special, pos)?;
    if tok.stopped {
        return Ok(pos + 1);
    }

    let (end, flags, numval) = scan_special_body(input, pos)?;

    if let Some(top) = tok.stack.last_mut() {
        top.special_flags = flags;
        top.numval = numval;
    }

    pop(tok, visitor, end);
    Ok(end)
}

fn scan_special_body(
    input: &[u8],
    pos: usize,
) -> Result<(usize, SpecialFlags, u32), TokenizerError> {
    match input.get(pos) {
        Some(b't') => literal(input, pos, b"true").map(|end| (end, SpecialFlags::TRUE, 0)),
        Some(b'f') => literal(input, pos, b"false").map(|end| (end, SpecialFlags::FALSE, 0)),
        Some(b'n') => literal(input, pos, b"null").map(|end| (end, SpecialFlags::NULL, 0)),
        Some(b'-') | Some(b'0'..=b'9') => scan_number(input, pos),
        Some(_) => Err(TokenizerError::UnexpectedByte { at: pos }),
        None => Err(TokenizerError::UnexpectedEof),
    }
}

fn literal(input: &[u8], pos: usize, text: &[u8]) -> Result<usize, TokenizerError> {
    let end = pos + text.len();
    if input.len() < end || &input[pos..end] != text {
        return Err(TokenizerError::UnexpectedByte { at: pos });
    }
    Ok(end)
}

/// Scans a JSON number. `numval` counts mantissa digits (integer and fractional part); exponent
/// digits aren't counted, since callers use `numval` to size arithmetic, not to validate form.
fn scan_number(input: &[u8], pos: usize) -> Result<(usize, SpecialFlags, u32), TokenizerError> {
    let mut flags = SpecialFlags::NUMERIC;
    let mut numval: u32 = 0;
    let mut cur = pos;

    if input.get(cur) == Some(&b'-') {
        flags |= SpecialFlags::NEGATIVE;
        cur += 1;
    }

    let int_start = cur;
    while matches!(input.get(cur), Some(b'0'..=b'9')) {
        numval += 1;
        cur += 1;
    }
    if cur == int_start {
        return Err(TokenizerError::UnexpectedByte { at: pos });
    }

    if input.get(cur) == Some(&b'.') {
        flags |= SpecialFlags::FLOAT;
        cur += 1;
        let frac_start = cur;
        while matches!(input.get(cur), Some(b'0'..=b'9')) {
            numval += 1;
            cur += 1;
        }
        if cur == frac_start {
            return Err(TokenizerError::UnexpectedByte { at: cur });
        }
    }

    if matches!(input.get(cur), Some(b'e') | Some(b'E')) {
        flags |= SpecialFlags::EXPONENT;
        cur += 1;
        if matches!(input.get(cur), Some(b'+') | Some(b'-')) {
            cur += 1;
        }
        let exp_start = cur;
        while matches!(input.get(cur), Some(b'0'..=b'9')) {
            cur += 1;
        }
        if cur == exp_start {
            return Err(TokenizerError::UnexpectedByte { at: cur });
        }
    }

    Ok((cur, flags, numval))
}

#[inline]
fn skip_ws(input: &[u8], mut pos: usize) -> usize {
    while matches!(input.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

/// Pushes a new state, bumping the enclosing container's `nelem`, then fires `on_push`.
fn push<V: Visitor>(
    tok: &mut Tokenizer,
    visitor: &mut V,
    kind: StateKind,
    pos_begin: usize,
) -> Result<(), TokenizerError> {
    if tok.stack.len() >= MAX_DEPTH {
        return Err(TokenizerError::MaxDepthExceeded);
    }

    if let Some(parent) = tok.stack.last_mut() {
        parent.nelem += 1;
    }

    let level = tok.stack.len();
    tok.stack.push(State::new(level, kind, pos_begin));
    fire_push(tok, visitor, pos_begin);
    Ok(())
}

/// Finalizes the top state's span, fires `on_pop`, then actually removes it from the stack.
fn pop<V: Visitor>(tok: &mut Tokenizer, visitor: &mut V, end_pos: usize) {
    if let Some(top) = tok.stack.last_mut() {
        top.pos_cur = end_pos;
    }
    fire_pop(tok, visitor, end_pos);
    tok.stack.pop();
}

fn fire_push<V: Visitor>(tok: &mut Tokenizer, visitor: &mut V, at: usize) {
    if tok.stopped || tok.stack.len() > tok.max_callback_level {
        return;
    }
    let Tokenizer {
        stack,
        max_callback_level,
        stopped,
    } = tok;
    let mut ctl = ScanControl {
        max_callback_level,
        stopped,
    };
    visitor.on_push(&mut ctl, stack, at);
}

fn fire_pop<V: Visitor>(tok: &mut Tokenizer, visitor: &mut V, at: usize) {
    if tok.stopped || tok.stack.len() > tok.max_callback_level {
        return;
    }
    let Tokenizer {
        stack,
        max_callback_level,
        stopped,
    } = tok;
    let mut ctl = ScanControl {
        max_callback_level,
        stopped,
    };
    visitor.on_pop(&mut ctl, stack, at);
}
