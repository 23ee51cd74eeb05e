/*!
# `subpath-json`

A streaming sub-document match engine for JSON values.

Given an opaque JSON document (a byte buffer) and a path describing a location inside it
(`"a.b[3].c"`, `"[-1]"`, ...), this crate locates the targeted region by byte offset, without
ever materializing a tree. The result is a [`matcher::Match`]: a set of byte spans into the
original buffer describing where a value lives, what its enclosing container looks like, and
why the path failed to resolve when it didn't.

## What this crate is not

This is the matching core only. It doesn't tokenize path strings beyond a small convenience
parser (see [`path`]), generate edit spans, or perform numeric arithmetic. Those are expected
to live in a layer above that consumes the [`matcher::Match`] contract.

## Safety

Unlike a general-purpose JSON parser, callers are expected to feed well-formed UTF-8. Bounds are
checked in debug and `checked` builds (see the internal `macros` module) and elided in release
builds once the invariants have been exercised by tests and fuzzing.
*/

#![cfg_attr(checked, deny(warnings))]

#[macro_use]
mod macros;

pub mod error;
pub mod loc;
pub mod path;
pub mod tokenizer;
pub mod validate;

pub mod matcher;

pub use crate::{
    error::SubdocError,
    loc::Loc,
    matcher::{Match, MatchOptions, Matchres, NodeKind},
    path::{Component, Path},
};
