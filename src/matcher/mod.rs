/*!
The sub-document match engine.

[`exec_match`] walks a document with a single [`crate::tokenizer::Tokenizer`] pass and reports
where a [`crate::Path`] resolves to, as byte spans into the document — never as an owned or
parsed value.
*/

mod engine;
mod negix;

use crate::loc::Loc;
use crate::path::Path;
use crate::tokenizer::{SpecialFlags, StateKind, Tokenizer, TokenizerError};

/// The kind of JSON value a [`Match`] or [`LastChild`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    List,
    String,
    Special,
}

impl NodeKind {
    #[inline]
    fn from_state_kind(kind: StateKind) -> Self {
        match kind {
            StateKind::Object => NodeKind::Object,
            StateKind::List => NodeKind::List,
            StateKind::String => NodeKind::String,
            StateKind::Special => NodeKind::Special,
            StateKind::HashKey => unreachable!("hash keys never surface as a matched node kind"),
        }
    }

    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::List)
    }
}

/// The overall outcome of a match attempt.
///
/// [`Matchres::PossibleAncestor`] is an intermediate state used while a scan is still in
/// progress; [`exec_match`] never returns it — by the time a match finishes, every
/// `PossibleAncestor` has resolved to one of the other three variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matchres {
    /// The path fully resolved to a value.
    Complete,
    /// An ancestor of the target exists, but the path itself does not.
    NoMatch,
    /// A descent in progress; never observed on a finished [`Match`].
    PossibleAncestor,
    /// The path crosses a container of the wrong kind, or steps into a scalar.
    TypeMismatch,
}

/// The deepest existing child of a matched container, when [`MatchOptions::get_last_child_pos`]
/// is set and the match is a non-empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastChild {
    pub loc: Loc,
    pub kind: NodeKind,
    pub special_flags: SpecialFlags,
    pub numval: u32,
    /// 0-based position of this child within its parent array.
    pub index: u64,
}

/// Options controlling a single [`exec_match`] call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// When set and the match completes on a list, the list's direct children are checked for
    /// byte-equality against this span; see [`Match::unique_item_found`].
    pub ensure_unique: Option<Loc>,
    /// When set and the match completes on a non-empty list, populate [`Match::last_child`].
    pub get_last_child_pos: bool,
}

/// The result of matching a [`Path`] against a document.
#[derive(Debug, Clone, Copy)]
pub struct Match {
    /// Set when the scan itself failed on malformed input; `matchres` is meaningless if so.
    pub status: Option<TokenizerError>,
    pub matchres: Matchres,
    /// The kind of the matched node. Populated for `Complete`; for `NoMatch`/`TypeMismatch` it
    /// describes the deepest existing ancestor instead.
    pub node_type: Option<NodeKind>,
    /// The matched value's own span. Only set when `matchres == Complete`.
    pub loc_match: Option<Loc>,
    /// The deepest existing container's span. Set whenever any container was entered at all.
    pub loc_parent: Option<Loc>,
    /// The matched node's own key, if it's a value inside an object.
    pub loc_key: Option<Loc>,
    pub has_key: bool,
    /// Nesting depth (root is 0) at which `loc_match`/`loc_parent` was found.
    pub match_level: usize,
    /// Zero-based position of the matched node among its siblings.
    pub position: Option<u64>,
    /// Sibling count of `loc_parent`.
    pub num_siblings: Option<u64>,
    /// True iff `loc_parent` corresponds exactly to the prefix of the path minus its last step —
    /// the condition under which a single missing key/index could be created in place.
    pub immediate_parent_found: bool,
    pub special_flags: SpecialFlags,
    pub numval: u32,
    /// True iff `ensure_unique` was set, the match completed on a list, and a byte-identical
    /// sibling was found among its children.
    pub unique_item_found: bool,
    pub last_child: Option<LastChild>,
}

impl Default for Match {
    fn default() -> Self {
        Match {
            status: None,
            matchres: Matchres::NoMatch,
            node_type: None,
            loc_match: None,
            loc_parent: None,
            loc_key: None,
            has_key: false,
            match_level: 0,
            position: None,
            num_siblings: None,
            immediate_parent_found: false,
            special_flags: SpecialFlags::empty(),
            numval: 0,
            unique_item_found: false,
            last_child: None,
        }
    }
}

/// Match `path` against `document`, choosing the single-pass or negative-index algorithm as
/// needed.
pub fn exec_match(document: &[u8], path: &Path, options: MatchOptions) -> Match {
    if path.has_negative() {
        negix::exec_match_negix(document, path, options)
    } else {
        exec_match_simple(document, path, options)
    }
}

/// Match `path` against `document` in a single tokenizer pass. Requires that `path` contains no
/// [`crate::path::Component::LastChildMarker`] steps; [`exec_match`] routes those to
/// [`negix::exec_match_negix`] instead.
pub(crate) fn exec_match_simple(document: &[u8], path: &Path, options: MatchOptions) -> Match {
    let mut tokenizer = Tokenizer::new();
    let mut eng = engine::MatchEngine::new(document, path, options);

    if let Err(e) = tokenizer.feed(document, &mut eng) {
        let mut result = eng.into_result();
        result.status = Some(e);
        result.matchres = Matchres::NoMatch;
        return result;
    }

    eng.into_result()
}
