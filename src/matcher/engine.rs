//! The [`crate::tokenizer::Visitor`] implementation that drives a single-pass match.

use crate::loc::Loc;
use crate::path::{Component, Path};
use crate::tokenizer::{ScanControl, State, StateKind, Visitor};

use super::{LastChild, Match, MatchOptions, Matchres, NodeKind};

/// Per-depth scratch tracked in lockstep with the tokenizer's own stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeResult {
    /// Not yet classified, or intentionally untracked (a hash key, or inside a
    /// post-completion scan).
    Unknown,
    /// This node matched its expected step and more of the path remains.
    PossibleAncestor,
    Complete,
    /// This node didn't match its expected step; its subtree is irrelevant.
    NoMatch,
    TypeMismatch,
}

/// State for the scan that continues through a matched list's children once `Complete` has
/// already been determined — either to check uniqueness, to find the last child, or both.
struct PostComplete {
    /// Tokenizer depth of the matched list's direct children.
    array_level: usize,
    track_last_child: bool,
    check_unique: bool,
}

pub(super) struct MatchEngine<'d, 'p> {
    document: &'d [u8],
    path: &'p Path,
    options: MatchOptions,
    result: Match,
    scratch: Vec<NodeResult>,
    pending_key: Option<Loc>,
    loc_parent_recorded: bool,
    post_complete: Option<PostComplete>,
}

impl<'d, 'p> MatchEngine<'d, 'p> {
    pub(super) fn new(document: &'d [u8], path: &'p Path, options: MatchOptions) -> Self {
        MatchEngine {
            document,
            path,
            options,
            result: Match::default(),
            scratch: Vec::new(),
            pending_key: None,
            loc_parent_recorded: false,
            post_complete: None,
        }
    }

    pub(super) fn into_result(mut self) -> Match {
        // Every container that ever became a `PossibleAncestor` resolves at its own pop; this
        // only guards against a scan that never reached that point (shouldn't happen for a
        // well-formed document, but a stuck `PossibleAncestor` must never leak out as a result).
        if self.result.matchres == Matchres::PossibleAncestor {
            self.result.matchres = Matchres::NoMatch;
        }
        self.result
    }

    fn push_initial(&mut self, state: State) {
        if self.path.ncomponents() == 0 {
            self.result.matchres = Matchres::Complete;
            self.result.node_type = Some(NodeKind::from_state_kind(state.kind));
            self.result.match_level = 0;
            self.scratch.push(NodeResult::Complete);

            if state.kind.is_container() {
                self.maybe_enter_post_complete(state);
            }
        } else {
            self.result.matchres = Matchres::PossibleAncestor;
            self.result.match_level = 0;
            self.scratch.push(NodeResult::PossibleAncestor);
        }
    }

    fn push_descend(&mut self, stack: &[State], state: State) {
        let parent = stack[stack.len() - 2];

        if self.scratch[parent.level] != NodeResult::PossibleAncestor {
            self.scratch.push(NodeResult::NoMatch);
            return;
        }

        let key_loc = if parent.kind == StateKind::Object {
            self.pending_key.take()
        } else {
            None
        };
        let array_index = if parent.kind == StateKind::List {
            Some(parent.nelem - 1)
        } else {
            None
        };

        let target_idx = parent.level + 1;
        let target = &self.path.components()[target_idx];

        let key_slice = key_loc.map(|loc| {
            let bytes = loc.as_bytes(self.document);
            &bytes[1..bytes.len() - 1]
        });

        if !matches_component(target, parent.kind, key_slice, array_index) {
            self.scratch.push(NodeResult::NoMatch);
            return;
        }

        let terminal = target_idx == self.path.ncomponents();

        if terminal {
            self.result.matchres = Matchres::Complete;
            self.result.node_type = Some(NodeKind::from_state_kind(state.kind));
            self.result.match_level = state.level;
            self.result.loc_key = key_loc;
            self.result.has_key = key_loc.is_some();
            self.result.position = Some(array_index.unwrap_or((parent.nelem - 1) / 2));
            self.scratch.push(NodeResult::Complete);

            if state.kind.is_container() {
                self.maybe_enter_post_complete(state);
            }
        } else if state.kind.is_container() {
            self.result.match_level = state.level;
            self.scratch.push(NodeResult::PossibleAncestor);
        } else {
            // The path expects to keep descending, but this node is a scalar: there's nowhere
            // further to go.
            self.result.matchres = Matchres::TypeMismatch;
            self.scratch.push(NodeResult::TypeMismatch);
        }
    }

    fn maybe_enter_post_complete(&mut self, state: State) {
        if state.kind != StateKind::List {
            return;
        }

        let track_last_child = self.options.get_last_child_pos;
        let check_unique = self.options.ensure_unique.is_some();

        if !track_last_child && !check_unique {
            return;
        }

        self.post_complete = Some(PostComplete {
            array_level: state.level + 1,
            track_last_child,
            check_unique,
        });
    }

    fn pop_array_child(&mut self, ctl: &mut ScanControl<'_>, state: State) {
        let pc = self.post_complete.as_ref().unwrap();
        let track_last_child = pc.track_last_child;
        let check_unique = pc.check_unique && !self.result.unique_item_found;

        if track_last_child {
            self.result.last_child = Some(LastChild {
                loc: state.span(),
                kind: NodeKind::from_state_kind(state.kind),
                special_flags: state.special_flags,
                numval: state.numval,
                // Filled in once the array itself pops and its final `nelem` is known.
                index: 0,
            });
        }

        if !check_unique {
            return;
        }

        let candidate = match self.options.ensure_unique {
            Some(c) => c,
            None => return,
        };
        let candidate_bytes = candidate.as_bytes(self.document);
        let sibling_bytes = state.span().as_bytes(self.document);

        let equal = match state.kind {
            StateKind::String => {
                candidate_bytes.len() >= 2
                    && candidate_bytes.len() == sibling_bytes.len()
                    && candidate_bytes[1..candidate_bytes.len() - 1]
                        == sibling_bytes[1..sibling_bytes.len() - 1]
            }
            StateKind::Special => candidate_bytes == sibling_bytes,
            StateKind::Object | StateKind::List => {
                self.result.matchres = Matchres::TypeMismatch;
                if !track_last_child {
                    ctl.set_max_callback_level(1);
                    ctl.stop();
                }
                return;
            }
            StateKind::HashKey => unreachable!("hash keys never appear as array children"),
        };

        if equal {
            self.result.unique_item_found = true;
            if !track_last_child {
                ctl.set_max_callback_level(1);
                ctl.stop();
            }
        }
    }

    /// Fires when a node that matched its own path step (but expected more of the path to
    /// follow) pops. If the match already completed somewhere underneath it, this node is
    /// simply an ancestor on the successful path and must not overwrite `matchres` — but it's
    /// still the first (deepest) container to reach this code, so it's the right place to
    /// record `loc_parent`/`num_siblings`, decremented to exclude the child that matched.
    fn finalize_possible_ancestor(&mut self, ctl: &mut ScanControl<'_>, state: State) {
        if !state.kind.is_container() {
            // A scalar was left expecting further descent (only possible for a bare scalar
            // document with a non-empty path): can't step into it.
            if self.result.matchres != Matchres::Complete {
                self.result.matchres = Matchres::TypeMismatch;
                ctl.set_max_callback_level(1);
                ctl.stop();
            }
            return;
        }

        if self.loc_parent_recorded {
            return;
        }
        self.loc_parent_recorded = true;

        let already_complete = self.result.matchres == Matchres::Complete;

        self.result.loc_parent = Some(state.span());

        let mut num_siblings = match state.kind {
            StateKind::Object => state.nelem / 2,
            StateKind::List => state.nelem,
            _ => unreachable!(),
        };
        if already_complete {
            num_siblings = num_siblings.saturating_sub(1);
        }
        self.result.num_siblings = Some(num_siblings);

        if already_complete {
            return;
        }

        self.result.match_level = state.level;
        self.result.node_type = Some(NodeKind::from_state_kind(state.kind));
        self.result.immediate_parent_found = state.level == self.path.ncomponents() - 1;

        let target = &self.path.components()[state.level + 1];
        self.result.matchres = if target_expects_kind(target, state.kind) {
            Matchres::NoMatch
        } else {
            Matchres::TypeMismatch
        };

        ctl.set_max_callback_level(1);
        ctl.stop();
    }
}

impl<'d, 'p> Visitor for MatchEngine<'d, 'p> {
    fn on_push(&mut self, ctl: &mut ScanControl<'_>, stack: &[State], _at: usize) {
        let state = *stack.last().expect("push always yields a state");

        if state.kind == StateKind::HashKey {
            self.scratch.push(NodeResult::Unknown);
            return;
        }

        if let Some(pc) = &self.post_complete {
            if state.level >= pc.array_level {
                self.scratch.push(NodeResult::Unknown);
                return;
            }
        }

        if self.scratch.is_empty() {
            self.push_initial(state);
        } else {
            self.push_descend(stack, state);
        }

        let _ = ctl;
    }

    fn on_pop(&mut self, ctl: &mut ScanControl<'_>, stack: &[State], _at: usize) {
        let state = *stack.last().expect("pop always yields a state");

        if state.kind == StateKind::HashKey {
            self.pending_key = Some(state.span());
            self.scratch.pop();
            return;
        }

        if let Some(pc) = &self.post_complete {
            if state.level > pc.array_level {
                self.scratch.pop();
                return;
            }
            if state.level == pc.array_level {
                self.pop_array_child(ctl, state);
                self.scratch.pop();
                return;
            }
        }

        let own_result = self.scratch.pop().expect("scratch tracks the real stack");

        match own_result {
            NodeResult::Complete => {
                self.result.loc_match = Some(state.span());
                self.result.special_flags = state.special_flags;
                self.result.numval = state.numval;

                if let Some(pc) = &self.post_complete {
                    if pc.array_level == state.level + 1 {
                        if pc.track_last_child {
                            if let Some(lc) = &mut self.result.last_child {
                                lc.index = state.nelem.saturating_sub(1);
                            }
                        }
                        let should_stop = !pc.track_last_child;
                        self.post_complete = None;
                        if should_stop {
                            ctl.set_max_callback_level(1);
                            ctl.stop();
                        }
                    }
                }

                ctl.set_max_callback_level(state.level);
            }
            NodeResult::PossibleAncestor => self.finalize_possible_ancestor(ctl, state),
            NodeResult::TypeMismatch | NodeResult::NoMatch | NodeResult::Unknown => {}
        }
    }
}

fn matches_component(
    target: &Component,
    parent_kind: StateKind,
    key_bytes: Option<&[u8]>,
    array_index: Option<u64>,
) -> bool {
    match target {
        Component::ObjectKey(want) => {
            parent_kind == StateKind::Object && key_bytes == Some(want.as_slice())
        }
        Component::ArrayIndex(want) => {
            parent_kind == StateKind::List && array_index == Some(*want)
        }
        // Resolved into `ArrayIndex(0)` windows by `negix` before reaching this engine.
        Component::LastChildMarker => false,
        Component::RootMarker => false,
    }
}

fn target_expects_kind(target: &Component, kind: StateKind) -> bool {
    match target {
        Component::ObjectKey(_) => kind == StateKind::Object,
        Component::ArrayIndex(_) | Component::LastChildMarker => kind == StateKind::List,
        Component::RootMarker => true,
    }
}
