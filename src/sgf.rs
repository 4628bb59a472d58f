//! Record parsing on top of `sgf-parse`.
//!
//! Only the first game tree of a collection is used. Property values come
//! back typed (`go::Prop`); values the library cannot read for their property
//! show up as `Prop::Invalid` and are rejected by the callers that need them.

use sgf_parse::SgfNode;
use sgf_parse::go::{self, Prop};

use crate::error::{Error, Result};

/// A node of a parsed Go record.
pub type GoNode = SgfNode<Prop>;

/// Parse a record and return the root node of its first game tree.
pub fn parse(text: &str) -> Result<GoNode> {
    let trees = go::parse(text).map_err(|e| Error::RecordParse(e.to_string()))?;
    trees
        .into_iter()
        .next()
        .ok_or_else(|| Error::RecordParse("no game tree".to_string()))
}

/// The nodes of the main line, root included: the first child at every branch.
pub fn main_sequence(root: &GoNode) -> Vec<&GoNode> {
    let mut out = vec![root];
    let mut node = root;
    while let Some(next) = node.children().next() {
        out.push(next);
        node = next;
    }
    out
}
