// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Single-token resolution against one level of a command tree.
//!
//! Vendor shells accept any unambiguous keyword prefix (`sh ip int br`),
//! reject ambiguous ones, and only then consider free-form argument
//! capture, so keyword collisions always beat argument slots.

use crate::cmdtree::Node;
use std::collections::BTreeMap;

/// Outcome of matching one token at one tree level.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The token named a keyword (exactly or as a unique abbreviation), or
    /// fell into the level's argument slot. `keyword` is the canonical
    /// spelling for keywords, the raw token for argument captures.
    Matched { node: &'a Node, keyword: String },
    /// The token abbreviates two or more sibling keywords.
    Ambiguous(Vec<String>),
    NoMatch,
}

pub fn resolve<'a>(level: &'a BTreeMap<String, Node>, token: &str) -> Resolution<'a> {
    let lowered = token.to_lowercase();

    // an exact keyword match always wins, even when it is also a prefix of
    // a longer sibling
    if let Some(node) = level.get(&lowered) {
        if !node.is_argument() {
            return Resolution::Matched {
                node,
                keyword: lowered,
            };
        }
    }

    let candidates: Vec<&'a Node> = level
        .values()
        .filter(|node| !node.is_argument() && node.name().starts_with(&lowered))
        .collect();
    match candidates.as_slice() {
        &[node] => Resolution::Matched {
            node,
            keyword: node.name().to_owned(),
        },
        [] => {
            // keyword miss: fall through to a lone argument slot, so a
            // literal like the `10` of `vlan 10` is consumed as a value
            let mut slots = level.values().filter(|node| node.is_argument());
            match (slots.next(), slots.next()) {
                (Some(node), None) => Resolution::Matched {
                    node,
                    keyword: token.to_owned(),
                },
                _ => Resolution::NoMatch,
            }
        }
        many => Resolution::Ambiguous(many.iter().map(|n| n.name().to_owned()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Action;

    fn level() -> BTreeMap<String, Node> {
        let mut root = Node::new("");
        root += Node::new("show");
        root += Node::new("shutdown").action(Action::Shutdown);
        root += Node::new("exit").action(Action::Exit);
        root += Node::new("enable").action(Action::Enable);
        root.children
    }

    fn matched_name(resolution: &Resolution<'_>) -> String {
        match resolution {
            Resolution::Matched { node, .. } => node.name().to_owned(),
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn exact_match_wins() {
        let level = level();
        assert_eq!(matched_name(&resolve(&level, "show")), "show");
        assert_eq!(matched_name(&resolve(&level, "SHOW")), "show");
    }

    #[test]
    fn unique_prefix_resolves_like_full_keyword() {
        let level = level();
        assert_eq!(matched_name(&resolve(&level, "en")), "enable");
        assert_eq!(matched_name(&resolve(&level, "ex")), "exit");
        assert_eq!(matched_name(&resolve(&level, "shu")), "shutdown");
    }

    #[test]
    fn ambiguous_prefix_reports_candidates() {
        let level = level();
        match resolve(&level, "sh") {
            Resolution::Ambiguous(candidates) => {
                assert_eq!(candidates, ["show", "shutdown"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        assert!(matches!(resolve(&level, "e"), Resolution::Ambiguous(_)));
    }

    #[test]
    fn exact_short_keyword_beats_sibling_prefix() {
        // a keyword that is itself a prefix of a sibling still matches
        // exactly
        let mut root = Node::new("");
        root += Node::new("sh").action(Action::ShowIpIntBrief);
        root += Node::new("shutdown").action(Action::Shutdown);
        assert_eq!(matched_name(&resolve(&root.children, "sh")), "sh");
    }

    #[test]
    fn argument_slot_is_last_resort() {
        let mut vlan = Node::new("vlan");
        vlan += Node::arg("id");
        vlan += Node::new("internal");
        // keyword wins over the slot
        assert_eq!(matched_name(&resolve(&vlan.children, "int")), "internal");
        // anything else lands in the slot
        match resolve(&vlan.children, "10") {
            Resolution::Matched { node, keyword } => {
                assert!(node.is_argument());
                assert_eq!(keyword, "10");
            }
            other => panic!("expected slot capture, got {other:?}"),
        }
    }

    #[test]
    fn no_slot_means_no_match() {
        let level = level();
        assert!(matches!(resolve(&level, "bogus"), Resolution::NoMatch));
    }
}
