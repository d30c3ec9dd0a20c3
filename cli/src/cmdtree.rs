// SPDX-License-Identifier: Apache-2.0
// Copyright IosLab Authors

//! Defines a command tree of Nodes.
//!
//! Each CLI mode owns one tree. Inner nodes are literal keywords; argument
//! slots capture whatever token lands on them under a slot name the
//! dispatcher reads back. A node carrying an [`Action`] marks a complete
//! command.

use crate::proto::Action;
use std::collections::BTreeMap;
use std::ops::AddAssign;

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub(crate) name: String,
    pub children: BTreeMap<String, Node>,
    pub(crate) arg_name: Option<&'static str>,
    pub action: Option<Action>,
}

impl Node {
    /// A literal keyword node. Keys are stored lowercase; matching is
    /// case-insensitive on the way in.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            ..Default::default()
        }
    }

    /// An argument-slot node. Its map key is the bracketed slot name so it
    /// can never collide with a literal keyword.
    pub fn arg(name: &'static str) -> Self {
        Self {
            name: format!("<{name}>"),
            arg_name: Some(name),
            ..Default::default()
        }
    }

    /// Mark this node as a complete command dispatching `action`.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn is_argument(&self) -> bool {
        self.arg_name.is_some()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn add(&mut self, node: Node) {
        self.children.insert(node.name.clone(), node);
    }
}

impl AddAssign for Node {
    fn add_assign(&mut self, rhs: Self) {
        self.add(rhs);
    }
}
