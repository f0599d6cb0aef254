//! Graphviz export
//!
//! Builds a DOT graph from the read-only surfaces of either tree. The
//! array tree is walked slot by slot ([`ImplicitAvl::occupied`]); no
//! rotation or snapshot machinery is involved.

use std::fmt::{self, Display, Write as _};
use std::io::Write;

use anyhow::Result;

use crate::tree::{left_child, right_child};
use crate::{ImplicitAvl, ReferenceAvl};

/// One vertex of the graph
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct DotNode {
    /// Unique node id
    pub id: String,
    /// Text shown in the node
    pub label: String,
}

/// Directed graph ready to be rendered as DOT
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct DotGraph {
    /// Comment written above the graph
    pub comment: String,
    /// Vertices in emission order
    pub nodes: Vec<DotNode>,
    /// `(from, to)` id pairs
    pub edges: Vec<(String, String)>,
}

impl DotGraph {
    /// Graph of the array tree, labeled `"<key> (idx <slot>)"`
    pub fn from_store<K: Ord + Copy + Display>(store: &ImplicitAvl<K>, comment: &str) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for slot in store.occupied() {
            let Some(key) = slot.key else {
                continue;
            };
            let id = slot.index.to_string();
            nodes.push(DotNode {
                id: id.clone(),
                label: format!("{} (idx {})", key, slot.index),
            });

            let children = [
                (slot.has_left, left_child(slot.index)),
                (slot.has_right, right_child(slot.index)),
            ];
            for (occupied, child) in children {
                if let (true, Some(child)) = (occupied, child) {
                    edges.push((id.clone(), child.to_string()));
                }
            }
        }

        Self {
            comment: comment.to_string(),
            nodes,
            edges,
        }
    }

    /// Graph of the pointer tree, labeled by key
    pub fn from_reference<K: Ord + Copy + Display>(tree: &ReferenceAvl<K>, comment: &str) -> Self {
        let nodes = tree
            .implicit_layout()
            .into_iter()
            .map(|(_, key, _)| DotNode {
                id: key.to_string(),
                label: key.to_string(),
            })
            .collect();
        let edges = tree
            .edges()
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        Self {
            comment: comment.to_string(),
            nodes,
            edges,
        }
    }

    /// Write the DOT document
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.to_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

impl Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writeln!(out, "// {}", self.comment)?;
        writeln!(out, "digraph {{")?;
        for node in &self.nodes {
            writeln!(out, "\t{} [label={}]", quote(&node.id), quote(&node.label))?;
        }
        for (from, to) in &self.edges {
            writeln!(out, "\t{} -> {}", quote(from), quote(to))?;
        }
        writeln!(out, "}}")?;
        f.write_str(&out)
    }
}
