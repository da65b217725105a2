//! Mermaid flowchart builder.
//!
//! Generators describe nodes, edges and subgraphs; the builder owns the
//! syntax: fenced block, indentation, quoting, id sanitizing and the
//! one-declaration-per-id rule.

use std::collections::HashSet;
use std::fmt::Write as _;

/// Flowchart direction header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    LeftRight,
}

impl Direction {
    fn keyword(self) -> &'static str {
        match self {
            Self::TopDown => "TD",
            Self::LeftRight => "LR",
        }
    }
}

/// Edge arrow styles used by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    /// `-->`
    Arrow,
    /// `---` (undirected cable)
    Line,
    /// `-.->` (mesh, deny, external reference)
    Dotted,
}

impl EdgeStyle {
    fn token(self) -> &'static str {
        match self {
            Self::Arrow => "-->",
            Self::Line => "---",
            Self::Dotted => "-.->",
        }
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Quote-safe label text: `"` becomes the `#quot;` entity.
pub fn escape_label(raw: &str) -> String {
    raw.replace('"', "#quot;")
}

#[derive(Debug, Clone)]
struct Node {
    id: String,
    label: String,
}

#[derive(Debug, Clone)]
enum Statement {
    Node(Node),
    Edge {
        from: String,
        to: String,
        style: EdgeStyle,
        label: Option<String>,
    },
    Subgraph {
        id: String,
        title: String,
        nodes: Vec<Node>,
    },
}

/// Nodes grouped under a titled region.
#[derive(Debug, Clone)]
pub struct Subgraph {
    id: String,
    title: String,
    nodes: Vec<Node>,
}

impl Subgraph {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: sanitize_id(id),
            title: title.to_owned(),
            nodes: Vec::new(),
        }
    }

    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        self.nodes.push(Node {
            id: sanitize_id(id),
            label: label.to_owned(),
        });
        self
    }
}

/// An ordered flowchart; statements render in insertion order.
#[derive(Debug, Clone)]
pub struct Flowchart {
    direction: Direction,
    statements: Vec<Statement>,
    declared: HashSet<String>,
}

impl Flowchart {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            statements: Vec::new(),
            declared: HashSet::new(),
        }
    }

    /// Declare a node. Re-declaring an id is a no-op.
    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        let id = sanitize_id(id);
        if self.declared.insert(id.clone()) {
            self.statements.push(Statement::Node(Node {
                id,
                label: label.to_owned(),
            }));
        }
        self
    }

    pub fn edge(
        &mut self,
        from: &str,
        to: &str,
        style: EdgeStyle,
        label: Option<&str>,
    ) -> &mut Self {
        self.statements.push(Statement::Edge {
            from: sanitize_id(from),
            to: sanitize_id(to),
            style,
            label: label.map(str::to_owned),
        });
        self
    }

    /// Append a subgraph; nodes already declared elsewhere are dropped from it.
    pub fn subgraph(&mut self, subgraph: Subgraph) -> &mut Self {
        let mut nodes = Vec::with_capacity(subgraph.nodes.len());
        for node in subgraph.nodes {
            if self.declared.insert(node.id.clone()) {
                nodes.push(node);
            }
        }
        self.statements.push(Statement::Subgraph {
            id: subgraph.id,
            title: subgraph.title,
            nodes,
        });
        self
    }

    /// Render as a fenced ```` ```mermaid ```` block.
    pub fn render(&self) -> String {
        let mut out = String::from("```mermaid\n");
        let _ = writeln!(out, "graph {}", self.direction.keyword());
        for statement in &self.statements {
            match statement {
                Statement::Node(node) => write_node(&mut out, node, 4),
                Statement::Edge {
                    from,
                    to,
                    style,
                    label,
                } => {
                    let arrow = style.token();
                    match label {
                        Some(label) => {
                            let label = escape_label(label);
                            let _ = writeln!(out, "    {from} {arrow}|\"{label}\"| {to}");
                        }
                        None => {
                            let _ = writeln!(out, "    {from} {arrow} {to}");
                        }
                    }
                }
                Statement::Subgraph { id, title, nodes } => {
                    let title = escape_label(title);
                    let _ = writeln!(out, "    subgraph {id}[\"{title}\"]");
                    for node in nodes {
                        write_node(&mut out, node, 8);
                    }
                    out.push_str("    end\n");
                }
            }
        }
        out.push_str("```");
        out
    }
}

fn write_node(out: &mut String, node: &Node, indent: usize) {
    let label = escape_label(&node.label);
    let _ = writeln!(out, "{:indent$}{}[\"{label}\"]", "", node.id);
}
