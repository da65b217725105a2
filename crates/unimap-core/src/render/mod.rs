// ── Output syntax builders ──
//
// Generators never concatenate markup by hand: diagram text goes through
// `mermaid::Flowchart`, tables through `markdown::table`.

pub mod markdown;
pub mod mermaid;

pub use mermaid::{Direction, EdgeStyle, Flowchart, Subgraph};
