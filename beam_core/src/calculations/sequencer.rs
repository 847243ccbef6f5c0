//! Node sequencer
//!
//! Turns supports and loads into the ordered node list and the segments
//! between consecutive nodes.
//!
//! ## Notation
//!
//! - one node per support and per point load
//! - two nodes per extended load (its start and end boundary)
//! - N nodes create N-1 segments, numbered left to right
//!
//! A support and the point loads sitting at the same position collapse into a
//! single [`NodeKind::SupportAndLoad`] node. Any other coincident nodes stay
//! distinct and are separated by a zero-length segment.

use serde::{Deserialize, Serialize};

use crate::calculations::reactions::Reactions;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{AppliedLoad, Load, Orientation};
use crate::settings::AnalysisSettings;
use crate::supports::Support;

// =============================================================================
// NODES
// =============================================================================

/// What happens at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Support,
    PointLoad,
    DistributedLoadLeft,
    DistributedLoadRight,
    /// Zero-intensity end of a triangular load
    TriangularLoadMin,
    /// Peak end of a triangular load
    TriangularLoadMax,
    TrapezoidalLoadStart,
    TrapezoidalLoadEnd,
    /// A support merged with the point load(s) at its position
    SupportAndLoad,
}

impl NodeKind {
    /// Whether the node introduces a step (concentrated force) in shear
    pub fn is_step(&self) -> bool {
        matches!(
            self,
            NodeKind::Support | NodeKind::PointLoad | NodeKind::SupportAndLoad
        )
    }
}

/// Which end of an extended load a node marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    Start,
    End,
}

/// Entity a node was created from; indices refer to the beam's support and
/// load lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeSource {
    Support { index: usize },
    PointLoad { index: usize },
    LoadBoundary { index: usize, boundary: Boundary },
}

/// A position where the internal-force expression changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Creation-order identifier
    pub id: usize,
    pub kind: NodeKind,
    pub position: f64,
    pub sources: Vec<NodeSource>,

    /// Step force for support/point/merged nodes (sum of all contributions);
    /// load intensity at the boundary for extended-load nodes
    pub net_load: f64,
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// Interval between two consecutive nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    /// Index of the left node in [`Sequence::nodes`]
    pub left_node: usize,
    /// Index of the right node in [`Sequence::nodes`]
    pub right_node: usize,
    pub length: f64,

    /// Beam length preceding this segment; local coordinate is `x - offset`
    pub offset: f64,
}

impl Segment {
    pub fn start(&self) -> f64 {
        self.offset
    }

    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

/// Output of the sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub nodes: Vec<Node>,
    pub segments: Vec<Segment>,
}

impl Sequence {
    /// Node positions, left to right (useful as diagram ticks)
    pub fn node_positions(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

// =============================================================================
// SEQUENCING
// =============================================================================

/// Build the sorted, merged node list and the segments between nodes.
pub fn build(
    span: f64,
    supports: &[Support],
    loads: &[AppliedLoad],
    reactions: &Reactions,
    settings: &AnalysisSettings,
) -> CalcResult<Sequence> {
    let tol = settings.position_tolerance;
    for support in supports {
        let x = support.position;
        if !x.is_finite() || x < -tol || x > span + tol {
            return Err(CalcError::InvalidSupportPosition { position: x, span });
        }
    }
    for entry in loads {
        entry.load.validate(span, tol)?;
    }

    let mut nodes = create_nodes(supports, loads, reactions);
    nodes.sort_by(|a, b| a.position.total_cmp(&b.position));
    let created = nodes.len();

    let nodes = merge_coincident(nodes, tol);
    log::debug!(
        "sequenced {} nodes ({} merged away)",
        nodes.len(),
        created - nodes.len()
    );

    let segments = build_segments(&nodes);
    Ok(Sequence { nodes, segments })
}

enum Entity<'a> {
    Support(usize, &'a Support),
    Load(usize, &'a AppliedLoad),
}

impl Entity<'_> {
    fn sequence(&self) -> usize {
        match self {
            Entity::Support(_, s) => s.sequence,
            Entity::Load(_, l) => l.sequence,
        }
    }
}

/// Nodes in creation order, ids assigned as they are created
fn create_nodes(supports: &[Support], loads: &[AppliedLoad], reactions: &Reactions) -> Vec<Node> {
    let mut entities: Vec<Entity> = supports
        .iter()
        .enumerate()
        .map(|(i, s)| Entity::Support(i, s))
        .chain(loads.iter().enumerate().map(|(i, l)| Entity::Load(i, l)))
        .collect();
    entities.sort_by_key(|e| e.sequence());

    let mut nodes = Vec::with_capacity(supports.len() + 2 * loads.len());
    let mut push = |kind, position, source, net_load| {
        let id = nodes.len();
        nodes.push(Node {
            id,
            kind,
            position,
            sources: vec![source],
            net_load,
        });
    };

    for entity in entities {
        match entity {
            Entity::Support(index, support) => {
                let reaction = if support.id == reactions.left.support.id {
                    reactions.left.reaction
                } else {
                    reactions.right.reaction
                };
                push(
                    NodeKind::Support,
                    support.position,
                    NodeSource::Support { index },
                    reaction,
                );
            }
            Entity::Load(index, entry) => {
                if let Load::Point { position, magnitude } = entry.load {
                    push(
                        NodeKind::PointLoad,
                        position,
                        NodeSource::PointLoad { index },
                        magnitude,
                    );
                    continue;
                }
                let (start, end) = entry.load.bounds();
                let (start_kind, end_kind) = boundary_kinds(&entry.load);
                let (w_start, w_end) = entry.load.boundary_intensities().unwrap_or((0.0, 0.0));
                push(
                    start_kind,
                    start,
                    NodeSource::LoadBoundary {
                        index,
                        boundary: Boundary::Start,
                    },
                    w_start,
                );
                push(
                    end_kind,
                    end,
                    NodeSource::LoadBoundary {
                        index,
                        boundary: Boundary::End,
                    },
                    w_end,
                );
            }
        }
    }
    nodes
}

fn boundary_kinds(load: &Load) -> (NodeKind, NodeKind) {
    match load {
        Load::Point { .. } => (NodeKind::PointLoad, NodeKind::PointLoad),
        Load::Distributed { .. } => (NodeKind::DistributedLoadLeft, NodeKind::DistributedLoadRight),
        Load::Triangular { orientation, .. } => match orientation {
            Orientation::Ascending => (NodeKind::TriangularLoadMin, NodeKind::TriangularLoadMax),
            Orientation::Descending => (NodeKind::TriangularLoadMax, NodeKind::TriangularLoadMin),
        },
        Load::Trapezoidal { .. } => (NodeKind::TrapezoidalLoadStart, NodeKind::TrapezoidalLoadEnd),
    }
}

/// Rebuild the sorted node list, collapsing each support with the point
/// loads at its position.
fn merge_coincident(nodes: Vec<Node>, tolerance: f64) -> Vec<Node> {
    let mut merged = Vec::with_capacity(nodes.len());
    let mut i = 0;
    while i < nodes.len() {
        let mut j = i + 1;
        while j < nodes.len() && (nodes[j].position - nodes[i].position).abs() <= tolerance {
            j += 1;
        }
        merge_group(&nodes[i..j], &mut merged);
        i = j;
    }
    merged
}

fn merge_group(group: &[Node], out: &mut Vec<Node>) {
    let support = group.iter().position(|n| n.kind == NodeKind::Support);
    let has_point = group.iter().any(|n| n.kind == NodeKind::PointLoad);

    let Some(support) = support.filter(|_| has_point) else {
        out.extend_from_slice(group);
        return;
    };

    let mut slot: Option<usize> = None;
    for (k, node) in group.iter().enumerate() {
        let joins = k == support || node.kind == NodeKind::PointLoad;
        if !joins {
            out.push(node.clone());
            continue;
        }
        match slot {
            None => {
                slot = Some(out.len());
                out.push(Node {
                    id: group[support].id,
                    kind: NodeKind::SupportAndLoad,
                    position: group[support].position,
                    sources: node.sources.clone(),
                    net_load: node.net_load,
                });
            }
            Some(s) => {
                out[s].sources.extend_from_slice(&node.sources);
                out[s].net_load += node.net_load;
            }
        }
    }
}

fn build_segments(nodes: &[Node]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(nodes.len().saturating_sub(1));
    let Some(first) = nodes.first() else {
        return segments;
    };

    let mut offset = first.position;
    for (index, pair) in nodes.windows(2).enumerate() {
        let length = pair[1].position - pair[0].position;
        segments.push(Segment {
            index,
            left_node: index,
            right_node: index + 1,
            length,
            offset,
        });
        offset += length;
    }
    segments
}
