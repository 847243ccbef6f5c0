//! Shear/moment accumulator
//!
//! Walks the node sequence left to right keeping a running expression: a list
//! of terms, each a cubic anchored at a global position. At every node the
//! node's contribution is added; when an extended load's far boundary is
//! reached its term is *frozen*:
//!
//! - shear: replaced by the constant value it reached at the boundary
//! - moment: replaced by `resultant · (x - centroid)`, the couple the closed
//!   load keeps exerting about every later section
//!
//! Each segment receives the sum of the live terms re-based onto its own local
//! coordinate `ξ = x - offset`.
//!
//! ## Term table (t = x - start, L = load length, k = peak / L)
//!
//! | component            | shear                | moment                   |
//! |----------------------|----------------------|--------------------------|
//! | concentrated `P`     | `P`                  | `P·t`                    |
//! | uniform `w`          | `w·t`                | `w·t²/2`                 |
//! | triangular ascending | `k·t²/2`             | `k·t³/6`                 |
//! | triangular descending| `p·t - k·t²/2`       | `p·t²/2 - k·t³/6`        |

use serde::{Deserialize, Serialize};

use crate::calculations::polynomial::Polynomial;
use crate::calculations::sequencer::{Boundary, Node, NodeSource, Sequence};
use crate::loads::{AppliedLoad, LoadComponent, Orientation};

/// Internal-force response being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Shear,
    Moment,
}

/// One piece of a piecewise function, valid on `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Index of the segment this piece covers; `None` for the unloaded lead-in
    /// and for the closing piece after the last node
    pub segment: Option<usize>,
    pub start: f64,
    pub end: f64,
    /// Origin of the local coordinate
    pub offset: f64,
    /// Expression in `ξ = x - offset`
    pub poly: Polynomial,
}

impl Piece {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn eval_at(&self, x: f64) -> f64 {
        self.poly.eval(x - self.offset)
    }
}

/// Shear or moment along the whole beam as a list of pieces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piecewise {
    pub response: Response,
    pub span: f64,
    pub pieces: Vec<Piece>,
}

impl Piecewise {
    /// Value immediately to the right of `x` (after any step located at `x`)
    pub fn value_at(&self, x: f64) -> f64 {
        self.pieces
            .iter()
            .rev()
            .find(|p| p.start <= x)
            .map(|p| p.eval_at(x))
            .unwrap_or(0.0)
    }

    /// Value after every node has contributed
    pub fn closing_value(&self) -> f64 {
        self.pieces
            .last()
            .map(|p| p.eval_at(p.end))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Term {
    anchor: f64,
    poly: Polynomial,
}

impl Term {
    fn value_at(&self, x: f64) -> f64 {
        self.poly.eval(x - self.anchor)
    }

    fn rebased(&self, offset: f64) -> Polynomial {
        self.poly.shifted(offset - self.anchor)
    }
}

struct OpenTerm {
    load: usize,
    component: usize,
    term: usize,
}

/// Running expression carried across the segment walk
struct RunningExpression<'a> {
    response: Response,
    loads: &'a [AppliedLoad],
    terms: Vec<Term>,
    open: Vec<OpenTerm>,
}

impl<'a> RunningExpression<'a> {
    fn new(response: Response, loads: &'a [AppliedLoad]) -> Self {
        RunningExpression {
            response,
            loads,
            terms: Vec::new(),
            open: Vec::new(),
        }
    }

    fn apply(&mut self, node: &Node) {
        if node.kind.is_step() {
            let step = LoadComponent::Concentrated {
                position: node.position,
                force: node.net_load,
            };
            self.terms.push(open_term(&step, self.response));
            return;
        }

        for source in &node.sources {
            let NodeSource::LoadBoundary { index, boundary } = *source else {
                continue;
            };
            for (c, component) in self.loads[index].load.components().iter().enumerate() {
                match boundary {
                    Boundary::Start => {
                        self.open.push(OpenTerm {
                            load: index,
                            component: c,
                            term: self.terms.len(),
                        });
                        self.terms.push(open_term(component, self.response));
                    }
                    Boundary::End => {
                        let Some(k) = self
                            .open
                            .iter()
                            .position(|o| o.load == index && o.component == c)
                        else {
                            log::warn!("load {} closed at {} without being opened", index, node.position);
                            continue;
                        };
                        let closed = self.open.swap_remove(k);
                        let frozen = freeze(&self.terms[closed.term], component, self.response);
                        self.terms[closed.term] = frozen;
                    }
                }
            }
        }
    }

    fn in_local(&self, offset: f64) -> Polynomial {
        self.terms.iter().map(|t| t.rebased(offset)).sum()
    }
}

/// Term contributed by a component from its start boundary onward
fn open_term(component: &LoadComponent, response: Response) -> Term {
    let anchor = component.start();
    let poly = match (*component, response) {
        (LoadComponent::Concentrated { force, .. }, Response::Shear) => Polynomial::constant(force),
        (LoadComponent::Concentrated { force, .. }, Response::Moment) => Polynomial::linear(0.0, force),
        (LoadComponent::Uniform { intensity, .. }, Response::Shear) => Polynomial::linear(0.0, intensity),
        (LoadComponent::Uniform { intensity, .. }, Response::Moment) => {
            Polynomial::new([0.0, 0.0, intensity / 2.0, 0.0])
        }
        (
            LoadComponent::Triangular {
                start,
                end,
                peak,
                orientation,
            },
            response,
        ) => {
            let k = peak / (end - start);
            match (orientation, response) {
                (Orientation::Ascending, Response::Shear) => Polynomial::new([0.0, 0.0, k / 2.0, 0.0]),
                (Orientation::Ascending, Response::Moment) => Polynomial::new([0.0, 0.0, 0.0, k / 6.0]),
                (Orientation::Descending, Response::Shear) => {
                    Polynomial::new([0.0, peak, -k / 2.0, 0.0])
                }
                (Orientation::Descending, Response::Moment) => {
                    Polynomial::new([0.0, 0.0, peak / 2.0, -k / 6.0])
                }
            }
        }
    };
    Term { anchor, poly }
}

/// Replace an open term once its load has ended
fn freeze(term: &Term, component: &LoadComponent, response: Response) -> Term {
    match response {
        Response::Shear => {
            let end = component.end();
            Term {
                anchor: end,
                poly: Polynomial::constant(term.value_at(end)),
            }
        }
        Response::Moment => Term {
            anchor: component.centroid(),
            poly: Polynomial::linear(0.0, component.resultant()),
        },
    }
}

/// Accumulate the piecewise shear or moment function over the beam.
///
/// The result always starts at `x = 0` (an unloaded lead-in piece when the
/// first node is past the left end) and finishes with a closing piece from the
/// last node to `span` carrying the expression after every node has acted.
pub fn accumulate(
    span: f64,
    loads: &[AppliedLoad],
    sequence: &Sequence,
    response: Response,
) -> Piecewise {
    let mut running = RunningExpression::new(response, loads);
    let mut pieces = Vec::with_capacity(sequence.segments.len() + 2);

    let first = sequence.nodes.first().map(|n| n.position).unwrap_or(0.0);
    if first > 0.0 {
        pieces.push(Piece {
            segment: None,
            start: 0.0,
            end: first,
            offset: 0.0,
            poly: Polynomial::ZERO,
        });
    }

    for (i, node) in sequence.nodes.iter().enumerate() {
        running.apply(node);
        if let Some(segment) = sequence.segments.get(i) {
            pieces.push(Piece {
                segment: Some(segment.index),
                start: segment.start(),
                end: segment.end(),
                offset: segment.offset,
                poly: running.in_local(segment.offset),
            });
        }
    }

    let tail_start = sequence
        .segments
        .last()
        .map(|s| s.end())
        .unwrap_or(first);
    pieces.push(Piece {
        segment: None,
        start: tail_start,
        end: span.max(tail_start),
        offset: tail_start,
        poly: running.in_local(tail_start),
    });

    log::debug!("accumulated {:?}: {} pieces", response, pieces.len());
    Piecewise {
        response,
        span,
        pieces,
    }
}
