//! # Simply-Supported Beam
//!
//! [`Beam`] owns the supports and loads of one beam and runs the analysis
//! pipeline on demand:
//!
//! ```text
//! loads -> reduce -> solve reactions -> sequence nodes -> accumulate -> sample
//! ```
//!
//! The reaction solve and the node sequence are each computed once and cached.
//! Adding or removing a support or load drops both caches; the next query
//! rebuilds everything from scratch.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::Beam;
//! use beam_core::loads::Direction;
//! use beam_core::supports::SupportKind;
//!
//! let mut beam = Beam::new(10.0).unwrap();
//! beam.add_support(SupportKind::Pinned, 0.0).unwrap();
//! beam.add_support(SupportKind::Roller, 10.0).unwrap();
//! beam.add_point_load(5.0, 10.0, Direction::Down).unwrap();
//!
//! assert_eq!(beam.reactions().unwrap(), (5.0, 5.0));
//!
//! let results = beam.analyze().unwrap();
//! println!("Max moment: {:.2} at x = {:.2}", results.max_moment, results.max_moment_position);
//! ```

use once_cell::unsync::OnceCell;
use uuid::Uuid;

use crate::calculations::accumulator::{self, Piecewise, Response};
use crate::calculations::input::BeamInput;
use crate::calculations::reactions::{self, Reactions};
use crate::calculations::results::{AnalysisResults, Diagram};
use crate::calculations::sequencer::{self, Node, Segment, Sequence};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{reduce, AppliedLoad, Direction, EquivalentLoad, Load, Orientation};
use crate::settings::AnalysisSettings;
use crate::supports::{SolvedSupport, Support, SupportKind};

/// A beam with its supports and loads.
///
/// Not `Sync`: the cached solve lives in single-threaded cells.
#[derive(Debug, Clone)]
pub struct Beam {
    label: String,
    span: f64,
    settings: AnalysisSettings,
    supports: Vec<Support>,
    loads: Vec<AppliedLoad>,

    /// Creation counter shared by supports and loads
    next_sequence: usize,

    reactions: OnceCell<Reactions>,
    sequence: OnceCell<Sequence>,
}

impl Beam {
    /// Create an empty beam of the given length
    pub fn new(span: f64) -> CalcResult<Self> {
        if !(span.is_finite() && span > 0.0) {
            return Err(CalcError::invalid_input(
                "span",
                span.to_string(),
                "Span must be positive",
            ));
        }
        Ok(Beam {
            label: String::new(),
            span,
            settings: AnalysisSettings::default(),
            supports: Vec::new(),
            loads: Vec::new(),
            next_sequence: 0,
            reactions: OnceCell::new(),
            sequence: OnceCell::new(),
        })
    }

    /// Build a beam from its JSON description
    pub fn from_input(input: &BeamInput) -> CalcResult<Self> {
        input.validate()?;
        let mut beam = Beam::new(input.span)?
            .with_label(input.label.clone())
            .with_settings(input.settings)?;

        for support in &input.supports {
            beam.add_support(support.kind, support.position)?;
        }
        for load in &input.loads {
            beam.insert_load(load.to_load(), load.note())?;
        }
        log::debug!(
            "beam '{}' built from input: {} supports, {} loads",
            beam.label,
            beam.supports.len(),
            beam.loads.len()
        );
        Ok(beam)
    }

    /// Set label (builder pattern)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set analysis settings (builder pattern)
    pub fn with_settings(mut self, settings: AnalysisSettings) -> CalcResult<Self> {
        settings.validate()?;
        self.settings = settings;
        self.invalidate();
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Supports in the order they were added
    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Loads in the order they were added
    pub fn loads(&self) -> &[AppliedLoad] {
        &self.loads
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Place a support; fails if the position is outside the span
    pub fn add_support(&mut self, kind: SupportKind, position: f64) -> CalcResult<Uuid> {
        let tol = self.settings.position_tolerance;
        if !position.is_finite() || position < -tol || position > self.span + tol {
            return Err(CalcError::InvalidSupportPosition {
                position,
                span: self.span,
            });
        }
        let support = Support::new(kind, position, self.take_sequence());
        let id = support.id;
        log::debug!("added {} support at {}", kind, position);
        self.supports.push(support);
        self.invalidate();
        Ok(id)
    }

    pub fn add_point_load(
        &mut self,
        position: f64,
        magnitude: f64,
        direction: Direction,
    ) -> CalcResult<Uuid> {
        check_magnitude("magnitude", magnitude)?;
        self.add_load(Load::point(position, magnitude, direction))
    }

    pub fn add_distributed_load(
        &mut self,
        start: f64,
        end: f64,
        intensity: f64,
        direction: Direction,
    ) -> CalcResult<Uuid> {
        check_magnitude("intensity", intensity)?;
        self.add_load(Load::distributed(start, end, intensity, direction))
    }

    pub fn add_triangular_load(
        &mut self,
        start: f64,
        end: f64,
        peak: f64,
        orientation: Orientation,
        direction: Direction,
    ) -> CalcResult<Uuid> {
        check_magnitude("peak", peak)?;
        self.add_load(Load::triangular(start, end, peak, orientation, direction))
    }

    pub fn add_trapezoidal_load(
        &mut self,
        start: f64,
        end: f64,
        start_intensity: f64,
        end_intensity: f64,
        direction: Direction,
    ) -> CalcResult<Uuid> {
        check_magnitude("start_intensity", start_intensity)?;
        check_magnitude("end_intensity", end_intensity)?;
        self.add_load(Load::trapezoidal(
            start,
            end,
            start_intensity,
            end_intensity,
            direction,
        ))
    }

    /// Add an already signed load
    pub fn add_load(&mut self, load: Load) -> CalcResult<Uuid> {
        self.insert_load(load, "")
    }

    fn insert_load(&mut self, load: Load, note: &str) -> CalcResult<Uuid> {
        load.validate(self.span, self.settings.position_tolerance)?;
        let entry = AppliedLoad::new(load, self.take_sequence()).with_note(note);
        let id = entry.id;
        log::debug!("added {} load: {:?}", entry.load.display_name(), entry.load);
        self.loads.push(entry);
        self.invalidate();
        Ok(id)
    }

    /// Remove a load by id
    pub fn remove_load(&mut self, id: Uuid) -> CalcResult<AppliedLoad> {
        let index = self
            .loads
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CalcError::invalid_input("load_id", id.to_string(), "No load with this id"))?;
        self.invalidate();
        Ok(self.loads.remove(index))
    }

    /// Drop the cached solve so the next query recomputes it
    pub fn reset(&mut self) {
        self.invalidate();
    }

    /// Remove every support and load
    pub fn clear(&mut self) {
        self.supports.clear();
        self.loads.clear();
        self.next_sequence = 0;
        self.invalidate();
    }

    fn take_sequence(&mut self) -> usize {
        let n = self.next_sequence;
        self.next_sequence += 1;
        n
    }

    fn invalidate(&mut self) {
        if self.reactions.take().is_some() | self.sequence.take().is_some() {
            log::debug!("cached solve invalidated");
        }
    }

    // ========================================================================
    // Pipeline stages
    // ========================================================================

    /// One equivalent point force per load, in insertion order
    pub fn equivalent_loads(&self) -> Vec<EquivalentLoad> {
        reduce(&self.loads)
    }

    /// Solve the reactions (cached)
    pub fn solve(&self) -> CalcResult<&Reactions> {
        self.reactions.get_or_try_init(|| {
            reactions::solve(&self.supports, &self.equivalent_loads(), &self.settings)
        })
    }

    /// `(left, right)` signed reactions, leftmost support first
    pub fn reactions(&self) -> CalcResult<(f64, f64)> {
        Ok(self.solve()?.as_tuple())
    }

    /// Supports with their reactions, leftmost first
    pub fn solved_supports(&self) -> CalcResult<Vec<SolvedSupport>> {
        let r = self.solve()?;
        Ok(vec![r.left.clone(), r.right.clone()])
    }

    /// Sorted, merged nodes and the segments between them (cached)
    pub fn sequence(&self) -> CalcResult<&Sequence> {
        let reactions = self.solve()?;
        self.sequence.get_or_try_init(|| {
            sequencer::build(
                self.span,
                &self.supports,
                &self.loads,
                reactions,
                &self.settings,
            )
        })
    }

    pub fn nodes(&self) -> CalcResult<&[Node]> {
        Ok(&self.sequence()?.nodes)
    }

    pub fn segments(&self) -> CalcResult<&[Segment]> {
        Ok(&self.sequence()?.segments)
    }

    pub fn shear_pieces(&self) -> CalcResult<Piecewise> {
        self.pieces(Response::Shear)
    }

    pub fn moment_pieces(&self) -> CalcResult<Piecewise> {
        self.pieces(Response::Moment)
    }

    fn pieces(&self, response: Response) -> CalcResult<Piecewise> {
        let sequence = self.sequence()?;
        Ok(accumulator::accumulate(self.span, &self.loads, sequence, response))
    }

    /// Shear just to the right of `x`
    pub fn shear_at(&self, x: f64) -> CalcResult<f64> {
        Ok(self.shear_pieces()?.value_at(x))
    }

    /// Bending moment at `x`
    pub fn moment_at(&self, x: f64) -> CalcResult<f64> {
        Ok(self.moment_pieces()?.value_at(x))
    }

    /// Sampled shear diagram
    pub fn shear_profile(&self) -> CalcResult<Diagram> {
        Ok(self.shear_pieces()?.sample(&self.settings))
    }

    /// Sampled moment diagram
    pub fn moment_profile(&self) -> CalcResult<Diagram> {
        Ok(self.moment_pieces()?.sample(&self.settings))
    }

    /// Run the full analysis
    pub fn analyze(&self) -> CalcResult<AnalysisResults> {
        let reactions = self.solve()?.clone();
        let node_positions = self.sequence()?.node_positions();
        let results = AnalysisResults::new(
            reactions,
            node_positions,
            self.shear_profile()?,
            self.moment_profile()?,
        );
        log::info!(
            "beam '{}': R = ({:.4}, {:.4}), |V|max = {:.4}, M = [{:.4}, {:.4}]",
            self.label,
            results.reaction_left,
            results.reaction_right,
            results.max_shear,
            results.min_moment,
            results.max_moment
        );
        Ok(results)
    }
}

fn check_magnitude(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(CalcError::invalid_input(
        field,
        value.to_string(),
        "Magnitude must be a non-negative number; use direction for sense",
    ))
}
