use anyhow::{ensure, Result};
use log::debug;

mod display;
pub mod export;

pub const DEFAULT_SUBSTITUTION_COST: f64 = 0.9;
pub const DEFAULT_INSERTION_COST: f64 = 1.0;
pub const DEFAULT_DELETION_COST: f64 = 1.0;

/// The decision recorded at one alignment position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepKind {
    Match,
    Substitute,
    Insert,
    Delete,
}

/// One hypothesis in the search graph.
///
/// Nodes live in an append-only arena per `align` call and reference their
/// parent by arena index. Index 0 is the start sentinel with offsets (0, 0)
/// and cost 0; its kind is never read.
#[derive(Debug, Clone, Copy)]
struct Node {
    kind: StepKind,
    previous: usize,
    source_offset: usize,
    target_offset: usize,
    cost: f64,
}

const START: usize = 0;

/// A beam-limited sequence aligner.
///
/// Keeps the `beam_width` cheapest hypotheses between expansion rounds, so
/// memory and time stay bounded on long inputs at the price of possibly
/// missing the globally cheapest alignment.
#[derive(Debug, Clone)]
pub struct BeamAligner {
    beam_width: usize,
    substitution_cost: f64,
    insertion_cost: f64,
    deletion_cost: f64,
}

impl BeamAligner {
    /// Creates an aligner with the default cost weights.
    ///
    /// Substituting is deliberately cheaper than deleting and inserting the
    /// same position, so the search prefers substitutions over gap pairs.
    pub fn new(beam_width: usize) -> Result<Self> {
        Self::with_costs(
            beam_width,
            DEFAULT_SUBSTITUTION_COST,
            DEFAULT_INSERTION_COST,
            DEFAULT_DELETION_COST,
        )
    }

    /// Creates an aligner with explicit cost weights.
    pub fn with_costs(
        beam_width: usize,
        substitution_cost: f64,
        insertion_cost: f64,
        deletion_cost: f64,
    ) -> Result<Self> {
        ensure!(beam_width > 0, "Beam width must be positive");

        for (name, cost) in [
            ("substitution", substitution_cost),
            ("insertion", insertion_cost),
            ("deletion", deletion_cost),
        ] {
            ensure!(
                cost.is_finite() && cost >= 0.0,
                "The {name} cost must be a finite non-negative number, but is {cost}"
            );
        }

        Ok(Self {
            beam_width,
            substitution_cost,
            insertion_cost,
            deletion_cost,
        })
    }

    /// Aligns `source` against `target` and returns the cheapest alignment
    /// the beam found.
    ///
    /// Every pair of finite sequences produces an alignment; empty inputs
    /// degenerate into pure insertion or deletion chains.
    pub fn align<'seq, T: Eq>(&self, source: &'seq [T], target: &'seq [T]) -> Alignment<'seq, T> {
        let mut arena = vec![Node {
            kind: StepKind::Match,
            previous: START,
            source_offset: 0,
            target_offset: 0,
            cost: 0.0,
        }];
        let mut frontier = vec![START];
        let mut pool = Vec::new();
        let mut rounds = 0usize;

        // The frontier is cost-sorted, so checking its head is enough: once
        // the cheapest hypothesis has consumed both sequences, expanding it
        // further only adds cost.
        while !is_terminal(&arena[frontier[0]], source, target) {
            pool.clear();
            for &parent in &frontier {
                self.expand(&mut arena, &mut pool, parent, source, target);
            }

            // Stable sort, so equal-cost candidates keep their insertion
            // order and repeated runs stay deterministic.
            pool.sort_by(|&left, &right| arena[left].cost.total_cmp(&arena[right].cost));
            pool.truncate(self.beam_width);
            std::mem::swap(&mut frontier, &mut pool);
            rounds += 1;
        }

        debug!(
            "Aligned {}x{} tokens in {rounds} rounds over {} nodes",
            source.len(),
            target.len(),
            arena.len()
        );

        Alignment::from_terminal(&arena, frontier[0], source, target)
    }

    fn expand<T: Eq>(
        &self,
        arena: &mut Vec<Node>,
        pool: &mut Vec<usize>,
        parent: usize,
        source: &[T],
        target: &[T],
    ) {
        let Node {
            source_offset,
            target_offset,
            cost,
            ..
        } = arena[parent];

        let insertion = Node {
            kind: StepKind::Insert,
            previous: parent,
            source_offset,
            target_offset: target_offset + 1,
            cost: cost + self.insertion_cost,
        };
        let deletion = Node {
            kind: StepKind::Delete,
            previous: parent,
            source_offset: source_offset + 1,
            target_offset,
            cost: cost + self.deletion_cost,
        };

        // The source is exhausted, so the next step must be an insertion.
        if source_offset >= source.len() {
            push_node(arena, pool, insertion);
            return;
        }

        // The target is exhausted, so the next step must be a deletion.
        if target_offset >= target.len() {
            push_node(arena, pool, deletion);
            return;
        }

        if source[source_offset] == target[target_offset] {
            push_node(
                arena,
                pool,
                Node {
                    kind: StepKind::Match,
                    previous: parent,
                    source_offset: source_offset + 1,
                    target_offset: target_offset + 1,
                    cost,
                },
            );
        } else {
            push_node(
                arena,
                pool,
                Node {
                    kind: StepKind::Substitute,
                    previous: parent,
                    source_offset: source_offset + 1,
                    target_offset: target_offset + 1,
                    cost: cost + self.substitution_cost,
                },
            );
        }

        // Insertions and deletions always stay open as alternative branches.
        push_node(arena, pool, insertion);
        push_node(arena, pool, deletion);
    }
}

fn is_terminal<T>(node: &Node, source: &[T], target: &[T]) -> bool {
    node.source_offset == source.len() && node.target_offset == target.len()
}

fn push_node(arena: &mut Vec<Node>, pool: &mut Vec<usize>, node: Node) {
    pool.push(arena.len());
    arena.push(node);
}

/// One position of a finished alignment.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentStep {
    kind: StepKind,
    source_offset: usize,
    target_offset: usize,
    cost: f64,
}

impl AlignmentStep {
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Cumulative cost of the alignment up to and including this step.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// The result of aligning a source sequence against a target sequence.
///
/// Holds the forward-ordered steps of the winning hypothesis together with
/// the aligned sequences and the terminal cost.
#[derive(Debug)]
pub struct Alignment<'seq, T> {
    steps: Vec<AlignmentStep>,
    source: &'seq [T],
    target: &'seq [T],
    cost: f64,
}

impl<'seq, T> Alignment<'seq, T> {
    fn from_terminal(
        arena: &[Node],
        terminal: usize,
        source: &'seq [T],
        target: &'seq [T],
    ) -> Self {
        let cost = arena[terminal].cost;

        let mut steps = Vec::new();
        let mut index = terminal;
        while index != START {
            let node = &arena[index];
            steps.push(AlignmentStep {
                kind: node.kind,
                source_offset: node.source_offset,
                target_offset: node.target_offset,
                cost: node.cost,
            });

            // Parents precede their children in the arena, so the walk
            // strictly decreases and must reach the sentinel.
            debug_assert!(node.previous < index);
            index = node.previous;
        }
        steps.reverse();

        Self {
            steps,
            source,
            target,
            cost,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[AlignmentStep] {
        &self.steps
    }

    pub fn kind(&self, index: usize) -> StepKind {
        self.steps[index].kind
    }

    /// The source token consumed at the given position, or `None` for an
    /// insertion.
    pub fn source_token(&self, index: usize) -> Option<&'seq T> {
        let step = &self.steps[index];
        match step.kind {
            StepKind::Insert => None,
            _ => Some(&self.source[step.source_offset - 1]),
        }
    }

    /// The target token consumed at the given position, or `None` for a
    /// deletion.
    pub fn target_token(&self, index: usize) -> Option<&'seq T> {
        let step = &self.steps[index];
        match step.kind {
            StepKind::Delete => None,
            _ => Some(&self.target[step.target_offset - 1]),
        }
    }

    /// Total cost of the returned path.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}
