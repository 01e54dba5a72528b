use super::grid::CandidateGrid;
use crate::error::{Result, TrussevoError};
use crate::types::{Point, Segment};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What the validity checks need to know about a built structure
pub trait LoadBearing {
    fn node_count(&self) -> usize;
    fn member_count(&self) -> usize;
    fn load_node(&self) -> Option<usize>;

    /// Minimum connectivity rule: members >= 2 * nodes - 4
    fn satisfies_connectivity(&self) -> bool {
        self.member_count() + 4 >= 2 * self.node_count()
    }
}

/// Maps a genome to a concrete structure.
///
/// `Ok(None)` means the genome is infeasible (a support could not be attached).
/// `Err` is reserved for contract violations such as a genome of the wrong length.
pub trait StructureBuilder {
    type Structure: LoadBearing;

    fn genome_len(&self) -> usize;
    fn build(&self, genome: &[bool]) -> Result<Option<Self::Structure>>;
}

/// A pin-jointed plane truss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truss {
    pub nodes: Vec<Point>,
    pub members: Vec<(usize, usize)>,
    /// Hinged supports, left corner first
    pub supports: [usize; 2],
    pub load_node: Option<usize>,
}

impl Truss {
    pub fn segment(&self, member: usize) -> Segment {
        let (a, b) = self.members[member];
        Segment::new(self.nodes[a], self.nodes[b])
    }

    pub fn member_length(&self, member: usize) -> f64 {
        self.segment(member).length()
    }

    pub fn total_length(&self) -> f64 {
        (0..self.members.len()).map(|m| self.member_length(m)).sum()
    }
}

impl LoadBearing for Truss {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }

    fn load_node(&self) -> Option<usize> {
        self.load_node
    }
}

/// Builds a symmetric truss: enabled half-grid members plus their reflection
/// across the centerline.
#[derive(Debug, Clone)]
pub struct MirroredTrussBuilder {
    grid: CandidateGrid,
}

impl MirroredTrussBuilder {
    pub fn new(grid: CandidateGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &CandidateGrid {
        &self.grid
    }
}

/// Joint table that merges coincident endpoints
#[derive(Default)]
struct NodeTable {
    nodes: Vec<Point>,
    index: HashMap<(i64, i64), usize>,
}

impl NodeTable {
    fn intern(&mut self, point: Point) -> usize {
        let next = self.nodes.len();
        let idx = *self.index.entry(point.key()).or_insert(next);
        if idx == next {
            self.nodes.push(point);
        }
        idx
    }

    fn lookup(&self, point: &Point) -> Option<usize> {
        self.index.get(&point.key()).copied()
    }
}

impl StructureBuilder for MirroredTrussBuilder {
    type Structure = Truss;

    fn genome_len(&self) -> usize {
        self.grid.len()
    }

    fn build(&self, genome: &[bool]) -> Result<Option<Truss>> {
        if genome.len() != self.grid.len() {
            return Err(TrussevoError::GenomeLength {
                expected: self.grid.len(),
                actual: genome.len(),
            });
        }

        let span = self.grid.span();
        let mut table = NodeTable::default();
        let mut members = Vec::new();
        let mut seen = HashSet::new();

        let enabled = self
            .grid
            .members()
            .iter()
            .zip(genome)
            .filter(|&(_, &on)| on)
            .map(|(segment, _)| *segment);

        for segment in enabled {
            // Members on the centerline are their own mirror and get added once
            for part in [segment, segment.mirrored(span)] {
                let a = table.intern(part.start);
                let b = table.intern(part.end);
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    members.push(key);
                }
            }
        }

        let [left, right] = self.grid.support_points();
        let supports = match (table.lookup(&left), table.lookup(&right)) {
            (Some(l), Some(r)) => [l, r],
            _ => return Ok(None),
        };
        let load_node = table.lookup(&self.grid.load_point());

        Ok(Some(Truss {
            nodes: table.nodes,
            members,
            supports,
            load_node,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn builder() -> MirroredTrussBuilder {
        MirroredTrussBuilder::new(CandidateGrid::new(&GridConfig::default()))
    }

    fn genome_with(builder: &MirroredTrussBuilder, members: &[(Point, Point)]) -> Vec<bool> {
        let mut genome = vec![false; builder.genome_len()];
        for &(a, b) in members {
            let slot = builder.grid().position_of(a, b).unwrap();
            genome[slot] = true;
        }
        genome
    }

    #[test]
    fn test_wrong_length_is_contract_error() {
        let builder = builder();
        let result = builder.build(&[true, false]);
        assert!(matches!(result, Err(TrussevoError::GenomeLength { .. })));
    }

    #[test]
    fn test_empty_genome_is_infeasible() {
        let builder = builder();
        let genome = vec![false; builder.genome_len()];
        assert!(builder.build(&genome).unwrap().is_none());
    }

    #[test]
    fn test_mirrored_triangle() {
        let builder = builder();
        let genome = genome_with(
            &builder,
            &[
                (Point::new(0.0, 0.0), Point::new(7.5, 4.0)),
                (Point::new(0.0, 0.0), Point::new(7.5, 0.0)),
                (Point::new(7.5, 0.0), Point::new(7.5, 4.0)),
            ],
        );

        let truss = builder.build(&genome).unwrap().unwrap();

        // Corners, bottom center, apex
        assert_eq!(truss.node_count(), 4);
        // Two diagonals, two bottom chords, one shared vertical
        assert_eq!(truss.member_count(), 5);
        assert!(truss.load_node().is_some());
        assert!(truss.satisfies_connectivity());

        assert_eq!(truss.nodes[truss.supports[0]], Point::new(0.0, 0.0));
        assert_eq!(truss.nodes[truss.supports[1]], Point::new(15.0, 0.0));
        assert!(
            (truss.total_length() - (2.0 * 8.5 + 15.0 + 4.0)).abs() < 1e-9
        );
    }

    #[test]
    fn test_missing_support_is_infeasible() {
        let builder = builder();
        // Floating member that never touches the base corners
        let genome = genome_with(&builder, &[(Point::new(3.75, 0.0), Point::new(7.5, 4.0))]);
        assert!(builder.build(&genome).unwrap().is_none());
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder();
        let genome: Vec<bool> = (0..builder.genome_len()).map(|i| i % 3 == 0).collect();

        let first = builder.build(&genome).unwrap().unwrap();
        let second = builder.build(&genome).unwrap().unwrap();
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.members, second.members);
    }
}
