pub mod builder;
pub mod grid;

pub use builder::{LoadBearing, MirroredTrussBuilder, StructureBuilder, Truss};
pub use grid::CandidateGrid;
