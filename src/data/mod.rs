pub mod checkpoint;

pub use checkpoint::{
    CheckpointProgressCallback, CheckpointWriter, PopulationCheckpoint, StructureSnapshot,
};
