mod faulty_directory;

pub use faulty_directory::{FaultConfig, FaultyDirectory};
