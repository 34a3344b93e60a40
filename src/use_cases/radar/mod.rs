// Synthetic radar: sweeps produce frames, the processor fans them out per source.

pub mod processor;
pub mod scanner;

pub use processor::RadarProcessor;
pub use scanner::{FrameHandler, Scanner, ScannerOptions};
