mod progress;

pub use progress::ScanProgress;
