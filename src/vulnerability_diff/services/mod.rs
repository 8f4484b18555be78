pub mod fix_detector;

pub use fix_detector::FixDetector;
