mod contention;

pub use contention::register_benchmarks;
