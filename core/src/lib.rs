pub mod fixtures;
pub mod io;
pub mod pipeline;
pub mod strings;

// Case catalogue, runner and reporting shared by the CLI and Criterion benches
pub mod perf;
