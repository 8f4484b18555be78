/// Process adapters for running external tools
mod tokio_runner;

pub use tokio_runner::TokioCommandRunner;
