pub mod connector;
pub mod runner;

pub use connector::{Connector, ConnectorConfig, Execution};
pub use runner::{ProcessRunner, RunOutput};
