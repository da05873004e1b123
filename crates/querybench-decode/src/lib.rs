pub mod delimited;
pub mod jsonlines;
pub mod messages;

pub use messages::{ColumnMeta, StreamMessage};

#[cfg(test)]
mod tests;
