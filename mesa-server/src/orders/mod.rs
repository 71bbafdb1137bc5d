//! Order pipeline: cart submission and status progression

mod pipeline;

pub use pipeline::{OrderPipeline, SubmitOrder};
