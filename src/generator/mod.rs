//! Diagram generation backed by the diagram cache.
//!
//! For each diagram the generator asks the cache whether fresh outputs
//! already exist, renders only on a miss, and records the new outputs.
//! Rendering itself is delegated to a [`DiagramRenderer`].

pub mod job;
pub mod pipeline;

pub use job::{DiagramJob, DiagramRenderer, Generation};
pub use pipeline::{DiagramGenerator, GeneratorStats, RunReport};
