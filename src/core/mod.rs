//! Core types - descriptors, accumulators, the encoder and the registry.
//!
//! | Module        | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `descriptor`  | base/groups/files value + JSON adapter           |
//! | `accumulator` | mutable descriptor with memoized URI             |
//! | `encoder`     | descriptor → `/min/...` URI                      |
//! | `registry`    | key → accumulator map                            |
//! | `context`     | `Minify`: settings + registry + validator        |

mod accumulator;
mod context;
mod descriptor;
pub mod encoder;
mod registry;

pub use accumulator::Accumulator;
pub use context::Minify;
pub use descriptor::{AssetList, Descriptor, normalize_base};
pub use encoder::{Encoded, FRAGMENT_SEPARATOR, URI_PREFIX, encode};
pub use registry::{AccumulatorHandle, Registry, key_from_value};
