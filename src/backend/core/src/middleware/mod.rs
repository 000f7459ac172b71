//! HTTP boundary for the JSON body layer.
pub mod context;
pub mod jsonify;
pub mod rejection;

pub use context::{JsonBody, JsonPayload};
pub use jsonify::{JsonifyConfig, JsonifyLayer, JsonifyService};
pub use rejection::{Rejection, RejectionBody};
