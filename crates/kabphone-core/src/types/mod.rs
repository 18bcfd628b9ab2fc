//! Shared wire types: response envelopes and pagination parameters.

pub mod pagination;
pub mod response;

pub use pagination::PageQuery;
pub use response::{Envelope, ErrorBody, MessageBody, PageEnvelope, TokenResponse};
