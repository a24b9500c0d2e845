//! Data models for the guest upload flow
//!
//! Each sub-module covers one part of a contribution: the event's media
//! policy, the files a guest selects, the guest's details and the request
//! sent to the backend.

mod guest;
mod media;
mod policy;
mod submission;

pub use guest::*;
pub use media::*;
pub use policy::*;
pub use submission::*;
