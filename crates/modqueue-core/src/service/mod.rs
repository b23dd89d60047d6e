//! Services bridging the wire-level API client to the domain layer.

mod cases;
mod review;
mod upload;

pub use cases::CaseService;
pub use review::ReviewService;
pub use upload::UploadService;
