mod blocking;
mod http;
mod traits;

pub use blocking::BlockingHttpService;
pub use http::{ApiVersion, HttpService};
pub use traits::{ResearchService, ServiceError};
