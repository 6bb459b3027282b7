pub mod error;
pub mod policy;
pub mod report;
pub mod research;
pub mod section;

pub use error::DeskError;
pub use policy::{PolicyAdvice, PolicyQuery, PolicySource};
pub use report::Report;
pub use research::{
    Envelope, ResearchLength, ResearchRequest, ResearchResult, Source, Video, VideoList,
    VideoRequest,
};
pub use section::{parse_optional_sections, parse_sections, Section};
