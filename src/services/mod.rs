pub mod auth_service;
pub mod draft_service;
pub mod generation_client;
pub mod job_search;
pub mod profile_service;
pub mod prompt_builder;
pub mod user_service;

pub use auth_service::AuthService;
pub use draft_service::DraftService;
pub use generation_client::{GenerationClient, GenerationError, ModelOutput};
pub use job_search::{JobQuery, JobSearchClient, JobSearchError};
pub use profile_service::ProfileService;
pub use prompt_builder::{build_prompt, GenerationOptions, Length, ProfileSnapshot, Prompt, Tone};
pub use user_service::UserService;
