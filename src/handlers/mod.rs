pub mod auth_handlers;
pub mod draft_handlers;
pub mod generation_handlers;
pub mod job_handlers;
pub mod profile_handlers;
