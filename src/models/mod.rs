pub mod draft;
pub mod generation;
pub mod job;
pub mod profile;
pub mod user;

pub use draft::Draft;
pub use generation::{GenerationMeta, GenerationResult, NotesForUser};
pub use job::{JobRecord, SavedJob};
pub use profile::{Profile, ProfileUpdate};
pub use user::User;
