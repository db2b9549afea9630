// Resume upload, history and the derived views (roadmap, jobs, tutor).

pub mod handlers;
pub mod pdf;
pub mod store;
