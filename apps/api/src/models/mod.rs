pub mod interview;
pub mod jobs;
pub mod resume;
pub mod skill;
