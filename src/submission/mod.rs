pub mod types;
pub mod validator;

pub use types::{Submission, SubmissionMeta, SubmissionPage};
pub use validator::validate_submission;
