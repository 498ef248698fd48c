pub mod registry;
pub mod store;
pub mod feedback_loop;

pub use registry::CandidateRegistry;
pub use store::{FeedbackLog, JsonlFeedbackLog, MemoryFeedbackLog};
pub use feedback_loop::{FeedbackAck, FeedbackLoop, FeedbackSubmission, MAX_RATING, MIN_RATING};
