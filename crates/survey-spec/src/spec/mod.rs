pub mod group;
pub mod id;
pub mod question;
pub mod snapshot;

pub use group::{Group, GroupDraft, GroupPatch};
pub use id::EntryId;
pub use question::{AnswerType, Question, QuestionDraft, QuestionPatch};
pub use snapshot::SurveySnapshot;
