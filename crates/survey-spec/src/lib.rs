#![allow(missing_docs)]

pub mod edit;
pub mod i18n;
pub mod outline;
pub mod spec;
pub mod submit;
pub mod survey;
pub mod validate;
pub mod view;

pub use edit::{Applied, Edit, SnapshotSink, SurveyEditor};
pub use i18n::{Catalog, CatalogError, SUPPORTED_LOCALES, normalize_locale, supported_locale};
pub use outline::{Ordered, OrderedList};
pub use spec::{
    AnswerType, EntryId, Group, GroupDraft, GroupPatch, Question, QuestionDraft, QuestionPatch,
    SurveySnapshot,
};
pub use submit::{InlineValidation, SubmitGate};
pub use survey::{Entry, OutlineError, Removed, Scope, Survey};
pub use validate::{
    GroupIssues, Issue, IssueCode, QuestionIssues, SurveyIssues, ValidationReport, validate,
};
pub use view::{EntryKind, EntryRef, MergedEntry, detect_order_conflicts, merged_view};
