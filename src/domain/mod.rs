mod user_forms;
mod user_record;

pub use user_forms::{Field, NewUserForm, Submission, UserUpdateForm};
pub use user_record::{NewUserRecord, UserChangeset, UserDraft, UserId, UserRecord};
