use serde::{Deserialize, Serialize};

/// A free-form preparation note tied loosely to a subject.
///
/// Like goals, preparations hold a weak `subject_id` reference and survive
/// the deletion of their subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preparation {
    pub id: String,
    pub subject_id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
}
