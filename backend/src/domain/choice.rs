//! Answer options attached to a question.
//!
//! Choices carry no owner. The creator-supplied correctness flag is trusted
//! and a question may have any number of correct choices.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ChoiceId, QuestionId};

/// Choice awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub question_id: QuestionId,
    pub text: String,
    pub is_correct: bool,
}

/// Stored choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    #[schema(example = "1989")]
    pub text: String,
    pub is_correct: bool,
}
