//! Answer submissions. Immutable once stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AnswerId, ChoiceId, QuestionId, UserId};

/// Answer awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    pub answered_at: DateTime<Utc>,
}

/// Stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    pub id: AnswerId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    pub answered_at: DateTime<Utc>,
}
