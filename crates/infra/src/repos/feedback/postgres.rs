use super::IFeedbackRepo;
use sac_event_feedback_domain::Feedback;
use serde_json::Value;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresFeedbackRepo {
    pool: PgPool,
}

impl PostgresFeedbackRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FeedbackRaw {
    feedback_uid: Uuid,
    uuid: Uuid,
    event_id: i64,
    date_added: i64,
    answers: Value,
}

impl From<FeedbackRaw> for Feedback {
    fn from(e: FeedbackRaw) -> Self {
        Self {
            id: e.feedback_uid,
            uuid: e.uuid,
            event_id: e.event_id,
            date_added: e.date_added,
            answers: e.answers,
        }
    }
}

#[async_trait::async_trait]
impl IFeedbackRepo for PostgresFeedbackRepo {
    async fn insert(&self, feedback: &Feedback) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feedbacks
            (feedback_uid, uuid, event_id, date_added, answers)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(feedback.id)
        .bind(feedback.uuid)
        .bind(feedback.event_id)
        .bind(feedback.date_added)
        .bind(&feedback.answers)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert feedback: {:?}. DB returned error: {:?}",
                feedback, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Vec<Feedback>> {
        let feedbacks: Vec<FeedbackRaw> = sqlx::query_as(
            r#"
            SELECT * FROM feedbacks
            WHERE uuid = $1
            ORDER BY date_added
            "#,
        )
        .bind(uuid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find feedbacks for registration: {:?} failed. DB returned error: {:?}",
                uuid, e
            );
            e
        })?;
        Ok(feedbacks.into_iter().map(|f| f.into()).collect())
    }
}
