use super::IRegistrationRepo;
use sac_event_feedback_domain::Registration;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RegistrationRaw {
    registration_id: i64,
    uuid: Uuid,
    event_id: i64,
    firstname: String,
    lastname: String,
    email: String,
    has_participated: bool,
    feedback_notification_count: i64,
}

impl From<RegistrationRaw> for Registration {
    fn from(e: RegistrationRaw) -> Self {
        Self {
            id: e.registration_id,
            uuid: e.uuid,
            event_id: e.event_id,
            firstname: e.firstname,
            lastname: e.lastname,
            email: e.email,
            has_participated: e.has_participated,
            feedback_notification_count: e.feedback_notification_count,
        }
    }
}

#[async_trait::async_trait]
impl IRegistrationRepo for PostgresRegistrationRepo {
    async fn insert(&self, registration: &Registration) -> anyhow::Result<Registration> {
        let raw: RegistrationRaw = sqlx::query_as(
            r#"
            INSERT INTO registrations
            (uuid, event_id, firstname, lastname, email, has_participated, feedback_notification_count)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(registration.uuid)
        .bind(registration.event_id)
        .bind(&registration.firstname)
        .bind(&registration.lastname)
        .bind(&registration.email)
        .bind(registration.has_participated)
        .bind(registration.feedback_notification_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert registration: {:?}. DB returned error: {:?}",
                registration, e
            );
            e
        })?;
        Ok(raw.into())
    }

    async fn save(&self, registration: &Registration) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE registrations
            SET firstname = $2,
            lastname = $3,
            email = $4,
            has_participated = $5,
            feedback_notification_count = $6
            WHERE registration_id = $1
            "#,
        )
        .bind(registration.id)
        .bind(&registration.firstname)
        .bind(&registration.lastname)
        .bind(&registration.email)
        .bind(registration.has_participated)
        .bind(registration.feedback_notification_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save registration: {:?}. DB returned error: {:?}",
                registration, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, registration_id: i64) -> Option<Registration> {
        let res: Option<RegistrationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM registrations
            WHERE registration_id = $1
            "#,
        )
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find registration with id: {:?} failed. DB returned error: {:?}",
                registration_id, e
            );
            e
        })
        .ok()?;
        res.map(|r| r.into())
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> anyhow::Result<Option<Registration>> {
        let res: Option<RegistrationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM registrations
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find registration with uuid: {:?} failed. DB returned error: {:?}",
                uuid, e
            );
            e
        })?;
        Ok(res.map(|r| r.into()))
    }

    async fn increment_notification_count(&self, registration_id: i64) -> anyhow::Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            UPDATE registrations
            SET feedback_notification_count = feedback_notification_count + 1
            WHERE registration_id = $1
            RETURNING feedback_notification_count
            "#,
        )
        .bind(registration_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }
}
