use super::IFormRepo;
use sac_event_feedback_domain::Form;
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresFormRepo {
    pool: PgPool,
}

impl PostgresFormRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FormRaw {
    form_id: i64,
    title: String,
}

impl From<FormRaw> for Form {
    fn from(e: FormRaw) -> Self {
        Self {
            id: e.form_id,
            title: e.title,
        }
    }
}

#[async_trait::async_trait]
impl IFormRepo for PostgresFormRepo {
    async fn insert(&self, form: &Form) -> anyhow::Result<Form> {
        let raw: FormRaw = sqlx::query_as(
            r#"
            INSERT INTO forms(title)
            VALUES($1)
            RETURNING *
            "#,
        )
        .bind(&form.title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to insert form: {:?}. DB returned error: {:?}", form, e);
            e
        })?;
        Ok(raw.into())
    }

    async fn find(&self, form_id: i64) -> anyhow::Result<Option<Form>> {
        let res: Option<FormRaw> = sqlx::query_as(
            r#"
            SELECT * FROM forms
            WHERE form_id = $1
            "#,
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find form with id: {:?} failed. DB returned error: {:?}",
                form_id, e
            );
            e
        })?;
        Ok(res.map(|f| f.into()))
    }
}
