mod inmemory;
mod postgres;

pub use inmemory::InMemoryFormRepo;
pub use postgres::PostgresFormRepo;

use sac_event_feedback_domain::Form;

#[async_trait::async_trait]
pub trait IFormRepo: Send + Sync {
    /// Stores the form and returns it with its assigned id
    async fn insert(&self, form: &Form) -> anyhow::Result<Form>;
    async fn find(&self, form_id: i64) -> anyhow::Result<Option<Form>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::tests::create_contexts;
    use sac_event_feedback_domain::Form;

    #[tokio::test]
    async fn crud() {
        for ctx in create_contexts().await {
            let form = ctx
                .repos
                .forms
                .insert(&Form {
                    id: 0,
                    title: "Tourenfeedback".into(),
                })
                .await
                .unwrap();
            assert!(form.id > 0);
            assert_eq!(ctx.repos.forms.find(form.id).await.unwrap(), Some(form.clone()));
            assert!(ctx.repos.forms.find(form.id + 10_000).await.unwrap().is_none());
        }
    }
}
