use super::IFormRepo;
use crate::repos::shared::inmemory_repo::*;
use sac_event_feedback_domain::Form;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryFormRepo {
    forms: std::sync::Mutex<Vec<Form>>,
    last_id: AtomicI64,
}

impl InMemoryFormRepo {
    pub fn new() -> Self {
        Self {
            forms: std::sync::Mutex::new(Vec::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IFormRepo for InMemoryFormRepo {
    async fn insert(&self, form: &Form) -> anyhow::Result<Form> {
        let mut form = form.clone();
        form.id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        insert(&form, &self.forms);
        Ok(form)
    }

    async fn find(&self, form_id: i64) -> anyhow::Result<Option<Form>> {
        Ok(find(&form_id, &self.forms))
    }
}
