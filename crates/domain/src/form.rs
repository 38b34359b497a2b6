use crate::shared::entity::Entity;

/// The CMS form participants use to give feedback
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: i64,
    pub title: String,
}

impl Entity<i64> for Form {
    fn id(&self) -> i64 {
        self.id
    }
}
