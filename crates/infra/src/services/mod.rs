mod notification_center;

pub use notification_center::{
    HttpNotificationCenter, INotificationCenter, InMemoryNotificationCenter, SentNotification,
};
