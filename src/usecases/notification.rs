usecase! {
    gets : {
        pub query: crate::repositories::NotificationQuery,
    } => {
        pub notifications: Vec<entities::UserNotification>,
        pub total: u64,
        pub unread: u64,
        pub paging: crate::repositories::Paging,
    }
}

usecase! {
    unread_count : {
        pub recipient: entities::UserId,
    } => {
        pub count: u64,
    }
}

usecase! {
    mark_read : {
        pub notification_id: entities::NotificationId,
        pub recipient: entities::UserId,
    } => {
        pub notification: entities::UserNotification,
    }
}

usecase! {
    mark_all_read : {
        pub recipient: entities::UserId,
    } => {
        pub modified: u64,
    }
}

usecase! {
    create : {
        pub draft: entities::NotificationDraft,
        pub sender: Option<entities::UserId>,
    } => {
        pub notification: entities::UserNotification,
    }
}
