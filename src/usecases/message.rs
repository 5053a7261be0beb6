usecase! {
    submit : {
        pub draft: entities::MessageDraft,
        pub ip_address: Option<String>,
    } => {
        pub message: entities::Message,
    }
}

usecase! {
    gets : {
        pub query: crate::repositories::MessageQuery,
    } => {
        pub messages: Vec<entities::Message>,
        pub total: u64,
        pub paging: crate::repositories::Paging,
    }
}

usecase! {
    get : {
        pub message_id: entities::MessageId,
    } => {
        pub message: entities::Message,
    }
}

usecase! {
    edit : {
        pub message_id: entities::MessageId,
        pub mutation: super::MessageMutation,
    } => {
        pub message: entities::Message,
    }
}

usecase! {
    delete : {
        pub message_id: entities::MessageId,
    } => {
        pub message: entities::Message,
    }
}

use crate::entities::MessageStatus;

/// Admin update of a message. Any status may follow any other.
#[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMutation {
    pub status: Option<MessageStatus>,
    /// Setting a reply also marks the message `replied`.
    pub reply_message: Option<String>,
}
