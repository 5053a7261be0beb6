usecase! {
    login : {
        pub email: String,
        pub password: String,
    } => {
        pub token: String,
        pub user: entities::User,
    }
}

usecase! {
    me : {
        pub claims: crate::auth::Claims,
    } => {
        pub user: entities::User,
    }
}
