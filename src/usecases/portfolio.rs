usecase! {
    get : {} => {
        pub portfolio: entities::Portfolio,
    }
}

usecase! {
    update : {
        pub portfolio: entities::Portfolio,
    } => {
        pub portfolio: entities::Portfolio,
    }
}
