macro_rules! usecase {
    ($n:ident : { $( $i:tt )* } => { $( $o:tt )* }) => {
        pub mod $n {
            #[allow(unused_imports)]
            use crate::entities;

            #[::async_trait::async_trait]
            pub trait Usecase {
                async fn handle(&self, data: Input) -> crate::errors::AppResult<Output>;
            }

            #[derive(Debug)]
            pub struct Input { $( $i )* }

            #[derive(Debug)]
            pub struct Output { $( $o )* }
        }
    };
}

pub mod auth;
pub mod message;
pub mod notification;
pub mod portfolio;
pub mod project;
