use alloc::sync::Arc;

use async_trait::async_trait;

use super::portfolio_err_fmt;
use crate::errors::AppResult;
use crate::repositories::PortfolioRepository;
use crate::usecases::portfolio::{get, update};
use crate::utils::LetChain;
use crate::validation::validate_portfolio;

pub struct PortfolioGetInteractor {
    pub portfolio_repository: Arc<dyn PortfolioRepository + Sync + Send>,
}
#[async_trait]
impl get::Usecase for PortfolioGetInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, get::Input {}: get::Input) -> AppResult<get::Output> {
        self.portfolio_repository
            .find()
            .await
            .map_err(portfolio_err_fmt)?
            .let_(|portfolio| get::Output { portfolio })
            .let_(Ok)
    }
}

pub struct PortfolioUpdateInteractor {
    pub portfolio_repository: Arc<dyn PortfolioRepository + Sync + Send>,
}
#[async_trait]
impl update::Usecase for PortfolioUpdateInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, update::Input { mut portfolio }: update::Input) -> AppResult<update::Output> {
        portfolio.email = portfolio.email.trim().to_lowercase();
        portfolio.name = portfolio.name.trim().to_string();

        validate_portfolio(&portfolio)?;

        self.portfolio_repository
            .upsert(portfolio)
            .await
            .map_err(portfolio_err_fmt)?
            .let_(|portfolio| update::Output { portfolio })
            .let_(Ok)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::entities::{Portfolio, Skill};
    use crate::errors::AppError;
    use crate::repositories::InMemoryRepository;
    use crate::usecases::portfolio::{get::Usecase as _, update::Usecase as _};

    fn owner(email: &str, level: i32) -> Portfolio {
        Portfolio {
            name: "Ada".to_string(),
            email: email.to_string(),
            skills: vec![Skill {
                name: "Rust".to_string(),
                level,
                category: "languages".to_string(),
            }],
            ..Default::default()
        }
    }

    #[rstest]
    #[case("ada@example.com", 0, true)]
    #[case("ada@example.com", 100, true)]
    #[case("ada@example.com", 101, false)]
    #[case("ada@example.com", -1, false)]
    #[case("not-an-email", 50, false)]
    #[tokio::test]
    async fn update_validates_owner(#[case] email: &str, #[case] level: i32, #[case] ok: bool) {
        let update = PortfolioUpdateInteractor {
            portfolio_repository: Arc::new(InMemoryRepository::<Portfolio>::new()),
        };

        let res = update
            .handle(update::Input {
                portfolio: owner(email, level),
            })
            .await;

        assert_eq!(res.is_ok(), ok);
        if let Err(e) = res {
            assert!(matches!(e, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn get_returns_last_update() {
        let portfolio_repository: Arc<dyn PortfolioRepository + Sync + Send> =
            Arc::new(InMemoryRepository::<Portfolio>::new());

        PortfolioUpdateInteractor {
            portfolio_repository: portfolio_repository.clone(),
        }
        .handle(update::Input {
            portfolio: owner(" Ada@Example.com ", 90),
        })
        .await
        .unwrap();

        let got = PortfolioGetInteractor { portfolio_repository }
            .handle(get::Input {})
            .await
            .unwrap()
            .portfolio;

        assert_eq!(got.email, "ada@example.com");
        assert_eq!(got.skills[0].level, 90);
    }
}
