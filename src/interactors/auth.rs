use async_trait::async_trait;
use chrono::Utc;

use crate::auth::{AdminAccount, TokenSigner};
use crate::errors::{AppError, AppResult};
use crate::usecases::auth::{login, me};

pub struct AuthLoginInteractor {
    pub account: AdminAccount,
    pub signer: TokenSigner,
}
#[async_trait]
impl login::Usecase for AuthLoginInteractor {
    #[tracing::instrument(skip(self, data))]
    async fn handle(&self, data: login::Input) -> AppResult<login::Output> {
        let login::Input { email, password } = data;

        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::bad_request("Please provide email and password"));
        }

        if !self.account.check(&email, &password) {
            tracing::info!("rejected sign-in attempt");
            return Err(AppError::unauthorized("Incorrect email or password"));
        }

        let token = self.signer.issue(&self.account.user, Utc::now())?;

        Ok(login::Output {
            token,
            user: self.account.user.clone(),
        })
    }
}

pub struct AuthMeInteractor {
    pub account: AdminAccount,
}
#[async_trait]
impl me::Usecase for AuthMeInteractor {
    #[tracing::instrument(skip(self))]
    async fn handle(&self, me::Input { claims }: me::Input) -> AppResult<me::Output> {
        match claims.sub == self.account.user.id {
            true => Ok(me::Output {
                user: self.account.user.clone(),
            }),
            false => Err(AppError::unauthorized(
                "The user belonging to this token no longer exists",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{digest_password, Claims};
    use crate::entities::{Role, UserId};
    use crate::usecases::auth::{login::Usecase as _, me::Usecase as _};

    fn account() -> AdminAccount {
        AdminAccount::new(UserId::generate(), "Admin", "admin@example.com", digest_password("pw"))
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let signer = TokenSigner::new("secret", 60);
        let interactor = AuthLoginInteractor {
            account: account(),
            signer: signer.clone(),
        };

        let out = interactor
            .handle(login::Input {
                email: "ADMIN@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        let claims = signer.verify(&out.token, Utc::now()).unwrap();
        assert_eq!(claims.sub, out.user.id);
        assert_eq!(out.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let err = AuthLoginInteractor {
            account: account(),
            signer: TokenSigner::new("secret", 60),
        }
        .handle(login::Input {
            email: "admin@example.com".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password");
    }

    #[tokio::test]
    async fn me_rejects_unknown_subject() {
        let err = AuthMeInteractor { account: account() }
            .handle(me::Input {
                claims: Claims {
                    sub: UserId::generate(),
                    role: Role::Admin,
                    exp: i64::MAX,
                },
            })
            .await
            .unwrap_err();

        assert!(err.is_operational());
    }
}
