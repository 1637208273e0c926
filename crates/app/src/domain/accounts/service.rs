//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{customer::is_valid_email, verification::Verdict};
use tracing::{info, warn};

use crate::{
    domain::accounts::{
        errors::AccountsServiceError,
        mailer::{Mailer, WelcomeEmail},
    },
    identity::{AuthenticatedUser, IdentityProvider, MIN_PASSWORD_LENGTH, Password, SignedInUser},
    recaptcha::BotVerifier,
};

/// Accounts backed by an external identity provider, guarded by a bot
/// verifier.
#[derive(Clone)]
pub struct ProviderAccountsService {
    verifier: Arc<dyn BotVerifier>,
    identity: Arc<dyn IdentityProvider>,
    mailer: Arc<dyn Mailer>,
}

impl ProviderAccountsService {
    #[must_use]
    pub fn new(
        verifier: Arc<dyn BotVerifier>,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            verifier,
            identity,
            mailer,
        }
    }

    /// Require a human verdict for `token`; any other result blocks the caller.
    async fn require_human(&self, token: &str) -> Result<(), AccountsServiceError> {
        match self.verifier.verify(token).await? {
            Verdict::Human { .. } => Ok(()),
            Verdict::Rejected(reason) => {
                warn!(?reason, "blocking account operation after failed bot verification");

                Err(AccountsServiceError::VerificationRejected)
            }
        }
    }
}

impl std::fmt::Debug for ProviderAccountsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAccountsService")
            .finish_non_exhaustive()
    }
}

fn validate_credentials(
    email: &str,
    password: &Password,
    token: &str,
) -> Result<(), AccountsServiceError> {
    if email.trim().is_empty() {
        return Err(AccountsServiceError::MissingField("email"));
    }

    if !is_valid_email(email) {
        return Err(AccountsServiceError::InvalidEmail);
    }

    if password.expose().is_empty() {
        return Err(AccountsServiceError::MissingField("password"));
    }

    if !password.is_acceptable() {
        return Err(AccountsServiceError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if token.trim().is_empty() {
        return Err(AccountsServiceError::MissingField("recaptchaToken"));
    }

    Ok(())
}

#[async_trait]
impl AccountsService for ProviderAccountsService {
    async fn verify_human(&self, token: &str) -> Result<Verdict, AccountsServiceError> {
        if token.trim().is_empty() {
            return Err(AccountsServiceError::MissingField("recaptchaToken"));
        }

        Ok(self.verifier.verify(token).await?)
    }

    async fn register(
        &self,
        email: &str,
        password: &Password,
        token: &str,
    ) -> Result<AuthenticatedUser, AccountsServiceError> {
        validate_credentials(email, password, token)?;

        self.require_human(token).await?;

        let user = self.identity.create_user(email.trim(), password).await?;

        info!(uid = %user.uid, "registered account");

        Ok(user)
    }

    async fn login(
        &self,
        email: &str,
        password: &Password,
        token: &str,
    ) -> Result<SignedInUser, AccountsServiceError> {
        validate_credentials(email, password, token)?;

        self.require_human(token).await?;

        let signed_in = self.identity.sign_in(email.trim(), password).await?;

        info!(uid = %signed_in.user.uid, "signed in");

        Ok(signed_in)
    }

    async fn send_welcome_email(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<WelcomeEmail, AccountsServiceError> {
        if email.trim().is_empty() {
            return Err(AccountsServiceError::MissingField("email"));
        }

        if full_name.trim().is_empty() {
            return Err(AccountsServiceError::MissingField("fullName"));
        }

        if !is_valid_email(email) {
            return Err(AccountsServiceError::InvalidEmail);
        }

        let message = WelcomeEmail {
            to: email.trim().to_string(),
            full_name: full_name.trim().to_string(),
        };

        self.mailer.send_welcome(&message).await?;

        Ok(message)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Run bot verification on its own and report the verdict.
    async fn verify_human(&self, token: &str) -> Result<Verdict, AccountsServiceError>;

    /// Create an account once the request has passed bot verification.
    async fn register(
        &self,
        email: &str,
        password: &Password,
        token: &str,
    ) -> Result<AuthenticatedUser, AccountsServiceError>;

    /// Sign in once the request has passed bot verification.
    async fn login(
        &self,
        email: &str,
        password: &Password,
        token: &str,
    ) -> Result<SignedInUser, AccountsServiceError>;

    /// Send the welcome email to a new customer.
    async fn send_welcome_email(
        &self,
        email: &str,
        full_name: &str,
    ) -> Result<WelcomeEmail, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use storefront::verification::RejectionReason;
    use testresult::TestResult;

    use crate::{
        domain::accounts::mailer::{LogMailer, MockMailer},
        identity::{IdentityError, MockIdentityProvider, UserId},
        recaptcha::{BotVerificationError, MockBotVerifier},
    };

    use super::*;

    fn service(
        verifier: MockBotVerifier,
        identity: MockIdentityProvider,
    ) -> ProviderAccountsService {
        ProviderAccountsService::new(
            Arc::new(verifier),
            Arc::new(identity),
            Arc::new(LogMailer::new("shop@example.com")),
        )
    }

    fn human() -> MockBotVerifier {
        let mut verifier = MockBotVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "token")
            .once()
            .returning(|_| Ok(Verdict::Human { score: 0.9 }));

        verifier
    }

    fn account() -> AuthenticatedUser {
        AuthenticatedUser {
            uid: UserId::new("u1"),
            email: "ana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn register_creates_account_after_verification() -> TestResult {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_user()
            .withf(|email, password| email == "ana@example.com" && password.expose() == "secret1")
            .once()
            .returning(|_, _| Ok(account()));

        let user = service(human(), identity)
            .register("ana@example.com", &Password::new("secret1"), "token")
            .await?;

        assert_eq!(user.uid, UserId::new("u1"));

        Ok(())
    }

    #[tokio::test]
    async fn low_score_blocks_registration() {
        let mut verifier = MockBotVerifier::new();
        verifier.expect_verify().once().returning(|_| {
            Ok(Verdict::Rejected(RejectionReason::LowScore {
                score: Some(0.2),
                threshold: 0.5,
            }))
        });

        let mut identity = MockIdentityProvider::new();
        identity.expect_create_user().never();

        let result = service(verifier, identity)
            .register("ana@example.com", &Password::new("secret1"), "token")
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::VerificationRejected)),
            "expected VerificationRejected, got {result:?}"
        );
    }

    #[tokio::test]
    async fn verification_outage_blocks_login() {
        let mut verifier = MockBotVerifier::new();
        verifier.expect_verify().once().returning(|_| {
            Err(BotVerificationError::UnexpectedResponse(
                "status 503".to_string(),
            ))
        });

        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_in().never();

        let result = service(verifier, identity)
            .login("ana@example.com", &Password::new("secret1"), "token")
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::VerificationUnavailable(_))),
            "expected VerificationUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_input_makes_no_calls() {
        let mut verifier = MockBotVerifier::new();
        verifier.expect_verify().never();

        let mut identity = MockIdentityProvider::new();
        identity.expect_create_user().never();

        let accounts = service(verifier, identity);

        let result = accounts
            .register("not-an-email", &Password::new("secret1"), "token")
            .await;
        assert!(
            matches!(result, Err(AccountsServiceError::InvalidEmail)),
            "expected InvalidEmail, got {result:?}"
        );

        let result = accounts
            .register("ana@example.com", &Password::new("12345"), "token")
            .await;
        assert!(
            matches!(result, Err(AccountsServiceError::PasswordTooShort { min: 6 })),
            "expected PasswordTooShort, got {result:?}"
        );

        let result = accounts
            .register("ana@example.com", &Password::new("secret1"), " ")
            .await;
        assert!(
            matches!(result, Err(AccountsServiceError::MissingField("recaptchaToken"))),
            "expected MissingField, got {result:?}"
        );
    }

    #[tokio::test]
    async fn login_returns_id_token() -> TestResult {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_in().once().returning(|_, _| {
            Ok(SignedInUser {
                user: account(),
                id_token: "id-token".to_string(),
            })
        });

        let signed_in = service(human(), identity)
            .login(" ana@example.com ", &Password::new("secret1"), "token")
            .await?;

        assert_eq!(signed_in.id_token, "id-token");

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_in()
            .once()
            .returning(|_, _| Err(IdentityError::InvalidCredentials));

        let result = service(human(), identity)
            .login("ana@example.com", &Password::new("secret1"), "token")
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn welcome_email_goes_through_mailer() -> TestResult {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_welcome()
            .withf(|email| email.to == "ana@example.com" && email.full_name == "Ana Gómez")
            .once()
            .returning(|_| Ok(()));

        let accounts = ProviderAccountsService::new(
            Arc::new(MockBotVerifier::new()),
            Arc::new(MockIdentityProvider::new()),
            Arc::new(mailer),
        );

        let sent = accounts
            .send_welcome_email("ana@example.com", " Ana Gómez ")
            .await?;

        assert_eq!(sent.subject(), "Welcome, Ana Gómez!");

        let result = accounts.send_welcome_email("ana@example.com", "").await;
        assert!(
            matches!(result, Err(AccountsServiceError::MissingField("fullName"))),
            "expected MissingField, got {result:?}"
        );

        Ok(())
    }
}
