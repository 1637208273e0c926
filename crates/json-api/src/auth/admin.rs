//! Admin guard.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{extensions::*, state::State};

/// Accounts allowed to manage the catalog, matched by email.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdminPolicy {
    emails: Vec<String>,
}

impl AdminPolicy {
    pub(crate) fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|email| email.as_ref().trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    /// Whether `email` belongs to an admin. Comparison ignores case.
    pub(crate) fn allows(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();

        self.emails.iter().any(|admin| *admin == email)
    }
}

/// Reject requests whose authenticated account is not an admin.
///
/// Must run after the auth middleware.
#[salvo::handler]
pub(crate) async fn admin_guard(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let allowed = match (depot.obtain_or_500::<Arc<State>>(), depot.identity_or_401()) {
        (Ok(state), Ok(identity)) => {
            let allowed = state.admins.allows(&identity.email);

            if !allowed {
                warn!(uid = %identity.uid, "non-admin attempted a catalog change");
            }

            Ok(allowed)
        }
        (Err(error), _) | (_, Err(error)) => Err(error),
    };

    match allowed {
        Ok(true) => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(false) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN_EMAIL, Mocks, service, test_admin, test_user};

    use super::*;

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    #[test]
    fn policy_ignores_case_and_blank_entries() {
        let policy = AdminPolicy::new([" Admin@Example.com ", ""]);

        assert!(policy.allows("admin@example.com"), "expected admin match");
        assert!(!policy.allows(""), "blank email must not match");
        assert!(!policy.allows("ana@example.com"), "unexpected admin match");
    }

    #[tokio::test]
    async fn test_admin_passes_guard() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&service(
                Mocks::default(),
                test_admin(),
                Router::new().hoop(admin_guard).get(ok),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(test_admin().email, ADMIN_EMAIL);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&service(
                Mocks::default(),
                test_user(),
                Router::new().hoop(admin_guard).get(ok),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
