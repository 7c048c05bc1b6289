//! Session layer over the casino backend.
//!
//! Backend reads are cached for a stale time and refetched after the
//! mutations that affect them. A wheel spin updates the cached profile
//! immediately with the backend's result. A rejected mutation never touches
//! the cache.

pub mod admin;
mod cache;
mod error;
pub mod profile;
mod session;
pub mod wallet;
pub mod wheel;

pub use cache::{CacheValue, Generation, QueryCache, QueryData, QueryKey};
pub use error::{SessionError, SessionResult};
pub use session::{PurchaseReceipt, Session, DEFAULT_STALE_TIME};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use casino_client::*;
    use mockall::mock;
    use std::sync::Arc;
    use std::time::Duration;

    mock! {
        pub Backend {}

        #[async_trait]
        impl CasinoBackend for Backend {
            async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, CasinoError>;
            async fn complete_initial_profile_setup(&self, registration: RegistrationData) -> Result<(), CasinoError>;
            async fn get_caller_user_role(&self) -> Result<UserRole, CasinoError>;
            async fn is_caller_admin(&self) -> Result<bool, CasinoError>;
            async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, CasinoError>;
            async fn get_my_credit_transactions(&self) -> Result<Vec<Transaction>, CasinoError>;
            async fn get_credit_packages(&self) -> Result<Vec<CreditPackage>, CasinoError>;
            async fn spin_wheel(&self) -> Result<SpinResult, CasinoError>;
            async fn create_manual_payment_request(&self, amount: u64, credits: u64) -> Result<u64, CasinoError>;
            async fn get_my_manual_payment_requests(&self) -> Result<Vec<ManualPaymentRequest>, CasinoError>;
            async fn get_manual_payment_request(&self, request_id: u64) -> Result<Option<ManualPaymentRequest>, CasinoError>;
            async fn get_all_manual_payment_requests(&self) -> Result<Vec<ManualPaymentRequest>, CasinoError>;
            async fn approve_manual_payment(&self, request_id: u64) -> Result<(), CasinoError>;
            async fn decline_manual_payment(&self, request_id: u64) -> Result<(), CasinoError>;
            async fn get_manual_payment_config(&self) -> Result<Option<ManualPaymentConfig>, CasinoError>;
            async fn set_manual_payment_config(&self, config: ManualPaymentConfig) -> Result<(), CasinoError>;
            async fn is_stripe_configured(&self) -> Result<bool, CasinoError>;
            async fn set_stripe_configuration(&self, config: StripeConfiguration) -> Result<(), CasinoError>;
            async fn get_house_edge_value(&self) -> Result<u64, CasinoError>;
            async fn set_house_edge_value(&self, value: u64) -> Result<(), CasinoError>;
            async fn admin_update_credits(&self, user: PrincipalId, new_balance: u64) -> Result<u64, CasinoError>;
        }
    }

    fn session(backend: MockBackend) -> Session {
        Session::new(Arc::new(backend), Duration::from_secs(30))
    }

    fn profile(credits: u64) -> UserProfile {
        UserProfile {
            display_name: "Asha".into(),
            date_of_birth: "1990-04-12".into(),
            credits,
            transactions: vec![],
            bonus_granted: false,
            last_spin_result: None,
        }
    }

    fn spin_result(balance_after_spin: u64, profit: i64, outcome: GameOutcome) -> SpinResult {
        SpinResult {
            user: "aaaaa-aa".into(),
            balance_after_spin,
            profit,
            outcome,
        }
    }

    fn packages() -> Vec<CreditPackage> {
        vec![
            CreditPackage::new("Starter", 200, 100),
            CreditPackage::new("Popular", 1000, 500),
        ]
    }

    fn payment_config() -> ManualPaymentConfig {
        ManualPaymentConfig {
            qr_image_reference: "manual-payment-qr.png".into(),
            instructions: "Scan and pay".into(),
        }
    }

    #[tokio::test]
    async fn test_profile_is_cached_while_fresh() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(400))));

        let session = session(backend);

        assert_eq!(session.balance().await.unwrap(), 400);
        assert_eq!(session.balance().await.unwrap(), 400);
    }

    #[tokio::test]
    async fn test_stale_query_refetches() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_house_edge_value()
            .times(2)
            .returning(|| Ok(300));

        let session = Session::new(Arc::new(backend), Duration::from_millis(50));

        assert_eq!(session.house_edge().await.unwrap(), 300);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(session.house_edge().await.unwrap(), 300);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_untouched() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_leaderboard()
            .times(1)
            .returning(|| Err(CasinoError::RateLimit));

        let session = session(backend);

        assert!(matches!(
            session.leaderboard().await,
            Err(SessionError::Backend(CasinoError::RateLimit))
        ));
        assert!(session.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_spin_updates_profile_optimistically() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(100))));
        backend
            .expect_spin_wheel()
            .times(1)
            .returning(|| Ok(spin_result(148, 48, GameOutcome::Dragon)));

        let session = session(backend);
        let result = session.spin().await.unwrap();
        assert_eq!(result.outcome, GameOutcome::Dragon);

        let cached = session
            .cache()
            .peek::<Option<UserProfile>>(&QueryKey::CurrentUserProfile)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.credits, 148);
        assert_eq!(cached.last_spin_result, Some(result));

        // Invalidated: the next read must go back to the backend.
        assert!(session
            .cache()
            .get_fresh::<Option<UserProfile>>(&QueryKey::CurrentUserProfile)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_spin_invalidates_dependent_queries() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(500))));
        backend
            .expect_get_leaderboard()
            .times(1)
            .returning(|| Ok(vec![("aaaaa-aa".into(), 500)]));
        backend
            .expect_get_house_edge_value()
            .times(1)
            .returning(|| Ok(200));
        backend
            .expect_spin_wheel()
            .times(1)
            .returning(|| Ok(spin_result(450, -50, GameOutcome::Miss)));

        let session = session(backend);
        session.leaderboard().await.unwrap();
        session.house_edge().await.unwrap();
        session.spin().await.unwrap();

        let cache = session.cache();
        assert!(cache
            .get_fresh::<Vec<LeaderboardEntry>>(&QueryKey::Leaderboard)
            .await
            .is_none());
        assert_eq!(cache.get_fresh::<u64>(&QueryKey::HouseEdge).await, Some(200));
    }

    #[tokio::test]
    async fn test_spin_requires_balance() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(49))));
        backend.expect_spin_wheel().never();

        let session = session(backend);

        assert!(matches!(
            session.spin().await,
            Err(SessionError::InsufficientBalance {
                required: 50,
                available: 49
            })
        ));
    }

    #[tokio::test]
    async fn test_spin_without_profile_is_refused() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .returning(|| Ok(None));
        backend.expect_spin_wheel().never();

        let session = session(backend);

        assert!(matches!(
            session.spin().await,
            Err(SessionError::InsufficientBalance { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_rejected_spin_leaves_cache_untouched() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(300))));
        backend
            .expect_spin_wheel()
            .times(1)
            .returning(|| Err(CasinoError::Rejected("Spin already in progress".into())));

        let session = session(backend);

        assert!(session.spin().await.is_err());

        let cached = session
            .cache()
            .get_fresh::<Option<UserProfile>>(&QueryKey::CurrentUserProfile)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.credits, 300);
        assert!(cached.last_spin_result.is_none());
    }

    #[tokio::test]
    async fn test_quote() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_credit_packages()
            .times(1)
            .returning(|| Ok(packages()));

        let session = session(backend);

        let quote = session.quote(50.0).await.unwrap().unwrap();
        assert_eq!(quote.credits, 100);
        assert_eq!(quote.ratio, 2.0);
    }

    #[tokio::test]
    async fn test_quote_rejects_non_positive_amounts() {
        let mut backend = MockBackend::new();
        backend.expect_get_credit_packages().never();

        let session = session(backend);

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                session.quote(amount).await,
                Err(SessionError::InvalidAmount(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_buy_credits_submits_priced_request() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_credit_packages()
            .returning(|| Ok(packages()));
        backend
            .expect_get_manual_payment_config()
            .returning(|| Ok(Some(payment_config())));
        backend
            .expect_get_my_manual_payment_requests()
            .times(2)
            .returning(|| Ok(vec![]));
        backend
            .expect_create_manual_payment_request()
            .withf(|amount, credits| *amount == 250 && *credits == 500)
            .times(1)
            .returning(|_, _| Ok(12));

        let session = session(backend);
        session.my_payment_requests().await.unwrap();

        let receipt = session.buy_credits(250).await.unwrap();
        assert_eq!(
            receipt,
            PurchaseReceipt {
                request_id: 12,
                amount: 250,
                credits: 500
            }
        );

        // The request list was invalidated, so this hits the backend again.
        session.my_payment_requests().await.unwrap();
    }

    #[tokio::test]
    async fn test_buy_credits_unavailable_pricing() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_credit_packages()
            .returning(|| Ok(vec![CreditPackage::new("Free", 100, 0)]));
        backend.expect_create_manual_payment_request().never();

        let session = session(backend);

        assert!(matches!(
            session.buy_credits(100).await,
            Err(SessionError::PricingUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_buy_credits_rejects_zero_amount() {
        let mut backend = MockBackend::new();
        backend.expect_create_manual_payment_request().never();

        let session = session(backend);

        assert!(matches!(
            session.buy_credits(0).await,
            Err(SessionError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_buy_credits_amount_too_small() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_credit_packages()
            .returning(|| Ok(vec![CreditPackage::new("Premium", 1, 10)]));
        backend.expect_create_manual_payment_request().never();

        let session = session(backend);

        assert!(matches!(
            session.buy_credits(5).await,
            Err(SessionError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_buy_credits_requires_payment_config() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_credit_packages()
            .returning(|| Ok(packages()));
        backend
            .expect_get_manual_payment_config()
            .returning(|| Ok(None));
        backend.expect_create_manual_payment_request().never();

        let session = session(backend);

        assert!(matches!(
            session.buy_credits(100).await,
            Err(SessionError::PaymentsNotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_payment_request_zero_id_skips_backend() {
        let mut backend = MockBackend::new();
        backend.expect_get_manual_payment_request().never();

        let session = session(backend);

        assert!(session.payment_request(0).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_payment_request_failure_maps_to_none() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_manual_payment_request()
            .returning(|_| Err(CasinoError::Forbidden("not your request".into())));

        let session = session(backend);

        assert!(session.payment_request(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_approve_invalidates_request_lists() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_all_manual_payment_requests()
            .times(2)
            .returning(|| Ok(vec![]));
        backend
            .expect_approve_manual_payment()
            .withf(|id| *id == 4)
            .times(1)
            .returning(|_| Ok(()));

        let session = session(backend);
        session.all_payment_requests().await.unwrap();
        session.approve_payment(4).await.unwrap();
        session.all_payment_requests().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_decline_keeps_cached_lists_fresh() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_all_manual_payment_requests()
            .times(1)
            .returning(|| Ok(vec![]));
        backend
            .expect_decline_manual_payment()
            .returning(|_| Err(CasinoError::Rejected("Request already processed".into())));

        let session = session(backend);
        session.all_payment_requests().await.unwrap();

        assert!(session.decline_payment(4).await.is_err());
        session.all_payment_requests().await.unwrap();
    }

    #[tokio::test]
    async fn test_set_house_edge_validates_before_calling() {
        let mut backend = MockBackend::new();
        backend.expect_set_house_edge_value().never();

        let session = session(backend);

        assert!(matches!(
            session.set_house_edge(12_000).await,
            Err(SessionError::InvalidHouseEdge(12_000))
        ));
    }

    #[tokio::test]
    async fn test_set_house_edge_invalidates() {
        let mut backend = MockBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_house_edge_value()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(200));
        backend
            .expect_set_house_edge_value()
            .withf(|value| *value == 350)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_get_house_edge_value()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(350));

        let session = session(backend);

        assert_eq!(session.house_edge().await.unwrap(), 200);
        session.set_house_edge(350).await.unwrap();
        assert_eq!(session.house_edge().await.unwrap(), 350);
    }

    #[tokio::test]
    async fn test_set_payment_config_trims_fields() {
        let mut backend = MockBackend::new();
        backend
            .expect_set_manual_payment_config()
            .withf(|config| *config == payment_config())
            .times(1)
            .returning(|_| Ok(()));

        let session = session(backend);

        session
            .set_payment_config("  manual-payment-qr.png ", " Scan and pay\n")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_stripe_configuration() {
        let mut backend = MockBackend::new();
        backend
            .expect_set_stripe_configuration()
            .withf(|config| config.allowed_countries == vec!["US".to_string(), "IN".to_string()])
            .times(1)
            .returning(|_| Ok(()));

        let session = session(backend);

        session
            .set_stripe_configuration("sk_test_123", "us, in, india")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_complete_profile_setup_invalidates_profile() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_caller_user_profile()
            .times(2)
            .returning(|| Ok(None));
        backend
            .expect_complete_initial_profile_setup()
            .times(1)
            .returning(|_| Ok(()));

        let session = session(backend);
        session.profile().await.unwrap();
        session
            .complete_profile_setup(RegistrationData {
                display_name: "Asha".into(),
                date_of_birth: "1990-04-12".into(),
                referrer: None,
                coupon_code: None,
            })
            .await
            .unwrap();
        session.profile().await.unwrap();
    }

    #[tokio::test]
    async fn test_admin_update_credits() {
        let mut backend = MockBackend::new();
        backend
            .expect_admin_update_credits()
            .withf(|user, balance| user == "bbbbb-bb" && *balance == 1000)
            .times(1)
            .returning(|_, balance| Ok(balance));

        let session = session(backend);

        assert_eq!(
            session
                .admin_update_credits("bbbbb-bb".into(), 1000)
                .await
                .unwrap(),
            1000
        );
    }

    #[tokio::test]
    async fn test_my_transactions_cached_until_spin() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_my_credit_transactions()
            .times(2)
            .returning(|| Ok(vec![]));
        backend
            .expect_get_caller_user_profile()
            .times(1)
            .returning(|| Ok(Some(profile(500))));
        backend
            .expect_spin_wheel()
            .times(1)
            .returning(|| Ok(spin_result(520, 20, GameOutcome::Tiger)));

        let session = session(backend);

        assert!(session.my_transactions().await.unwrap().is_empty());
        assert!(session.my_transactions().await.unwrap().is_empty());

        session.spin().await.unwrap();
        assert!(session
            .cache()
            .get_fresh::<Vec<Transaction>>(&QueryKey::MyTransactions)
            .await
            .is_none());

        // Refetched after the spin
        session.my_transactions().await.unwrap();
    }

    #[tokio::test]
    async fn test_read_in_flight_during_update_is_not_cached() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc/getHouseEdgeValue"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(100)
                    .set_delay(Duration::from_millis(200)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rpc/getHouseEdgeValue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(350))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rpc/setHouseEdgeValue"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = CasinoClient::new(server.uri(), None, Duration::from_secs(5)).unwrap();
        let session = Session::new(Arc::new(client), Duration::from_secs(30));

        let reader = session.clone();
        let in_flight = tokio::spawn(async move { reader.house_edge().await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        session.set_house_edge(350).await.unwrap();

        // The slow read still answers its caller with what it saw...
        assert_eq!(in_flight.await.unwrap().unwrap(), 100);
        // ...but does not overwrite the invalidation.
        assert_eq!(session.house_edge().await.unwrap(), 350);
    }

    #[tokio::test]
    async fn test_setup_profile_passes_referrer() {
        let mut backend = MockBackend::new();
        backend
            .expect_complete_initial_profile_setup()
            .withf(|data| {
                data.display_name == "Asha" && data.referrer.as_deref() == Some("bbbbb-bb")
            })
            .times(1)
            .returning(|_| Ok(()));

        let session = session(backend).with_caller(Some("aaaaa-aa".into()));

        session
            .setup_profile("Asha", "1990-04-12", "bbbbb-bb")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_setup_profile_refuses_self_referral() {
        let mut backend = MockBackend::new();
        backend.expect_complete_initial_profile_setup().never();

        let session = session(backend).with_caller(Some("aaaaa-aa".into()));

        assert!(matches!(
            session.setup_profile("Asha", "1990-04-12", "aaaaa-aa").await,
            Err(SessionError::SelfReferral)
        ));
        assert!(matches!(
            session.setup_profile("Asha", "1990-04-12", "friend").await,
            Err(SessionError::InvalidReferralCode)
        ));
    }
}
