//! Notification preference loading, saving, and push-registration reconciliation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use motivator_core::error::{AppError, ErrorKind};
use motivator_core::result::AppResult;
use motivator_core::traits::clock::Clock;
use motivator_core::traits::registrar::{PushRegistrar, PushRegistration, RegistrationOutcome};
use motivator_core::traits::store::PreferenceStore;
use motivator_core::types::id::UserId;
use motivator_entity::notification::{NotificationPreference, PreferenceDocument};

use super::eligibility;
use crate::context::SessionContext;

/// Owns each user's notification schedule.
///
/// `enabled == true` is only ever persisted after the push registrar has
/// granted a registration for the session's device within the same save.
#[derive(Debug, Clone)]
pub struct NotificationPreferenceManager {
    /// Persistence for preference documents.
    store: Arc<dyn PreferenceStore>,
    /// Device push registration.
    registrar: Arc<dyn PushRegistrar>,
    /// Source of "now" for clock-based helpers.
    clock: Arc<dyn Clock>,
    /// Upper bound on one registration attempt.
    registration_timeout: Duration,
}

impl NotificationPreferenceManager {
    /// Creates a new preference manager.
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        registrar: Arc<dyn PushRegistrar>,
        clock: Arc<dyn Clock>,
        registration_timeout: Duration,
    ) -> Self {
        Self {
            store,
            registrar,
            clock,
            registration_timeout,
        }
    }

    /// Loads a user's preference, or the default one if none is stored.
    pub async fn load(&self, user_id: &UserId) -> AppResult<NotificationPreference> {
        let raw = self.store.get(user_id).await?;

        let Some(raw) = raw else {
            debug!(%user_id, "No stored preference, using default");
            return Ok(NotificationPreference::default());
        };

        let document: PreferenceDocument = serde_json::from_str(&raw)?;
        NotificationPreference::try_from(document)
    }

    /// Like [`load`](Self::load), but falls back to the default preference
    /// when the store cannot be reached.
    pub async fn load_or_default(&self, user_id: &UserId) -> AppResult<NotificationPreference> {
        match self.load(user_id).await {
            Err(e) if e.kind == ErrorKind::StoreUnavailable => {
                warn!(%user_id, error = %e, "Preference store unavailable, using default");
                Ok(NotificationPreference::default())
            }
            other => other,
        }
    }

    /// Saves `candidate` as the session user's preference using the
    /// configured registration timeout.
    pub async fn save(
        &self,
        ctx: &SessionContext,
        candidate: &NotificationPreference,
    ) -> AppResult<()> {
        self.save_with_timeout(ctx, candidate, self.registration_timeout)
            .await
    }

    /// Saves `candidate`, bounding the registration step by `timeout`.
    ///
    /// Enabling requires a granted push registration for the session's
    /// device; on denial, failure, or timeout nothing is written and the
    /// previously stored preference stays authoritative. Disabling never
    /// touches the registrar. A successful save replaces the stored
    /// preference entirely.
    pub async fn save_with_timeout(
        &self,
        ctx: &SessionContext,
        candidate: &NotificationPreference,
        timeout: Duration,
    ) -> AppResult<()> {
        candidate.validate()?;

        if candidate.enabled {
            let registration = self.ensure_registration(ctx, timeout).await?;
            debug!(
                user_id = %ctx.user_id,
                device_id = %registration.device.device_id,
                "Push registration confirmed"
            );
        }

        let document = serde_json::to_string(&PreferenceDocument::from(candidate))?;
        self.store.put(&ctx.user_id, &document).await?;

        info!(
            user_id = %ctx.user_id,
            enabled = candidate.enabled,
            window = %candidate.active_window,
            days = candidate.active_days.len(),
            slots = candidate.active_time_slots.len(),
            "Notification preference saved"
        );
        Ok(())
    }

    /// Validates a wire document and saves it. Returns the normalized
    /// preference that was persisted.
    pub async fn save_document(
        &self,
        ctx: &SessionContext,
        document: PreferenceDocument,
    ) -> AppResult<NotificationPreference> {
        let candidate = NotificationPreference::try_from(document)?;
        self.save(ctx, &candidate).await?;
        Ok(candidate)
    }

    /// Turns notifications off while keeping the rest of the schedule.
    pub async fn disable(&self, ctx: &SessionContext) -> AppResult<NotificationPreference> {
        let disabled = self.load(&ctx.user_id).await?.disabled();
        self.save(ctx, &disabled).await?;
        Ok(disabled)
    }

    /// Whether `preference` allows a notification at `instant` in `timezone`.
    pub fn is_eligible_at(
        preference: &NotificationPreference,
        instant: DateTime<Utc>,
        timezone: Tz,
    ) -> bool {
        eligibility::is_eligible_at(preference, instant, timezone)
    }

    /// Whether `preference` allows a notification right now on the session's device.
    pub fn is_eligible_now(
        &self,
        preference: &NotificationPreference,
        ctx: &SessionContext,
    ) -> bool {
        eligibility::is_eligible_at(preference, self.clock.now(), ctx.timezone)
    }

    /// The next instant, from now, at which `preference` allows a
    /// notification on the session's device.
    pub fn next_eligible(
        &self,
        preference: &NotificationPreference,
        ctx: &SessionContext,
    ) -> Option<DateTime<Utc>> {
        eligibility::next_eligible_at(preference, self.clock.now(), ctx.timezone)
    }

    /// Obtain or confirm a registration for the session's device.
    async fn ensure_registration(
        &self,
        ctx: &SessionContext,
        timeout: Duration,
    ) -> AppResult<PushRegistration> {
        let attempt = self.registrar.register_device(&ctx.user_id, &ctx.device);

        match tokio::time::timeout(timeout, attempt).await {
            Err(_) => {
                warn!(
                    user_id = %ctx.user_id,
                    device_id = %ctx.device.device_id,
                    timeout_ms = timeout.as_millis() as u64,
                    "Push registration timed out"
                );
                Err(AppError::registration_timeout(format!(
                    "Push registration did not complete within {} ms",
                    timeout.as_millis()
                )))
            }
            Ok(Err(e)) if e.kind == ErrorKind::RegistrationTimeout => Err(e),
            Ok(Err(e)) => {
                warn!(user_id = %ctx.user_id, error = %e, "Push registration failed");
                Err(AppError::with_source(
                    ErrorKind::RegistrationDenied,
                    "Push registration failed",
                    e,
                ))
            }
            Ok(Ok(RegistrationOutcome::Denied { reason })) => {
                warn!(user_id = %ctx.user_id, %reason, "Push registration denied");
                Err(AppError::registration_denied(reason))
            }
            Ok(Ok(RegistrationOutcome::Granted(registration))) => Ok(registration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use motivator_core::types::device::{DeviceInfo, Platform};
    use motivator_core::types::id::DeviceId;
    use motivator_entity::notification::{ActiveWindow, TimeOfDay, TimeSlot, Weekday};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::clock::FixedClock;

    #[derive(Debug, Default)]
    struct MapStore {
        docs: Mutex<HashMap<UserId, String>>,
        down: bool,
    }

    #[async_trait]
    impl PreferenceStore for MapStore {
        fn provider_type(&self) -> &str {
            "map"
        }

        async fn get(&self, user_id: &UserId) -> AppResult<Option<String>> {
            if self.down {
                return Err(AppError::store_unavailable("down"));
            }
            Ok(self.docs.lock().unwrap().get(user_id).cloned())
        }

        async fn put(&self, user_id: &UserId, document: &str) -> AppResult<()> {
            if self.down {
                return Err(AppError::store_unavailable("down"));
            }
            self.docs
                .lock()
                .unwrap()
                .insert(user_id.clone(), document.to_string());
            Ok(())
        }

        async fn delete(&self, user_id: &UserId) -> AppResult<bool> {
            Ok(self.docs.lock().unwrap().remove(user_id).is_some())
        }

        async fn list_users(&self) -> AppResult<Vec<UserId>> {
            Ok(self.docs.lock().unwrap().keys().cloned().collect())
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(!self.down)
        }
    }

    #[derive(Debug)]
    struct CountingRegistrar {
        grant: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PushRegistrar for CountingRegistrar {
        fn provider_type(&self) -> &str {
            "counting"
        }

        async fn register_device(
            &self,
            user_id: &UserId,
            device: &DeviceInfo,
        ) -> AppResult<RegistrationOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.grant {
                return Ok(RegistrationOutcome::Denied {
                    reason: "nope".to_string(),
                });
            }
            Ok(RegistrationOutcome::Granted(PushRegistration {
                token: "tok".to_string(),
                user_id: user_id.clone(),
                device: device.clone(),
                issued_at: Utc::now(),
            }))
        }
    }

    #[derive(Debug)]
    struct FailingRegistrar {
        kind: ErrorKind,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PushRegistrar for FailingRegistrar {
        fn provider_type(&self) -> &str {
            "failing"
        }

        async fn register_device(
            &self,
            _user_id: &UserId,
            _device: &DeviceInfo,
        ) -> AppResult<RegistrationOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::new(self.kind, "registrar unreachable"))
        }
    }

    /// Stores a disabled preference, then tries to enable it against a
    /// registrar that fails with `kind`.
    async fn enable_against_failing_registrar(
        kind: ErrorKind,
    ) -> (AppError, Arc<MapStore>, usize) {
        let store = Arc::new(MapStore::default());
        let registrar = Arc::new(FailingRegistrar {
            kind,
            calls: AtomicUsize::new(0),
        });
        let manager = NotificationPreferenceManager::new(
            store.clone(),
            registrar.clone(),
            Arc::new(FixedClock::new(Utc::now())),
            Duration::from_secs(1),
        );

        manager.save(&ctx(), &weekday_mornings(false)).await.unwrap();
        let err = manager
            .save(&ctx(), &weekday_mornings(true))
            .await
            .unwrap_err();

        (err, store, registrar.calls.load(Ordering::SeqCst))
    }

    fn build(
        store: Arc<MapStore>,
        grant: bool,
    ) -> (NotificationPreferenceManager, Arc<CountingRegistrar>) {
        let registrar = Arc::new(CountingRegistrar {
            grant,
            calls: AtomicUsize::new(0),
        });
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let manager = NotificationPreferenceManager::new(
            store,
            registrar.clone(),
            clock,
            Duration::from_secs(1),
        );
        (manager, registrar)
    }

    fn ctx() -> SessionContext {
        SessionContext::new(
            UserId::new("u1").unwrap(),
            DeviceInfo::physical(DeviceId::new("d1").unwrap(), Platform::Ios),
            Tz::UTC,
        )
    }

    fn weekday_mornings(enabled: bool) -> NotificationPreference {
        NotificationPreference {
            enabled,
            active_window: ActiveWindow::new(
                TimeOfDay::new(7, 0).unwrap(),
                TimeOfDay::new(11, 30).unwrap(),
            ),
            active_days: [Weekday::Monday, Weekday::Thursday].into_iter().collect(),
            active_time_slots: [TimeSlot::Morning].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_disable_skips_registrar() {
        let store = Arc::new(MapStore::default());
        let (manager, registrar) = build(store.clone(), false);

        manager.save(&ctx(), &weekday_mornings(false)).await.unwrap();

        assert_eq!(registrar.calls.load(Ordering::SeqCst), 0);
        assert_eq!(manager.load(&ctx().user_id).await.unwrap(), weekday_mornings(false));
    }

    #[tokio::test]
    async fn test_enable_calls_registrar_once() {
        let store = Arc::new(MapStore::default());
        let (manager, registrar) = build(store, true);

        manager.save(&ctx(), &weekday_mornings(true)).await.unwrap();

        assert_eq!(registrar.calls.load(Ordering::SeqCst), 1);
        assert!(manager.load(&ctx().user_id).await.unwrap().enabled);
    }

    #[tokio::test]
    async fn test_invalid_time_not_persisted() {
        let store = Arc::new(MapStore::default());
        let (manager, registrar) = build(store.clone(), true);

        let mut candidate = weekday_mornings(true);
        candidate.active_window.start = TimeOfDay { hour: 7, minute: 75 };

        let err = manager.save(&ctx(), &candidate).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTimeValue);
        assert_eq!(registrar.calls.load(Ordering::SeqCst), 0);
        assert!(store.docs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_or_default_when_store_down() {
        let store = Arc::new(MapStore {
            down: true,
            ..MapStore::default()
        });
        let (manager, _) = build(store, true);

        let err = manager.load(&ctx().user_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let fallback = manager.load_or_default(&ctx().user_id).await.unwrap();
        assert_eq!(fallback, NotificationPreference::default());
    }

    #[tokio::test]
    async fn test_save_surfaces_store_unavailable() {
        let store = Arc::new(MapStore {
            down: true,
            ..MapStore::default()
        });
        let (manager, _) = build(store, true);

        let err = manager.save(&ctx(), &weekday_mornings(false)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_registrar_failure_is_denial() {
        let (err, store, calls) =
            enable_against_failing_registrar(ErrorKind::ExternalService).await;

        assert_eq!(err.kind, ErrorKind::RegistrationDenied);
        assert!(!err.is_retryable());
        assert!(err.source.is_some());
        assert_eq!(calls, 1);

        let (manager, _) = build(store, false);
        assert_eq!(
            manager.load(&ctx().user_id).await.unwrap(),
            weekday_mornings(false)
        );
    }

    #[tokio::test]
    async fn test_registrar_timeout_passes_through() {
        let (err, store, calls) =
            enable_against_failing_registrar(ErrorKind::RegistrationTimeout).await;

        assert_eq!(err.kind, ErrorKind::RegistrationTimeout);
        assert!(err.is_retryable());
        assert_eq!(calls, 1);

        let (manager, _) = build(store, false);
        assert!(!manager.load(&ctx().user_id).await.unwrap().enabled);
    }
}
