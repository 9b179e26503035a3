use crate::session::store::{keys, StorageBackend, SCRATCH_KEYS};
use serde::Serialize;
use shared::models::{LoginResponse, Perfil, Tienda, Usuario};
use std::cell::Cell;

/// Sessions expire 60 minutes after issuance, absolute, not sliding.
pub const SESSION_TTL_MS: i64 = 60 * 60 * 1000;

/// The in-memory session mirrored to persisted storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque bearer credential sent on every backend call.
    pub access_token: String,

    /// Refresh token. Persisted for compatibility; no renewal flow exists.
    pub refresh_token: Option<String>,

    /// The authenticated user.
    pub user: Usuario,

    /// The worker profile tied to the user.
    pub profile: Perfil,

    /// Issuance time, milliseconds since epoch.
    pub issued_at: i64,

    /// The store the user operates against. Picked after login; a session
    /// is authenticated even while this is unset.
    pub selected_store: Option<Tienda>,
}

impl Session {
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.issued_at
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.age_ms(now_ms) > SESSION_TTL_MS
    }

    /// Time left before expiry, clamped at zero.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (SESSION_TTL_MS - self.age_ms(now_ms)).max(0)
    }
}

/// Outcome of reading the persisted store at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum Hydrated {
    /// A usable session was restored.
    Active(Session),
    /// A session existed but its TTL had elapsed; storage has been cleared.
    Expired,
    /// Nothing usable was stored. Malformed state lands here too.
    Absent,
}

/// Single source of truth for the persisted session.
///
/// All reads and writes of session and scratch keys go through this type.
/// Every operation takes the current time explicitly so the state machine
/// runs unchanged under native tests.
#[derive(Debug)]
pub struct SessionManager<S: StorageBackend> {
    storage: S,
    generation: Cell<u64>,
}

impl<S: StorageBackend> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            generation: Cell::new(0),
        }
    }

    /// Current session generation. `login` and `clear` advance it; a
    /// scheduled expiry captures the generation it was armed under and must
    /// no-op once the value has moved on. This is what keeps a stale timer
    /// from wiping a fresh login and makes teardown first-caller-wins.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    fn advance_generation(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    /// Persist a successful login payload and return the new session.
    /// Fully replaces whatever session existed before.
    pub fn login(&self, payload: LoginResponse, now_ms: i64) -> Session {
        self.advance_generation();

        self.storage.write(keys::AUTH_TOKEN, &payload.token);
        self.storage.write(keys::REFRESH_TOKEN, &payload.refresh);
        self.write_json(keys::USER_DATA, &payload.user);
        self.write_json(keys::USER_PROFILE, &payload.perfil);
        self.storage
            .write(keys::TOKEN_TIMESTAMP, &now_ms.to_string());
        self.storage.delete(keys::SELECTED_STORE);

        Session {
            access_token: payload.token,
            refresh_token: Some(payload.refresh),
            user: payload.user,
            profile: payload.perfil,
            issued_at: now_ms,
            selected_store: None,
        }
    }

    /// Restore a session from persisted storage.
    ///
    /// Fails closed: a missing required key, an empty token, or any JSON
    /// field that does not parse clears whatever partial state exists and
    /// reports [`Hydrated::Absent`] without surfacing an error.
    pub fn hydrate(&self, now_ms: i64) -> Hydrated {
        let token = self.storage.read(keys::AUTH_TOKEN);
        let user_raw = self.storage.read(keys::USER_DATA);
        let profile_raw = self.storage.read(keys::USER_PROFILE);
        let stamp_raw = self.storage.read(keys::TOKEN_TIMESTAMP);

        let (Some(token), Some(user_raw), Some(profile_raw), Some(stamp_raw)) =
            (token, user_raw, profile_raw, stamp_raw)
        else {
            self.clear();
            return Hydrated::Absent;
        };

        if token.is_empty() {
            self.clear();
            return Hydrated::Absent;
        }

        let Ok(issued_at) = stamp_raw.parse::<i64>() else {
            log::warn!("stored token timestamp is not an integer; discarding session");
            self.clear();
            return Hydrated::Absent;
        };

        let Ok(user) = serde_json::from_str::<Usuario>(&user_raw) else {
            log::warn!("stored user data is not valid JSON; discarding session");
            self.clear();
            return Hydrated::Absent;
        };

        let Ok(profile) = serde_json::from_str::<Perfil>(&profile_raw) else {
            log::warn!("stored profile is not valid JSON; discarding session");
            self.clear();
            return Hydrated::Absent;
        };

        let selected_store = match self.storage.read(keys::SELECTED_STORE) {
            None => None,
            Some(raw) => match serde_json::from_str::<Tienda>(&raw) {
                Ok(tienda) => Some(tienda),
                Err(_) => {
                    log::warn!("stored selected store is not valid JSON; discarding session");
                    self.clear();
                    return Hydrated::Absent;
                }
            },
        };

        if now_ms - issued_at > SESSION_TTL_MS {
            self.clear();
            return Hydrated::Expired;
        }

        Hydrated::Active(Session {
            access_token: token,
            refresh_token: self.storage.read(keys::REFRESH_TOKEN),
            user,
            profile,
            issued_at,
            selected_store,
        })
    }

    /// Persist the chosen store. The only session field mutable after login.
    pub fn select_store(&self, tienda: &Tienda) {
        self.write_json(keys::SELECTED_STORE, tienda);
    }

    /// Teardown: drop every persisted session field and all registered
    /// scratch values. Idempotent; advances the generation so any expiry
    /// callback armed before the call goes stale.
    pub fn clear(&self) {
        self.advance_generation();
        for key in [
            keys::AUTH_TOKEN,
            keys::REFRESH_TOKEN,
            keys::USER_DATA,
            keys::USER_PROFILE,
            keys::TOKEN_TIMESTAMP,
            keys::SELECTED_STORE,
        ] {
            self.storage.delete(key);
        }
        for key in SCRATCH_KEYS {
            self.storage.delete(key);
        }
    }

    /// Watchdog re-check against the persisted timestamp, independent of the
    /// in-memory session. A missing or unreadable timestamp counts as
    /// expired: some other actor already tore the session down.
    pub fn expired_in_storage(&self, now_ms: i64) -> bool {
        match self
            .storage
            .read(keys::TOKEN_TIMESTAMP)
            .and_then(|raw| raw.parse::<i64>().ok())
        {
            Some(issued_at) => now_ms - issued_at > SESSION_TTL_MS,
            None => true,
        }
    }

    /// Read a per-feature scratch value. Only registered keys are served, so
    /// pages cannot reach session fields through this path.
    pub fn scratch_read(&self, key: &str) -> Option<String> {
        if !SCRATCH_KEYS.contains(&key) {
            log::warn!("scratch read of unregistered key {key} ignored");
            return None;
        }
        self.storage.read(key)
    }

    /// Write a per-feature scratch value under a registered key.
    pub fn scratch_write(&self, key: &str, value: &str) {
        if !SCRATCH_KEYS.contains(&key) {
            log::warn!("scratch write to unregistered key {key} ignored");
            return;
        }
        self.storage.write(key, value);
    }

    /// Drop a per-feature scratch value.
    pub fn scratch_delete(&self, key: &str) {
        if SCRATCH_KEYS.contains(&key) {
            self.storage.delete(key);
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.write(key, &json),
            Err(err) => log::error!("failed to serialize value for key {key}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::testing::MemoryStorage;
    use shared::models::RolUsuario;

    const NOW: i64 = 1_750_000_000_000;
    const MINUTE_MS: i64 = 60 * 1000;

    fn login_payload() -> LoginResponse {
        LoginResponse {
            token: "tok-abc".to_string(),
            refresh: "ref-xyz".to_string(),
            user: Usuario {
                id: 7,
                nombre: "Marta Rojas".to_string(),
                email: "marta@cartera.test".to_string(),
                rol: RolUsuario::Cobrador,
            },
            perfil: Perfil {
                id: 3,
                usuario_id: 7,
                nombre: "Marta Rojas".to_string(),
                documento: "1023456789".to_string(),
                telefono: "3001234567".to_string(),
            },
        }
    }

    fn tienda() -> Tienda {
        Tienda {
            id: 2,
            nombre: "Sucursal Centro".to_string(),
            direccion: "Calle 10 #4-21".to_string(),
        }
    }

    fn manager() -> SessionManager<MemoryStorage> {
        SessionManager::new(MemoryStorage::new())
    }

    #[test]
    fn login_roundtrip() {
        let manager = manager();
        let payload = login_payload();
        let session = manager.login(payload.clone(), NOW);

        assert_eq!(session.access_token, payload.token);
        assert_eq!(session.user, payload.user);
        assert_eq!(session.profile, payload.perfil);
        assert_eq!(session.issued_at, NOW);
        assert!(session.selected_store.is_none());
        assert!(!session.access_token.is_empty());
    }

    #[test]
    fn hydrate_restores_persisted_session() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        match manager.hydrate(NOW + MINUTE_MS) {
            Hydrated::Active(session) => {
                assert_eq!(session.access_token, "tok-abc");
                assert_eq!(session.refresh_token.as_deref(), Some("ref-xyz"));
                assert_eq!(session.issued_at, NOW);
            }
            other => panic!("expected active session, got {other:?}"),
        }
    }

    #[test]
    fn hydrate_fifty_nine_minutes_old_is_active() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        assert!(matches!(
            manager.hydrate(NOW + 59 * MINUTE_MS),
            Hydrated::Active(_)
        ));
    }

    #[test]
    fn hydrate_sixty_one_minutes_old_is_expired_and_cleared() {
        let manager = manager();
        manager.login(login_payload(), NOW);
        manager.scratch_write("abono", "{\"credito_id\":4,\"valor\":2500.0}");

        assert_eq!(manager.hydrate(NOW + 61 * MINUTE_MS), Hydrated::Expired);

        // Everything persisted must be gone, a second pass finds nothing.
        assert_eq!(manager.hydrate(NOW + 61 * MINUTE_MS), Hydrated::Absent);
        assert!(manager.scratch_read("abono").is_none());
    }

    #[test]
    fn hydrate_exactly_at_ttl_is_still_active() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        match manager.hydrate(NOW + SESSION_TTL_MS) {
            Hydrated::Active(session) => assert_eq!(session.remaining_ms(NOW + SESSION_TTL_MS), 0),
            other => panic!("expected active session, got {other:?}"),
        }
    }

    #[test]
    fn hydrate_empty_storage_is_absent() {
        assert_eq!(manager().hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn hydrate_missing_required_key_clears_partial_state() {
        let storage = MemoryStorage::new();
        storage.write(keys::AUTH_TOKEN, "tok-abc");
        storage.write(keys::TOKEN_TIMESTAMP, &NOW.to_string());

        let manager = SessionManager::new(storage);
        assert_eq!(manager.hydrate(NOW), Hydrated::Absent);
        // The partial fields were wiped, not left behind.
        assert!(manager.expired_in_storage(NOW));
    }

    #[test]
    fn hydrate_corrupt_user_data_fails_closed() {
        // Corrupt only the user blob; every other key stays valid.
        let storage = MemoryStorage::new();
        storage.write(keys::AUTH_TOKEN, "tok-abc");
        storage.write(keys::REFRESH_TOKEN, "ref-xyz");
        storage.write(keys::USER_DATA, "{not json");
        storage.write(
            keys::USER_PROFILE,
            &serde_json::to_string(&login_payload().perfil).unwrap(),
        );
        storage.write(keys::TOKEN_TIMESTAMP, &NOW.to_string());

        let corrupted = SessionManager::new(storage);
        assert_eq!(corrupted.hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn hydrate_corrupt_timestamp_fails_closed() {
        let storage = MemoryStorage::new();
        storage.write(keys::AUTH_TOKEN, "tok-abc");
        storage.write(
            keys::USER_DATA,
            &serde_json::to_string(&login_payload().user).unwrap(),
        );
        storage.write(
            keys::USER_PROFILE,
            &serde_json::to_string(&login_payload().perfil).unwrap(),
        );
        storage.write(keys::TOKEN_TIMESTAMP, "ayer");

        let corrupted = SessionManager::new(storage);
        assert_eq!(corrupted.hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn hydrate_empty_token_is_absent() {
        let storage = MemoryStorage::new();
        storage.write(keys::AUTH_TOKEN, "");
        storage.write(
            keys::USER_DATA,
            &serde_json::to_string(&login_payload().user).unwrap(),
        );
        storage.write(
            keys::USER_PROFILE,
            &serde_json::to_string(&login_payload().perfil).unwrap(),
        );
        storage.write(keys::TOKEN_TIMESTAMP, &NOW.to_string());

        let manager = SessionManager::new(storage);
        assert_eq!(manager.hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn selected_store_survives_rehydration() {
        let manager = manager();
        manager.login(login_payload(), NOW);
        manager.select_store(&tienda());

        match manager.hydrate(NOW + MINUTE_MS) {
            Hydrated::Active(session) => assert_eq!(session.selected_store, Some(tienda())),
            other => panic!("expected active session, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_selected_store_fails_closed() {
        let manager = manager();
        manager.login(login_payload(), NOW);
        // Store selection is a JSON field; if it rots, the whole session goes.
        manager.write_json(keys::SELECTED_STORE, &"no-es-una-tienda");
        // A bare string parses as JSON but not as a Tienda.
        assert_eq!(manager.hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn logout_is_idempotent_and_final() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        manager.clear();
        manager.clear();
        assert_eq!(manager.hydrate(NOW), Hydrated::Absent);
    }

    #[test]
    fn new_login_replaces_previous_session() {
        let manager = manager();
        manager.login(login_payload(), NOW);
        manager.select_store(&tienda());

        let mut second = login_payload();
        second.token = "tok-new".to_string();
        let session = manager.login(second, NOW + MINUTE_MS);

        assert_eq!(session.access_token, "tok-new");
        // The previous store selection does not leak into the new session.
        match manager.hydrate(NOW + MINUTE_MS) {
            Hydrated::Active(restored) => {
                assert_eq!(restored.access_token, "tok-new");
                assert!(restored.selected_store.is_none());
            }
            other => panic!("expected active session, got {other:?}"),
        }
    }

    #[test]
    fn generation_goes_stale_after_login_and_clear() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        let armed_at = manager.generation();
        manager.login(login_payload(), NOW + MINUTE_MS);
        assert_ne!(manager.generation(), armed_at);

        let armed_again = manager.generation();
        manager.clear();
        assert_ne!(manager.generation(), armed_again);
    }

    #[test]
    fn watchdog_reads_storage_not_memory() {
        let manager = manager();
        manager.login(login_payload(), NOW);

        assert!(!manager.expired_in_storage(NOW + 59 * MINUTE_MS));
        assert!(manager.expired_in_storage(NOW + 61 * MINUTE_MS));

        manager.clear();
        // With the timestamp gone the watchdog treats the session as dead.
        assert!(manager.expired_in_storage(NOW));
    }

    #[test]
    fn scratch_api_rejects_unregistered_keys() {
        let manager = manager();
        manager.scratch_write(keys::AUTH_TOKEN, "tok-evil");
        assert!(manager.scratch_read(keys::AUTH_TOKEN).is_none());
        assert_eq!(manager.hydrate(NOW), Hydrated::Absent);

        manager.scratch_write("liquidarFecha", "2026-08-20");
        assert_eq!(
            manager.scratch_read("liquidarFecha").as_deref(),
            Some("2026-08-20")
        );
        manager.scratch_delete("liquidarFecha");
        assert!(manager.scratch_read("liquidarFecha").is_none());
    }

    #[test]
    fn session_ttl_math() {
        let session = Session {
            access_token: "tok".to_string(),
            refresh_token: None,
            user: login_payload().user,
            profile: login_payload().perfil,
            issued_at: NOW,
            selected_store: None,
        };

        assert!(!session.is_expired(NOW + SESSION_TTL_MS));
        assert!(session.is_expired(NOW + SESSION_TTL_MS + 1));
        assert_eq!(session.remaining_ms(NOW), SESSION_TTL_MS);
        assert_eq!(session.remaining_ms(NOW + SESSION_TTL_MS + MINUTE_MS), 0);
    }
}
