use crate::api::CarteraClient;
use crate::routes::Route;
use crate::session::manager::{Hydrated, Session, SessionManager, SESSION_TTL_MS};
use crate::session::store::BrowserStorage;
use gloo_timers::callback::{Interval, Timeout};
use shared::models::{LoginResponse, Perfil, Tienda, Usuario};
use std::cell::RefCell;
use std::rc::Rc;
use yew::{
    function_component, html, use_effect_with, use_memo, use_mut_ref, use_state, Callback,
    Children, ContextProvider, Html, Properties, UseStateHandle,
};
use yew_router::hooks::{use_navigator, use_route};
use yew_router::navigator::Navigator;

/// Backstop poll period. Background tabs can delay or drop the one-shot
/// expiry timer; this bounds how long a dead session can appear valid.
const WATCHDOG_PERIOD_MS: u32 = 60_000;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// What consumers observe: `loading` is true only during the initial
/// hydrate-from-storage pass, and flips exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub session: Option<Session>,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }
}

#[derive(Default)]
struct ExpiryTimers {
    timeout: Option<Timeout>,
    interval: Option<Interval>,
}

impl ExpiryTimers {
    // Dropping the handles clears the underlying browser timers.
    fn cancel(&mut self) {
        self.timeout = None;
        self.interval = None;
    }
}

type Manager = SessionManager<BrowserStorage>;

fn teardown(
    manager: &Manager,
    timers: &Rc<RefCell<ExpiryTimers>>,
    snapshot: &UseStateHandle<SessionSnapshot>,
    navigator: Option<&Navigator>,
) {
    manager.clear();
    timers.borrow_mut().cancel();
    CarteraClient::shared().set_token(None);
    snapshot.set(SessionSnapshot {
        loading: false,
        session: None,
    });
    if let Some(nav) = navigator {
        nav.push(&Route::Login);
    }
}

/// Arm the one-shot expiry timer plus the watchdog interval. Both capture
/// the manager generation at arming time and no-op once it moves on, so a
/// stale timer cannot wipe a later login and only the first firing path
/// performs teardown.
fn arm_expiry(
    manager: Rc<Manager>,
    timers: Rc<RefCell<ExpiryTimers>>,
    snapshot: UseStateHandle<SessionSnapshot>,
    navigator: Option<Navigator>,
    remaining_ms: i64,
) {
    let armed_generation = manager.generation();
    let delay = u32::try_from(remaining_ms.max(0)).unwrap_or(u32::MAX);

    let timeout = {
        let manager = manager.clone();
        let timers = timers.clone();
        let snapshot = snapshot.clone();
        let navigator = navigator.clone();
        Timeout::new(delay, move || {
            if manager.generation() == armed_generation {
                teardown(&manager, &timers, &snapshot, navigator.as_ref());
            }
        })
    };

    let interval = {
        let manager_handle = manager.clone();
        let timers_handle = timers.clone();
        Interval::new(WATCHDOG_PERIOD_MS, move || {
            if manager_handle.generation() == armed_generation
                && manager_handle.expired_in_storage(now_ms())
            {
                teardown(&manager_handle, &timers_handle, &snapshot, navigator.as_ref());
            }
        })
    };

    let mut guard = timers.borrow_mut();
    guard.timeout = Some(timeout);
    guard.interval = Some(interval);
}

/// Capability handed to every page through context: session reads plus the
/// three mutation operations and the registered-scratch passthrough.
#[derive(Clone)]
pub struct SessionHandle {
    snapshot: SessionSnapshot,
    manager: Rc<Manager>,
    on_login: Callback<LoginResponse>,
    on_logout: Callback<()>,
    on_select_store: Callback<Tienda>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot && Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl SessionHandle {
    /// True only during the initial hydrate-from-storage pass.
    pub fn loading(&self) -> bool {
        self.snapshot.loading
    }

    /// A session with a non-empty access token is authenticated. Says
    /// nothing about store selection.
    pub fn is_authenticated(&self) -> bool {
        self.snapshot
            .session
            .as_ref()
            .is_some_and(|session| !session.access_token.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.snapshot
            .session
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    pub fn user(&self) -> Option<Usuario> {
        self.snapshot.session.as_ref().map(|s| s.user.clone())
    }

    pub fn profile(&self) -> Option<Perfil> {
        self.snapshot.session.as_ref().map(|s| s.profile.clone())
    }

    pub fn selected_store(&self) -> Option<Tienda> {
        self.snapshot
            .session
            .as_ref()
            .and_then(|s| s.selected_store.clone())
    }

    /// Install a fresh session from a successful login payload.
    pub fn login(&self, payload: LoginResponse) {
        self.on_login.emit(payload);
    }

    /// Tear the session down. Safe to call when already logged out.
    pub fn logout(&self) {
        self.on_logout.emit(());
    }

    /// Persist the chosen store for the rest of the session.
    pub fn select_store(&self, tienda: Tienda) {
        self.on_select_store.emit(tienda);
    }

    pub fn scratch_read(&self, key: &str) -> Option<String> {
        self.manager.scratch_read(key)
    }

    pub fn scratch_write(&self, key: &str, value: &str) {
        self.manager.scratch_write(key, value);
    }

    pub fn scratch_delete(&self, key: &str) {
        self.manager.scratch_delete(key);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

/// Owns the session for the whole application. Must sit inside the router
/// so teardown can navigate to the login route.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let snapshot = use_state(SessionSnapshot::default);
    let manager: Rc<Manager> = use_memo((), |_| SessionManager::new(BrowserStorage));
    let timers = use_mut_ref(ExpiryTimers::default);
    let navigator = use_navigator();
    let route = use_route::<Route>();

    {
        let snapshot = snapshot.clone();
        let manager = manager.clone();
        let timers = timers.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            let now = now_ms();
            match manager.hydrate(now) {
                Hydrated::Active(session) => {
                    CarteraClient::shared().set_token(Some(session.access_token.clone()));
                    arm_expiry(
                        manager.clone(),
                        timers.clone(),
                        snapshot.clone(),
                        navigator.clone(),
                        session.remaining_ms(now),
                    );
                    snapshot.set(SessionSnapshot {
                        loading: false,
                        session: Some(session),
                    });
                }
                Hydrated::Expired => {
                    snapshot.set(SessionSnapshot {
                        loading: false,
                        session: None,
                    });
                    if route != Some(Route::Login) {
                        if let Some(nav) = navigator.as_ref() {
                            nav.push(&Route::Login);
                        }
                    }
                }
                Hydrated::Absent => {
                    snapshot.set(SessionSnapshot {
                        loading: false,
                        session: None,
                    });
                }
            }

            move || {
                timers.borrow_mut().cancel();
            }
        });
    }

    let on_login = {
        let snapshot = snapshot.clone();
        let manager = manager.clone();
        let timers = timers.clone();
        let navigator = navigator.clone();
        Callback::from(move |payload: LoginResponse| {
            let session = manager.login(payload, now_ms());
            CarteraClient::shared().set_token(Some(session.access_token.clone()));
            arm_expiry(
                manager.clone(),
                timers.clone(),
                snapshot.clone(),
                navigator.clone(),
                SESSION_TTL_MS,
            );
            snapshot.set(SessionSnapshot {
                loading: false,
                session: Some(session),
            });
        })
    };

    let on_logout = {
        let snapshot = snapshot.clone();
        let manager = manager.clone();
        let timers = timers.clone();
        let navigator = navigator.clone();
        Callback::from(move |()| {
            teardown(&manager, &timers, &snapshot, navigator.as_ref());
        })
    };

    let on_select_store = {
        let snapshot = snapshot.clone();
        let manager = manager.clone();
        Callback::from(move |tienda: Tienda| {
            manager.select_store(&tienda);
            if let Some(session) = (*snapshot).session.clone() {
                snapshot.set(SessionSnapshot {
                    loading: false,
                    session: Some(Session {
                        selected_store: Some(tienda),
                        ..session
                    }),
                });
            }
        })
    };

    let handle = SessionHandle {
        snapshot: (*snapshot).clone(),
        manager,
        on_login,
        on_logout,
        on_select_store,
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}
