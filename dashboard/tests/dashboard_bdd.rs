//! Behavioural tests for the dashboard state core.
//!
//! Scenarios drive [`AppContext`] end to end with an in-memory session slot
//! and a login service that answers immediately.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::{Arc, Mutex, MutexGuard};

use dashboard::domain::ports::{
    FixtureLoginService, ImmediateSleeper, SequentialIdGenerator, SessionSlot,
};
use dashboard::domain::{
    EmailAddress, Error, ErrorCode, LoginCredentials, ProjectId, ProjectStatus, Registration,
    UserRole,
};
use dashboard::outbound::session_slot::InMemorySessionSlot;
use dashboard::{AppContext, DashboardSettings, ProjectTab};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

const LOGIN_EMAIL: &str = "jo@example.com";
const SITE_REVAMP: &str = "Site Revamp";

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

/// Wrapper for the non-Clone runtime.
#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

/// Wrapper for the non-Clone context.
#[derive(Clone)]
struct ContextHandle(Arc<Mutex<AppContext>>);

#[derive(Default, ScenarioState)]
struct World {
    runtime: Slot<RuntimeHandle>,
    context: Slot<ContextHandle>,
    slot: Slot<Arc<InMemorySessionSlot>>,
    last_error: Slot<Error>,
    project_id: Slot<ProjectId>,
}

impl World {
    fn start(&self, login: FixtureLoginService) {
        let runtime = Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("create runtime");
        let slot = Arc::new(InMemorySessionSlot::new());
        let context = AppContext::with_ports(
            &DashboardSettings::default(),
            Arc::new(login),
            Arc::clone(&slot) as Arc<dyn SessionSlot>,
            Arc::new(SequentialIdGenerator::starting_at(1)),
            Arc::new(DefaultClock),
        )
        .expect("context builds");

        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.slot.set(slot);
        self.context.set(ContextHandle(Arc::new(Mutex::new(context))));
    }

    fn runtime(&self) -> Arc<Runtime> {
        self.runtime.get().expect("runtime should be set").0
    }

    fn context(&self) -> Arc<Mutex<AppContext>> {
        self.context.get().expect("context should be set").0
    }

    fn slot(&self) -> Arc<InMemorySessionSlot> {
        self.slot.get().expect("slot should be set")
    }

    fn with_context<T>(&self, f: impl FnOnce(&mut AppContext) -> T) -> T {
        let context = self.context();
        let mut guard: MutexGuard<'_, AppContext> = context.lock().expect("context lock");
        f(&mut guard)
    }

    fn register(&self, role: &str) {
        let registration = Registration::try_new(
            "Grace Hopper",
            "grace@example.com",
            "secret1",
            Some(role),
            vec!["Design".to_owned()],
        )
        .expect("registration");
        let runtime = self.runtime();
        self.with_context(|context| {
            runtime
                .block_on(context.register(&registration))
                .expect("registration succeeds");
        });
    }
}

fn login_service() -> FixtureLoginService {
    FixtureLoginService::new(
        Arc::new(ImmediateSleeper),
        Arc::new(SequentialIdGenerator::starting_at(1_000)),
    )
}

#[fixture]
fn world() -> World {
    World::default()
}

// -----------------------------------------------------------------------------
// Given steps
// -----------------------------------------------------------------------------

#[given("a signed-out dashboard")]
fn a_signed_out_dashboard(world: &World) {
    world.start(login_service());
}

#[given("a signed-in {role}")]
fn a_signed_in_user(world: &World, role: String) {
    world.start(login_service());
    world.register(&role);
}

#[given("a dashboard whose identity service rejects logins")]
fn a_dashboard_rejecting_logins(world: &World) {
    let email = EmailAddress::new(LOGIN_EMAIL).expect("email");
    world.start(login_service().reject(&email));
}

// -----------------------------------------------------------------------------
// When steps
// -----------------------------------------------------------------------------

#[when("a client registers")]
fn a_client_registers(world: &World) {
    world.register("client");
}

#[when("the user logs in")]
fn the_user_logs_in(world: &World) {
    let credentials = LoginCredentials::try_from_parts(LOGIN_EMAIL, "secret1").expect("creds");
    let runtime = world.runtime();
    let result = world.with_context(|context| runtime.block_on(context.login(&credentials)));
    if let Err(err) = result {
        world.last_error.set(err);
    }
}

#[when("the user logs out")]
fn the_user_logs_out(world: &World) {
    world.with_context(AppContext::logout);
}

#[when("the user creates the Site Revamp project")]
fn the_user_creates_site_revamp(world: &World) {
    let result = world.with_context(|context| {
        context
            .create_project(SITE_REVAMP, "Redesign marketing site", ProjectStatus::Active)
            .map(|project| project.id())
    });
    match result {
        Ok(id) => world.project_id.set(id),
        Err(err) => world.last_error.set(err),
    }
}

#[when("the user joins the Site Revamp project twice")]
fn the_user_joins_site_revamp_twice(world: &World) {
    let id = world.project_id.get().expect("project should exist");
    world.with_context(|context| {
        assert!(context.join_project(id).expect("first join"));
        assert!(!context.join_project(id).expect("second join"));
    });
}

#[when("the user opens the Site Revamp project")]
fn the_user_opens_site_revamp(world: &World) {
    let id = world.project_id.get().expect("project should exist");
    world.with_context(|context| context.select_project(Some(id)).expect("select"));
}

// -----------------------------------------------------------------------------
// Then steps
// -----------------------------------------------------------------------------

#[then("the user is signed in as a {role}")]
fn the_user_is_signed_in_as(world: &World, role: String) {
    let expected = UserRole::parse(&role).expect("known role");
    let user = world
        .with_context(|context| context.session().current_user())
        .expect("signed in");
    assert_eq!(user.role(), expected);
}

#[then("the session slot holds the user")]
fn the_session_slot_holds_the_user(world: &World) {
    let user = world
        .with_context(|context| context.session().current_user())
        .expect("signed in");
    let stored = world.slot().load().expect("slot readable");
    assert_eq!(stored, Some(user));
}

#[then("the user is signed out")]
fn the_user_is_signed_out(world: &World) {
    assert!(!world.with_context(|context| context.session().is_authenticated()));
}

#[then("the session slot is empty")]
fn the_session_slot_is_empty(world: &World) {
    assert_eq!(world.slot().raw(), None);
}

#[then("the login fails as unauthorized")]
fn the_login_fails_as_unauthorized(world: &World) {
    let err = world.last_error.get().expect("login should fail");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[then("project creation is forbidden")]
fn project_creation_is_forbidden(world: &World) {
    let err = world.last_error.get().expect("creation should fail");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[then("the catalog lists {count:usize} projects")]
fn the_catalog_lists(world: &World, count: usize) {
    let listed = world.with_context(|context| context.tab(ProjectTab::All).len());
    assert_eq!(listed, count);
}

#[then("the joined tab lists {count:usize} projects")]
fn the_joined_tab_lists(world: &World, count: usize) {
    let listed = world.with_context(|context| context.counts().joined_projects);
    assert_eq!(listed, count);
}

#[then("the matched tab is empty")]
fn the_matched_tab_is_empty(world: &World) {
    assert!(world.with_context(|context| context.tab(ProjectTab::Matched).is_empty()));
}

#[then("the open project is Site Revamp")]
fn the_open_project_is_site_revamp(world: &World) {
    let title = world.with_context(|context| {
        context
            .current_project()
            .map(|project| project.title().to_owned())
    });
    assert_eq!(title.as_deref(), Some(SITE_REVAMP));
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Registering signs the user in"
)]
fn registering_signs_the_user_in(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Logging in yields a contributor"
)]
fn logging_in_yields_a_contributor(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Logging out clears the session"
)]
fn logging_out_clears_the_session(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "A rejected login leaves the user signed out"
)]
fn rejected_login_leaves_the_user_signed_out(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Site Revamp walkthrough"
)]
fn site_revamp_walkthrough(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dashboard.feature",
    name = "Contributors cannot create projects"
)]
fn contributors_cannot_create_projects(world: World) {
    let _ = world;
}
