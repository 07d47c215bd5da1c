//! End-to-end scenarios for the login pipeline: a real scheduler, a delayed
//! service, and the full field-edit → enablement → submit → outcome path.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use formflow_core::login::{AuthToken, LoginError, LoginOutcome};
use formflow_runtime::controller::LoginForm;
use formflow_runtime::reactive::Subscription;
use formflow_runtime::scheduler::Scheduler;
use formflow_runtime::service::{
    FailingLoginService, LoginActions, LoginCompletion, STUB_DELAY, StubLoginService,
};

/// Delayed service that issues `call-N` tokens, so tests can tell which
/// dispatched call produced a delivered outcome.
struct SequencedService {
    scheduler: Scheduler,
    delay: Duration,
    calls: Cell<u32>,
}

impl SequencedService {
    fn new(scheduler: Scheduler, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            calls: Cell::new(0),
        }
    }
}

impl LoginActions for SequencedService {
    fn login(&self, _email: &str, _password: &str, done: LoginCompletion) {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        self.scheduler.schedule_after(self.delay, move || {
            done(Ok(AuthToken::new(format!("call-{call}"))));
        });
    }
}

fn watch_outcomes(form: &LoginForm) -> (Rc<RefCell<Vec<LoginOutcome>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);
    let guard = form
        .outcomes()
        .subscribe(move |o: &LoginOutcome| seen_clone.borrow_mut().push(o.clone()));
    (seen, guard)
}

fn watch_loading(form: &LoginForm) -> (Rc<RefCell<Vec<bool>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);
    let guard = form
        .loading()
        .subscribe(move |v: &bool| seen_clone.borrow_mut().push(*v));
    (seen, guard)
}

#[test]
fn successful_login_delivers_a_token_and_toggles_loading() {
    let scheduler = Scheduler::new();
    let service = Rc::new(StubLoginService::new(scheduler.clone()));
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);
    let (loading, _l) = watch_loading(&form);

    assert!(!form.loading().get(), "loading must be false before any submit");

    form.set_email(Some("user@test.com".into()));
    form.set_password(Some("secret".into()));
    assert!(form.submit_enabled().get());

    form.submit();
    assert!(form.loading().get());
    assert!(outcomes.borrow().is_empty(), "outcome must wait for the service");

    scheduler.advance(STUB_DELAY);

    assert!(!form.loading().get());
    assert_eq!(*loading.borrow(), vec![true, false]);

    let outcomes = outcomes.borrow();
    assert_eq!(outcomes.len(), 1);
    let token = outcomes[0].as_ref().expect("stub login succeeds");
    assert!(!token.as_str().is_empty());
}

#[test]
fn email_without_at_fails_fast() {
    let scheduler = Scheduler::new();
    let service = Rc::new(StubLoginService::new(scheduler.clone()));
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);

    form.set_email(Some("usertest.com".into()));
    form.set_password(Some("secret".into()));
    assert!(!form.submit_enabled().get());

    form.submit();

    // Synchronous rejection: no pending service work, loading untouched.
    assert_eq!(scheduler.pending(), 0);
    assert!(!form.loading().get());
    assert_eq!(*outcomes.borrow(), vec![Err(LoginError::WrongCredentials)]);
}

#[test]
fn empty_password_fails_fast() {
    let scheduler = Scheduler::new();
    let service = Rc::new(StubLoginService::new(scheduler.clone()));
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);

    form.set_email(Some("user@test.com".into()));
    form.set_password(Some(String::new()));
    form.submit();

    assert_eq!(scheduler.pending(), 0);
    assert_eq!(*outcomes.borrow(), vec![Err(LoginError::WrongCredentials)]);
}

#[test]
fn second_trigger_supersedes_an_in_flight_attempt() {
    let scheduler = Scheduler::new();
    let service = Rc::new(SequencedService::new(
        scheduler.clone(),
        Duration::from_secs(1),
    ));
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);
    let (loading, _l) = watch_loading(&form);

    form.set_email(Some("user@test.com".into()));
    form.set_password(Some("secret".into()));

    form.submit();
    scheduler.advance(Duration::from_millis(500));
    form.submit(); // call-1 is still in flight; this supersedes it.

    // call-1 settles at t=1.0s and is discarded; loading must stay true
    // because call-2 is still outstanding.
    scheduler.advance(Duration::from_millis(600));
    assert!(outcomes.borrow().is_empty());
    assert!(form.loading().get());

    // call-2 settles at t=1.5s and is the only delivered outcome.
    scheduler.advance(Duration::from_millis(400));
    assert_eq!(
        *outcomes.borrow(),
        vec![Ok(AuthToken::new("call-2"))]
    );
    assert!(!form.loading().get());

    // One continuous loading window: up once, down once.
    assert_eq!(*loading.borrow(), vec![true, false]);
}

#[test]
fn service_failure_is_forwarded_opaquely() {
    let scheduler = Scheduler::new();
    let service = Rc::new(
        FailingLoginService::new(scheduler.clone(), "upstream timeout")
            .with_delay(Duration::from_millis(200)),
    );
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);
    let (loading, _l) = watch_loading(&form);

    form.set_email(Some("user@test.com".into()));
    form.set_password(Some("secret".into()));
    form.submit();

    scheduler.advance(Duration::from_millis(200));

    assert_eq!(
        *outcomes.borrow(),
        vec![Err(LoginError::service("upstream timeout"))]
    );
    assert_eq!(*loading.borrow(), vec![true, false]);
}

#[test]
fn each_attempt_produces_a_fresh_outcome() {
    let scheduler = Scheduler::new();
    let service = Rc::new(SequencedService::new(
        scheduler.clone(),
        Duration::from_millis(100),
    ));
    let form = LoginForm::new(service);
    let (outcomes, _o) = watch_outcomes(&form);

    form.set_email(Some("user@test.com".into()));
    form.set_password(Some("secret".into()));

    form.submit();
    scheduler.advance(Duration::from_millis(100));
    form.submit();
    scheduler.advance(Duration::from_millis(100));

    // Sequential (non-overlapping) attempts both deliver.
    assert_eq!(
        *outcomes.borrow(),
        vec![Ok(AuthToken::new("call-1")), Ok(AuthToken::new("call-2"))]
    );
    assert!(!form.loading().get());
}

#[test]
fn validity_signals_recolor_per_field() {
    let scheduler = Scheduler::new();
    let service = Rc::new(StubLoginService::new(scheduler));
    let form = LoginForm::new(service);

    let email_states = Rc::new(RefCell::new(Vec::new()));
    let states_clone = Rc::clone(&email_states);
    let _guard = form
        .email_valid()
        .subscribe(move |v: &bool| states_clone.borrow_mut().push(*v));

    form.set_email(Some("u".into()));
    form.set_email(Some("u@".into()));
    form.set_email(Some("u@x".into()));
    form.set_email(None);

    // "u" keeps the initial false (no emission), "u@" flips true, "u@x"
    // keeps true (no emission), clearing flips false.
    assert_eq!(*email_states.borrow(), vec![true, false]);
}
