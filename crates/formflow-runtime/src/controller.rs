#![forbid(unsafe_code)]

//! The reactive login form coordinator.
//!
//! [`LoginForm`] wires raw field edits into derived validity, submit
//! enablement, and an asynchronous submit path:
//!
//! ```text
//! field edits -> validity -> enablement
//!      |                        (gates the button, not the pipeline)
//!      +--(snapshot at trigger)--> gate -> service call -> outcome
//!                                            |
//!                                         loading
//! ```
//!
//! Per submit gesture the attempt moves `Idle -> Dispatched (loading=true)
//! -> {Succeeded | Failed} (loading=false) -> Idle`. A new trigger while an
//! attempt is dispatched supersedes it: the older attempt's eventual outcome
//! is discarded at delivery time, never emitted.
//!
//! # Invariants
//!
//! 1. Enablement equals the conjunction of both field validities at every
//!    instant; it is recomputed before `set_email`/`set_password` return.
//! 2. At most one outcome is emitted per non-superseded submit attempt.
//! 3. The loading flag is true exactly while at least one dispatched call
//!    has not settled; supersession does not blip it false.
//! 4. A validation rejection emits synchronously, makes no service call,
//!    and leaves the loading flag untouched.

use std::cell::Cell;
use std::rc::Rc;

use formflow_core::login::{LoginOutcome, check_credentials};
use formflow_core::validator::{FieldValue, is_valid_email, is_valid_password};

use crate::reactive::{
    Observable, Subject, SubscriptionSet, SwitchLatest, combine_latest, derive, with_latest_from,
};
use crate::service::{LoginActions, LoginCompletion};

/// Reactive coordinator for one login form.
///
/// The UI layer feeds [`set_email`](LoginForm::set_email),
/// [`set_password`](LoginForm::set_password), and
/// [`submit`](LoginForm::submit); it observes the output signals to recolor
/// fields, gate the button, drive a spinner, and present outcomes. Dropping
/// the form tears down the whole pipeline.
pub struct LoginForm {
    email: Observable<FieldValue>,
    password: Observable<FieldValue>,
    email_valid: Observable<bool>,
    password_valid: Observable<bool>,
    submit_enabled: Observable<bool>,
    loading: Observable<bool>,
    outcomes: Subject<LoginOutcome>,
    submit_trigger: Subject<()>,
    _subscriptions: SubscriptionSet,
}

impl LoginForm {
    /// Build the pipeline around a login service.
    #[must_use]
    pub fn new(service: Rc<dyn LoginActions>) -> Self {
        let email: Observable<FieldValue> = Observable::new(None);
        let password: Observable<FieldValue> = Observable::new(None);

        let (email_valid, email_guard) = derive(&email, |v: &FieldValue| {
            is_valid_email(v.as_deref())
        });
        let (password_valid, password_guard) = derive(&password, |v: &FieldValue| {
            is_valid_password(v.as_deref())
        });
        let (submit_enabled, enabled_guard) =
            combine_latest(&email_valid, &password_valid, |e, p| *e && *p);

        let submit_trigger: Subject<()> = Subject::new();
        let (snapshots, snapshot_guard) = with_latest_from(&submit_trigger, &email, &password);

        let loading = Observable::new(false);
        let outcomes: Subject<LoginOutcome> = Subject::new();

        let switch = Rc::new(SwitchLatest::new());
        let outstanding = Rc::new(Cell::new(0u32));

        let dispatch_guard = {
            let loading = loading.clone();
            let outcomes = outcomes.clone();
            snapshots.subscribe(move |(_, email, password): &((), FieldValue, FieldValue)| {
                let (email, password) =
                    match check_credentials(email.as_deref(), password.as_deref()) {
                        Ok(validated) => validated,
                        Err(error) => {
                            tracing::debug!(message = "login.rejected", error = %error);
                            outcomes.emit(Err(error));
                            return;
                        }
                    };

                let token = switch.begin();
                outstanding.set(outstanding.get() + 1);
                loading.set(true);
                tracing::debug!(message = "login.dispatch", attempt = ?token);

                let done: LoginCompletion = {
                    let loading = loading.clone();
                    let outcomes = outcomes.clone();
                    let switch = Rc::clone(&switch);
                    let outstanding = Rc::clone(&outstanding);
                    Box::new(move |outcome| {
                        outstanding.set(outstanding.get() - 1);
                        if outstanding.get() == 0 {
                            loading.set(false);
                        }
                        if switch.is_current(token) {
                            tracing::debug!(
                                message = "login.settled",
                                attempt = ?token,
                                ok = outcome.is_ok()
                            );
                            outcomes.emit(outcome);
                        } else {
                            tracing::debug!(message = "login.discarded", attempt = ?token);
                        }
                    })
                };
                service.login(email, password, done);
            })
        };

        let mut subscriptions = SubscriptionSet::new();
        subscriptions.extend([
            email_guard,
            password_guard,
            enabled_guard,
            snapshot_guard,
            dispatch_guard,
        ]);

        Self {
            email,
            password,
            email_valid,
            password_valid,
            submit_enabled,
            loading,
            outcomes,
            submit_trigger,
            _subscriptions: subscriptions,
        }
    }

    /// Record the email field's current text. One call per keystroke.
    pub fn set_email(&self, value: FieldValue) {
        self.email.set(value);
    }

    /// Record the password field's current text. One call per keystroke.
    pub fn set_password(&self, value: FieldValue) {
        self.password.set(value);
    }

    /// Fire the submit trigger.
    ///
    /// Enablement gates the UI's button, not this method: a caller that
    /// submits with invalid fields receives a wrong-credentials outcome.
    pub fn submit(&self) {
        self.submit_trigger.emit(());
    }

    /// Validity of the email field, updated on every email edit.
    #[must_use]
    pub fn email_valid(&self) -> &Observable<bool> {
        &self.email_valid
    }

    /// Validity of the password field, updated on every password edit.
    #[must_use]
    pub fn password_valid(&self) -> &Observable<bool> {
        &self.password_valid
    }

    /// Conjunction of both field validities.
    #[must_use]
    pub fn submit_enabled(&self) -> &Observable<bool> {
        &self.submit_enabled
    }

    /// True exactly while at least one dispatched login call is outstanding.
    #[must_use]
    pub fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    /// Outcome stream: one emission per non-superseded submit attempt.
    #[must_use]
    pub fn outcomes(&self) -> &Subject<LoginOutcome> {
        &self.outcomes
    }

    /// Direct callback-style login, without the reactive pipeline.
    ///
    /// Applies the same validation gate as the pipeline, then either
    /// completes immediately with a wrong-credentials failure or forwards
    /// the validated credentials to the service.
    pub fn login_with(
        email: Option<&str>,
        password: Option<&str>,
        service: &dyn LoginActions,
        done: LoginCompletion,
    ) {
        match check_credentials(email, password) {
            Ok((email, password)) => service.login(email, password, done),
            Err(error) => done(Err(error)),
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email_valid", &self.email_valid.get())
            .field("password_valid", &self.password_valid.get())
            .field("submit_enabled", &self.submit_enabled.get())
            .field("loading", &self.loading.get())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use formflow_core::login::LoginError;
    use std::cell::RefCell;

    /// Test double that records calls and lets the test settle them by hand.
    struct ManualService {
        calls: Rc<RefCell<Vec<(String, String, LoginCompletion)>>>,
    }

    impl ManualService {
        fn new() -> (Rc<Self>, Rc<RefCell<Vec<(String, String, LoginCompletion)>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            let service = Rc::new(Self {
                calls: Rc::clone(&calls),
            });
            (service, calls)
        }
    }

    impl LoginActions for ManualService {
        fn login(&self, email: &str, password: &str, done: LoginCompletion) {
            self.calls
                .borrow_mut()
                .push((email.to_string(), password.to_string(), done));
        }
    }

    fn collected_outcomes(form: &LoginForm) -> (Rc<RefCell<Vec<LoginOutcome>>>, crate::reactive::Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let guard = form
            .outcomes()
            .subscribe(move |o: &LoginOutcome| seen_clone.borrow_mut().push(o.clone()));
        (seen, guard)
    }

    #[test]
    fn enablement_follows_both_fields() {
        let (service, _calls) = ManualService::new();
        let form = LoginForm::new(service);

        assert!(!form.submit_enabled().get());

        form.set_email(Some("user@test.com".into()));
        assert!(form.email_valid().get());
        assert!(!form.submit_enabled().get());

        form.set_password(Some("secret".into()));
        assert!(form.submit_enabled().get());

        form.set_email(Some("usertest.com".into()));
        assert!(!form.email_valid().get());
        assert!(!form.submit_enabled().get());
    }

    #[test]
    fn invalid_submit_rejects_without_a_service_call() {
        let (service, calls) = ManualService::new();
        let form = LoginForm::new(service);
        let (outcomes, _guard) = collected_outcomes(&form);

        form.set_email(Some("usertest.com".into()));
        form.set_password(Some("secret".into()));
        form.submit();

        assert_eq!(calls.borrow().len(), 0);
        assert!(!form.loading().get());
        assert_eq!(*outcomes.borrow(), vec![Err(LoginError::WrongCredentials)]);
    }

    #[test]
    fn absent_fields_reject_like_invalid_ones() {
        let (service, calls) = ManualService::new();
        let form = LoginForm::new(service);
        let (outcomes, _guard) = collected_outcomes(&form);

        form.submit();

        assert_eq!(calls.borrow().len(), 0);
        assert_eq!(*outcomes.borrow(), vec![Err(LoginError::WrongCredentials)]);
    }

    #[test]
    fn valid_submit_dispatches_with_snapshotted_fields() {
        let (service, calls) = ManualService::new();
        let form = LoginForm::new(service);

        form.set_email(Some("user@test.com".into()));
        form.set_password(Some("secret".into()));
        form.submit();

        // Edits after the trigger must not leak into the dispatched call.
        form.set_password(Some("changed".into()));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "user@test.com");
        assert_eq!(calls[0].1, "secret");
        assert!(form.loading().get());
    }

    #[test]
    fn login_with_applies_the_gate() {
        let (service, calls) = ManualService::new();
        let outcome = Rc::new(RefCell::new(None));

        let outcome_clone = Rc::clone(&outcome);
        LoginForm::login_with(
            Some("usertest.com"),
            Some("secret"),
            service.as_ref(),
            Box::new(move |o| *outcome_clone.borrow_mut() = Some(o)),
        );
        assert_eq!(calls.borrow().len(), 0);
        assert_eq!(
            *outcome.borrow(),
            Some(Err(LoginError::WrongCredentials))
        );

        LoginForm::login_with(
            Some("user@test.com"),
            Some("secret"),
            service.as_ref(),
            Box::new(|_| {}),
        );
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn dropping_the_form_tears_down_the_pipeline() {
        let (service, calls) = ManualService::new();
        let form = LoginForm::new(service);

        let email = form.email.clone();
        let trigger = form.submit_trigger.clone();
        let email_valid = form.email_valid.clone();

        form.set_email(Some("user@test.com".into()));
        form.set_password(Some("secret".into()));
        drop(form);

        // Outstanding handles still work, but nothing propagates or
        // dispatches once the subscriptions are gone.
        email.set(Some("no-longer-an-email".into()));
        trigger.emit(());
        assert!(email_valid.get(), "derived validity must be frozen after teardown");
        assert_eq!(calls.borrow().len(), 0);
    }
}
