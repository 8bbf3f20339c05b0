//! Generic form lifecycle shared by every settings form.
//!
//! A [`Form`] owns a draft of some settings value `T` and drives one
//! validate, persist, report cycle per [`FormController::submit`] call:
//!
//! ```text
//! Clean -> Validating -> Invalid ---------------------------> Clean
//!                     -> Valid -> Submitting -> Succeeded --> Clean
//!                                            -> Failed -----> Clean
//! ```
//!
//! The form is persistence-agnostic. Concrete forms are configuration: an
//! initial value, a [`Validator`], a [`SettingsStore`] and a [`Toaster`]
//! (see [`options_form`] for the options page).

pub mod options_form;
pub mod validation;

use std::future::Future;

use torrent2box_bridge::storage::SettingsStore;

use crate::toast::Toaster;
use validation::{ValidationError, Validator};

/// Message shown when the draft fails validation.
pub const INVALID_MESSAGE: &str = "Invalid options";
/// Message shown after a successful save.
pub const SAVED_MESSAGE: &str = "Options saved";

/// User-facing texts a form reports with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessages {
    pub saved: String,
    pub invalid: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            saved: SAVED_MESSAGE.to_string(),
            invalid: INVALID_MESSAGE.to_string(),
        }
    }
}

/// State a rendering layer binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<T> {
    /// In-memory copy of the settings being edited.
    pub draft: T,
    /// Shown inline when set.
    pub error_message: Option<String>,
    pub is_submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Clean,
    Validating,
    Valid,
    Invalid,
    Submitting,
    Succeeded,
    Failed,
}

/// How a [`FormController::submit`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Invalid,
    Failed,
}

/// Operations a rendering layer drives a form through.
pub trait FormController<T> {
    fn state(&self) -> &FormState<T>;

    /// Field binding: mutable access to the draft.
    fn draft_mut(&mut self) -> &mut T;

    /// Runs every validation rule against the draft.
    fn is_form_valid(&self) -> impl Future<Output = bool>;

    /// Validates the draft, persists it when valid and reports the result.
    /// Never fails: every error ends up in the toaster or in
    /// [`FormState::error_message`].
    fn submit(&mut self) -> impl Future<Output = SubmitOutcome>;
}

/// Called with every phase the form enters.
pub type PhaseListener = Box<dyn Fn(FormPhase) + Send + Sync>;

pub struct Form<T, S, R> {
    state: FormState<T>,
    phase: FormPhase,
    validator: Validator<T>,
    store: S,
    toaster: R,
    messages: FormMessages,
    phase_listener: Option<PhaseListener>,
}

impl<T, S, R> Form<T, S, R>
where
    S: SettingsStore<T>,
    R: Toaster,
{
    pub fn new(initial: T, validator: Validator<T>, store: S, toaster: R) -> Self {
        Self {
            state: FormState {
                draft: initial,
                error_message: None,
                is_submitting: false,
            },
            phase: FormPhase::Clean,
            validator,
            store,
            toaster,
            messages: FormMessages::default(),
            phase_listener: None,
        }
    }

    /// Builds the form from whatever `store` holds, falling back to
    /// `default` when it holds nothing. A failed load also falls back, and
    /// leaves the failure in the error message.
    pub async fn load(default: T, validator: Validator<T>, store: S, toaster: R) -> Self {
        let (initial, error_message) = match store.load().await {
            Ok(Some(value)) => (value, None),
            Ok(None) => (default, None),
            Err(error) => {
                log::warn!("Failed to load settings, using defaults: {error}");
                (default, Some(error.to_string()))
            }
        };

        let mut form = Self::new(initial, validator, store, toaster);
        form.state.error_message = error_message;
        form
    }

    pub fn with_messages(mut self, messages: FormMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Lets a rendering layer follow the lifecycle, e.g. to show a spinner
    /// while [`FormPhase::Submitting`].
    pub fn on_phase_change(
        mut self,
        listener: impl Fn(FormPhase) + Send + Sync + 'static,
    ) -> Self {
        self.phase_listener = Some(Box::new(listener));
        self
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Failing rules for the current draft, for inline display.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.validator.validate(&self.state.draft)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn transition(&mut self, phase: FormPhase) {
        log::debug!("Form {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        if let Some(listener) = &self.phase_listener {
            listener(phase);
        }
    }
}

impl<T, S, R> FormController<T> for Form<T, S, R>
where
    S: SettingsStore<T>,
    R: Toaster,
{
    fn state(&self) -> &FormState<T> {
        &self.state
    }

    fn draft_mut(&mut self) -> &mut T {
        &mut self.state.draft
    }

    async fn is_form_valid(&self) -> bool {
        self.validator.is_valid(&self.state.draft)
    }

    async fn submit(&mut self) -> SubmitOutcome {
        self.state.error_message = None;
        self.transition(FormPhase::Validating);

        if !self.is_form_valid().await {
            self.transition(FormPhase::Invalid);
            self.state.error_message = Some(self.messages.invalid.clone());
            self.toaster.error(&self.messages.invalid);
            self.transition(FormPhase::Clean);
            return SubmitOutcome::Invalid;
        }

        self.transition(FormPhase::Valid);
        self.state.is_submitting = true;
        self.transition(FormPhase::Submitting);
        let saved = self.store.save(&self.state.draft).await;
        self.state.is_submitting = false;

        let outcome = match saved {
            Ok(()) => {
                self.transition(FormPhase::Succeeded);
                self.toaster.success(&self.messages.saved);
                SubmitOutcome::Saved
            }
            Err(error) => {
                self.transition(FormPhase::Failed);
                log::warn!("Failed to save settings: {error}");
                self.state.error_message = Some(error.to_string());
                SubmitOutcome::Failed
            }
        };

        self.transition(FormPhase::Clean);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use torrent2box_bridge::storage::StoreError;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Profile {
        name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Toast {
        Success(String),
        Error(String),
    }

    #[derive(Default)]
    struct RecordingToaster {
        toasts: Mutex<Vec<Toast>>,
    }

    impl RecordingToaster {
        fn toasts(&self) -> Vec<Toast> {
            self.toasts.lock().unwrap().clone()
        }
    }

    impl Toaster for RecordingToaster {
        fn success(&self, message: &str) {
            self.toasts
                .lock()
                .unwrap()
                .push(Toast::Success(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.toasts
                .lock()
                .unwrap()
                .push(Toast::Error(message.to_string()));
        }
    }

    /// Store that records every save and can be told to reject them.
    #[derive(Default)]
    struct RecordingStore {
        stored: Mutex<Option<Profile>>,
        saves: Mutex<Vec<Profile>>,
        reject_with: Option<String>,
        fail_load: bool,
    }

    impl SettingsStore<Profile> for RecordingStore {
        async fn load(&self) -> Result<Option<Profile>, StoreError> {
            if self.fail_load {
                return Err(StoreError::Rejected("storage unavailable".to_string()));
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, value: &Profile) -> Result<(), StoreError> {
            self.saves.lock().unwrap().push(value.clone());
            if let Some(message) = &self.reject_with {
                return Err(StoreError::Rejected(message.clone()));
            }
            *self.stored.lock().unwrap() = Some(value.clone());
            Ok(())
        }
    }

    fn name_required() -> Validator<Profile> {
        Validator::new().field("name", |profile: &Profile| {
            if profile.name.is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(())
            }
        })
    }

    fn form_with(
        initial: Profile,
        store: RecordingStore,
    ) -> (
        Form<Profile, RecordingStore, Arc<RecordingToaster>>,
        Arc<RecordingToaster>,
    ) {
        let toaster = Arc::new(RecordingToaster::default());
        let form = Form::new(initial, name_required(), store, Arc::clone(&toaster));
        (form, toaster)
    }

    #[tokio::test]
    async fn valid_draft_is_saved_once_and_reported() {
        let (mut form, toaster) = form_with(Profile::default(), RecordingStore::default());
        form.draft_mut().name = "home".to_string();

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(
            *form.store().saves.lock().unwrap(),
            vec![Profile {
                name: "home".to_string()
            }]
        );
        assert_eq!(toaster.toasts(), vec![Toast::Success("Options saved".to_string())]);
        assert_eq!(form.phase(), FormPhase::Clean);
        assert_eq!(form.state().error_message, None);
        assert!(!form.state().is_submitting);
    }

    #[tokio::test]
    async fn invalid_draft_is_never_saved() {
        let (mut form, toaster) = form_with(Profile::default(), RecordingStore::default());

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(form.store().saves.lock().unwrap().is_empty());
        assert_eq!(toaster.toasts(), vec![Toast::Error("Invalid options".to_string())]);
        assert_eq!(form.state().error_message.as_deref(), Some("Invalid options"));
        assert_eq!(form.phase(), FormPhase::Clean);
    }

    #[tokio::test]
    async fn rejected_save_is_captured_without_toast() {
        let store = RecordingStore {
            reject_with: Some("quota exceeded".to_string()),
            ..Default::default()
        };
        let (mut form, toaster) = form_with(
            Profile {
                name: "home".to_string(),
            },
            store,
        );

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.state().error_message.as_deref(), Some("quota exceeded"));
        assert_eq!(form.store().saves.lock().unwrap().len(), 1);
        assert!(toaster.toasts().is_empty());
        assert_eq!(form.phase(), FormPhase::Clean);
        assert!(!form.state().is_submitting);
    }

    #[tokio::test]
    async fn validation_does_not_touch_the_draft() {
        let (form, _toaster) = form_with(Profile::default(), RecordingStore::default());

        assert!(!form.is_form_valid().await);
        assert_eq!(form.state().draft, Profile::default());
        assert_eq!(form.validation_errors().len(), 1);
    }

    #[tokio::test]
    async fn successful_submit_clears_previous_error() {
        let (mut form, toaster) = form_with(Profile::default(), RecordingStore::default());
        form.submit().await;
        assert!(form.state().error_message.is_some());

        form.draft_mut().name = "home".to_string();
        form.submit().await;

        assert_eq!(form.state().error_message, None);
        assert_eq!(
            toaster.toasts(),
            vec![
                Toast::Error("Invalid options".to_string()),
                Toast::Success("Options saved".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn load_prefers_stored_value() {
        let store = RecordingStore::default();
        *store.stored.lock().unwrap() = Some(Profile {
            name: "stored".to_string(),
        });

        let form = Form::load(
            Profile::default(),
            name_required(),
            store,
            RecordingToaster::default(),
        )
        .await;

        assert_eq!(form.state().draft.name, "stored");
        assert_eq!(form.state().error_message, None);
    }

    #[tokio::test]
    async fn load_falls_back_to_default() {
        let form = Form::load(
            Profile {
                name: "fallback".to_string(),
            },
            name_required(),
            RecordingStore::default(),
            RecordingToaster::default(),
        )
        .await;

        assert_eq!(form.state().draft.name, "fallback");
    }

    #[tokio::test]
    async fn failed_load_falls_back_and_reports_inline() {
        let store = RecordingStore {
            fail_load: true,
            ..Default::default()
        };
        let form = Form::load(
            Profile::default(),
            name_required(),
            store,
            RecordingToaster::default(),
        )
        .await;

        assert_eq!(form.state().draft, Profile::default());
        assert_eq!(
            form.state().error_message.as_deref(),
            Some("storage unavailable")
        );
    }

    #[tokio::test]
    async fn custom_messages_are_reported() {
        let (form, toaster) = form_with(Profile::default(), RecordingStore::default());
        let mut form = form.with_messages(FormMessages {
            saved: "Profile stored".to_string(),
            invalid: "Check the profile".to_string(),
        });

        form.submit().await;
        form.draft_mut().name = "home".to_string();
        form.submit().await;

        assert_eq!(
            toaster.toasts(),
            vec![
                Toast::Error("Check the profile".to_string()),
                Toast::Success("Profile stored".to_string()),
            ]
        );
    }

    /// One entry of the shared log the ordered fakes below append to.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Phase(FormPhase),
        Save(Profile),
        Success(String),
        Error(String),
    }

    type Steps = Arc<Mutex<Vec<Step>>>;

    struct OrderedStore(Steps);

    impl SettingsStore<Profile> for OrderedStore {
        async fn load(&self) -> Result<Option<Profile>, StoreError> {
            Ok(None)
        }

        async fn save(&self, value: &Profile) -> Result<(), StoreError> {
            self.0.lock().unwrap().push(Step::Save(value.clone()));
            Ok(())
        }
    }

    struct OrderedToaster(Steps);

    impl Toaster for OrderedToaster {
        fn success(&self, message: &str) {
            self.0.lock().unwrap().push(Step::Success(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.0.lock().unwrap().push(Step::Error(message.to_string()));
        }
    }

    fn ordered_form(initial: Profile) -> (Form<Profile, OrderedStore, OrderedToaster>, Steps) {
        let steps = Steps::default();
        let phases = Arc::clone(&steps);
        let form = Form::new(
            initial,
            name_required(),
            OrderedStore(Arc::clone(&steps)),
            OrderedToaster(Arc::clone(&steps)),
        )
        .on_phase_change(move |phase| phases.lock().unwrap().push(Step::Phase(phase)));
        (form, steps)
    }

    #[tokio::test]
    async fn success_toast_follows_the_save() {
        let home = Profile {
            name: "home".to_string(),
        };
        let (mut form, steps) = ordered_form(home.clone());

        form.submit().await;

        assert_eq!(
            *steps.lock().unwrap(),
            vec![
                Step::Phase(FormPhase::Validating),
                Step::Phase(FormPhase::Valid),
                Step::Phase(FormPhase::Submitting),
                Step::Save(home),
                Step::Phase(FormPhase::Succeeded),
                Step::Success("Options saved".to_string()),
                Step::Phase(FormPhase::Clean),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_submit_only_shows_the_error_toast() {
        let (mut form, steps) = ordered_form(Profile::default());

        form.submit().await;

        assert_eq!(
            *steps.lock().unwrap(),
            vec![
                Step::Phase(FormPhase::Validating),
                Step::Phase(FormPhase::Invalid),
                Step::Error("Invalid options".to_string()),
                Step::Phase(FormPhase::Clean),
            ]
        );
    }
}
