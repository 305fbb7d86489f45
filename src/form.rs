//! Declarative form validation and simulated submission.
//!
//! Each field is described by a [`FieldRule`]; validation produces ordinary
//! [`FieldValidation`] values, never errors. Rule order: a required-and-empty
//! check short-circuits everything else, then kind-specific checks (email
//! pattern, minimum length, custom pattern, consent checkbox).
//!
//! Submission is accepted only when every field passes. Accepted submissions
//! are simulated: the submit control is disabled for [`SUBMIT_DELAY_MS`],
//! after which the form resets and a success notification fires. Replacing
//! the simulated delay with a real transport is the host's concern.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::notify::{Notifier, Severity};
use crate::page::{ElementId, Page};
use crate::timer::{TimerTask, Timers};

/// Simulated network delay before an accepted submission completes.
pub const SUBMIT_DELAY_MS: u64 = 2000;

/// Message shown when an accepted submission completes.
pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Message sent successfully! We'll get back to you soon.";

const REQUIRED_MESSAGE: &str = "This field is required";
const EMAIL_MESSAGE: &str = "Please enter a valid email address";
const CONSENT_MESSAGE: &str = "Please agree to be contacted";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// What kind of input a rule validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Checkbox,
}

/// Error building a field rule.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The custom pattern failed to compile.
    #[error("invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Declarative validation rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Human-readable label used in failure messages ("Name", "Message").
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pattern: Option<(Regex, String)>,
}

impl FieldRule {
    /// A plain text rule.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::Text,
            required: false,
            min_length: None,
            pattern: None,
        }
    }

    /// An email rule (pattern-checked when non-empty).
    pub fn email(label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Email,
            ..Self::text(label)
        }
    }

    /// A consent-style checkbox rule.
    pub fn checkbox(label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Checkbox,
            ..Self::text(label)
        }
    }

    /// Mark the field as required (builder).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require a minimum character count (builder).
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Attach a custom pattern with its failure message (builder).
    pub fn with_pattern(
        mut self,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, RuleError> {
        self.pattern = Some((Regex::new(pattern)?, message.into()));
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl FieldValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validate a raw value against a rule.
///
/// `checked` is only consulted for checkbox rules.
pub fn validate_value(rule: &FieldRule, value: &str, checked: bool) -> FieldValidation {
    if rule.kind == FieldKind::Checkbox {
        return if rule.required && !checked {
            FieldValidation::fail(CONSENT_MESSAGE)
        } else {
            FieldValidation::ok()
        };
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return if rule.required {
            FieldValidation::fail(REQUIRED_MESSAGE)
        } else {
            FieldValidation::ok()
        };
    }

    if rule.kind == FieldKind::Email && !EMAIL_RE.is_match(trimmed) {
        return FieldValidation::fail(EMAIL_MESSAGE);
    }

    if let Some(min) = rule.min_length {
        if value.chars().count() < min {
            return FieldValidation::fail(format!(
                "{} must be at least {} characters long",
                rule.label, min
            ));
        }
    }

    if let Some((regex, message)) = &rule.pattern {
        if !regex.is_match(value) {
            return FieldValidation::fail(message.clone());
        }
    }

    FieldValidation::ok()
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// A field element, its inline message slot, and its rule.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub field: ElementId,
    /// Element receiving the failure message text; `None` for checkboxes.
    pub message_slot: Option<ElementId>,
    pub rule: FieldRule,
}

impl FieldBinding {
    /// Bind a rule to a field and its message slot.
    pub fn new(field: ElementId, message_slot: ElementId, rule: FieldRule) -> Self {
        Self {
            field,
            message_slot: Some(message_slot),
            rule,
        }
    }

    /// Bind a rule to a field with no inline slot (checkboxes).
    pub fn bare(field: ElementId, rule: FieldRule) -> Self {
        Self {
            field,
            message_slot: None,
            rule,
        }
    }
}

/// Controller for one validated form.
#[derive(Debug)]
pub struct FormController {
    fields: Vec<FieldBinding>,
    submit_control: Option<ElementId>,
    submitting: bool,
}

impl FormController {
    /// Create a controller over the given field bindings.
    pub fn new(fields: Vec<FieldBinding>) -> Self {
        Self {
            fields,
            submit_control: None,
            submitting: false,
        }
    }

    /// Track a submit control to disable during the simulated send (builder).
    pub fn with_submit_control(mut self, control: ElementId) -> Self {
        self.submit_control = Some(control);
        self
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The bound fields.
    pub fn fields(&self) -> &[FieldBinding] {
        &self.fields
    }

    /// Validate one field and render its message slot and border classes.
    ///
    /// Returns `true` for fields this controller doesn't know about, so
    /// blur events from unrelated inputs are harmless.
    pub fn validate_field(&self, page: &mut Page, field: ElementId) -> bool {
        let Some(binding) = self.fields.iter().find(|b| b.field == field) else {
            return true;
        };
        self.run_field(page, binding).valid
    }

    /// Validate every field, rendering all message slots. Consent-checkbox
    /// failures additionally raise an error notification.
    pub fn validate_form(
        &self,
        page: &mut Page,
        timers: &mut Timers,
        notifier: Option<&mut Notifier>,
    ) -> bool {
        let mut all_valid = true;
        let mut consent_failure = None;

        for binding in &self.fields {
            let result = self.run_field(page, binding);
            if !result.valid {
                all_valid = false;
                if binding.rule.kind == FieldKind::Checkbox {
                    consent_failure = Some(result.message);
                }
            }
        }

        if let (Some(message), Some(notifier)) = (consent_failure, notifier) {
            notifier.notify(page, timers, message, Severity::Error);
        }
        all_valid
    }

    /// Handle a submit request. Accepted submissions disable the submit
    /// control and schedule completion after [`SUBMIT_DELAY_MS`]; rejected
    /// ones leave the failure messages in place. Re-entrant submits while
    /// one is in flight are ignored.
    pub fn on_submit(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        notifier: Option<&mut Notifier>,
    ) -> bool {
        if self.submitting {
            return false;
        }
        if !self.validate_form(page, timers, notifier) {
            return false;
        }

        self.submitting = true;
        if let Some(control) = self.submit_control {
            if let Some(el) = page.get_mut(control) {
                el.disabled = true;
            }
        }
        timers.schedule(SUBMIT_DELAY_MS, TimerTask::CompleteSubmission);
        debug!("submission accepted, simulating send");
        true
    }

    /// Handle the simulated send completing: reset values, clear messages,
    /// re-enable the submit control, and raise the success notification.
    pub fn on_submission_complete(
        &mut self,
        page: &mut Page,
        timers: &mut Timers,
        notifier: Option<&mut Notifier>,
    ) {
        if !self.submitting {
            return;
        }
        self.submitting = false;

        for binding in &self.fields {
            page.set_value(binding.field, "");
            page.set_checked(binding.field, false);
            page.remove_class(binding.field, "valid");
            page.remove_class(binding.field, "invalid");
            if let Some(slot) = binding.message_slot {
                page.set_text(slot, "");
            }
        }
        if let Some(control) = self.submit_control {
            if let Some(el) = page.get_mut(control) {
                el.disabled = false;
            }
        }
        if let Some(notifier) = notifier {
            notifier.notify(page, timers, SUBMIT_SUCCESS_MESSAGE, Severity::Success);
        }
    }

    /// Validate a binding against the page and render its side effects.
    fn run_field(&self, page: &mut Page, binding: &FieldBinding) -> FieldValidation {
        let (value, checked) = match page.get(binding.field) {
            Some(el) => (el.value.clone(), el.checked),
            None => (String::new(), false),
        };
        let result = validate_value(&binding.rule, &value, checked);

        if let Some(slot) = binding.message_slot {
            page.set_text(slot, result.message.clone());
        }
        let has_value = !value.trim().is_empty();
        page.set_class(binding.field, "valid", result.valid && has_value);
        page.set_class(binding.field, "invalid", !result.valid);

        result
    }
}
