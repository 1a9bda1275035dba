//! # Contact Form
//!
//! Field normalisation, form values and the submission contract. Sending
//! is delegated to a [`ContactSubmitter`] supplied by the host; whatever
//! it returns ends up as a message on the form, never as an error for the
//! caller.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::Props;
use crate::primitives::to_array;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thanks! We’ll get back to you shortly.";
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Why a submission failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The receiving service refused the message.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Rejected { message: Option<String> },

    #[error("{0}")]
    Transport(String),

    /// The page isn't attached to a site, so there is nowhere to send to.
    #[error("Missing company slug in route.")]
    MissingSite,
}

impl SubmitError {
    /// Text shown on the form.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            msg
        }
    }
}

/// The external network client that delivers contact messages.
pub trait ContactSubmitter {
    fn send_contact(
        &self,
        site_slug: &str,
        form_key: &str,
        payload: &Map<String, Value>,
    ) -> Result<(), SubmitError>;
}

/// Where the page is published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContext {
    pub slug: Option<String>,
    pub page_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    /// HTML input type, or `textarea`.
    pub input_type: String,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl FormField {
    pub fn is_textarea(&self) -> bool {
        self.input_type == "textarea"
    }

    /// Text areas and the message field take the whole row.
    pub fn full_row(&self) -> bool {
        self.is_textarea() || self.name == "message"
    }
}

/// `"first_name"` -> `"First name"`.
pub fn nice_label(name: &str) -> String {
    let spaced: String = name
        .split(['_', '-'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn infer_type(name: &str) -> &'static str {
    match name {
        "email" => "email",
        "phone" => "tel",
        "message" => "textarea",
        _ => "text",
    }
}

fn default_fields() -> Vec<FormField> {
    let field = |name: &str, label: &str, required: bool| FormField {
        name: name.to_string(),
        label: label.to_string(),
        input_type: infer_type(name).to_string(),
        required,
        placeholder: None,
    };
    vec![
        field("name", "Full name", true),
        field("email", "Email", true),
        field("phone", "Phone", false),
        field("subject", "Subject", false),
        field("message", "Message", true),
    ]
}

/// Normalise the `fields` prop.
///
/// Absent means the default five fields. Strings are shorthand for
/// `{name}`. Entries without a usable name are dropped; labels and input
/// types are derived from the name when not given.
pub fn normalize_fields(fields: Option<&Value>) -> Vec<FormField> {
    let Some(value) = fields else {
        return default_fields();
    };
    to_array(value)
        .iter()
        .filter_map(|entry| {
            let (name, p) = match entry {
                Value::String(s) => (s.trim().to_string(), Props::empty()),
                Value::Object(_) => {
                    let p = Props::of(entry);
                    (p.text("name")?.trim().to_string(), p)
                }
                _ => return None,
            };
            if name.is_empty() {
                return None;
            }
            Some(FormField {
                label: p.text("label").unwrap_or_else(|| nice_label(&name)),
                input_type: p.text("type").unwrap_or_else(|| infer_type(&name).to_string()),
                required: p.bool_or("required", false),
                placeholder: p.text("placeholder"),
                name,
            })
        })
        .collect()
}

/// Outcome of the last submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Idle,
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactForm {
    form_key: String,
    fields: Vec<FormField>,
    values: IndexMap<String, String>,
    sending: bool,
    status: FormStatus,
}

impl ContactForm {
    pub fn from_props(p: &Props<'_>) -> Self {
        Self::new(
            &p.text_or("formKey", "contact"),
            normalize_fields(p.get("fields")),
        )
    }

    pub fn new(form_key: &str, fields: Vec<FormField>) -> Self {
        Self {
            form_key: form_key.to_string(),
            fields,
            values: IndexMap::new(),
            sending: false,
            status: FormStatus::Idle,
        }
    }

    pub fn form_key(&self) -> &str {
        &self.form_key
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn input(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Labels of required fields that are still blank.
    pub fn missing_required(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required && self.value(&f.name).trim().is_empty())
            .map(|f| f.label.clone())
            .collect()
    }

    /// Send the current values. On success the values are cleared; on
    /// failure they are kept and the message is recorded.
    pub fn submit(&mut self, site: &SiteContext, submitter: Option<&dyn ContactSubmitter>) {
        if self.sending {
            return;
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            self.status = FormStatus::Failed(format!("Please fill in: {}", missing.join(", ")));
            return;
        }

        self.sending = true;
        self.status = FormStatus::Idle;
        let result = self.send(site, submitter);
        self.sending = false;

        match result {
            Ok(()) => {
                self.values.clear();
                self.status = FormStatus::Sent;
            }
            Err(e) => {
                log::debug!("contact form '{}' not sent: {}", self.form_key, e);
                self.status = FormStatus::Failed(e.user_message());
            }
        }
    }

    fn send(
        &self,
        site: &SiteContext,
        submitter: Option<&dyn ContactSubmitter>,
    ) -> Result<(), SubmitError> {
        let slug = site.slug.as_deref().ok_or(SubmitError::MissingSite)?;
        let submitter =
            submitter.ok_or_else(|| SubmitError::Transport("No contact service configured".into()))?;
        let mut payload: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        payload.insert(
            "page_slug".to_string(),
            site.page_slug.clone().map(Value::String).unwrap_or(Value::Null),
        );
        submitter.send_contact(slug, &self.form_key, &payload)
    }
}
