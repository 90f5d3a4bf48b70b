//! HTML pages.
//!
//! Every piece of user-supplied or upstream text passes through
//! [`escape_html`] (attributes) or [`escape_text`] (element content) before
//! it reaches the page.

use satreg_core::{ActivationKey, AppConfig, Capsule, RegistrationOutcome, SatregError};
use std::fmt::Write;

/// Escape text for use inside a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for use as element content.
///
/// Quotes are left alone so command lines and JSON bodies stay copyable
/// in the page source.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Values echoed back into the selection form as hidden inputs.
pub struct HiddenCredentials<'a> {
    pub api_url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// First page: server URL and credentials.
pub fn login_page() -> String {
    let body = format!(
        r#"<h2>{}</h2>
<form method="post">
  <label>Satellite server URL (e.g. https://satellite.example.com): <input type="text" name="api_url" required /></label><br>
  <label>Username: <input type="text" name="username" required /></label><br>
  <label>Password: <input type="password" name="password" required /></label><br>
  <input type="submit" value="Login" />
</form>"#,
        escape_html(AppConfig::APP_NAME)
    );
    page("API Login", &body)
}

fn datalist_options<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let mut options = String::new();
    for value in values {
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            escape_html(value),
            escape_text(value)
        );
    }
    options
}

/// Render the registration result block; empty when nothing was attempted.
pub fn registration_block(outcome: &RegistrationOutcome) -> String {
    match outcome {
        RegistrationOutcome::Skipped => String::new(),
        RegistrationOutcome::Command(command) => format!(
            r#"<h3>Registration Command:</h3>
<textarea rows="5" cols="100" readonly onclick="this.select()">{}</textarea>
<p><small>Click inside the box to select &amp; copy.</small></p>"#,
            escape_text(&command.command_text)
        ),
        RegistrationOutcome::Rejected { status, body } => format!(
            "<h3>Failed to get registration command</h3>\n<p>HTTP {}</p>\n<pre>{}</pre>",
            status,
            escape_text(body)
        ),
    }
}

/// Second page: key and capsule selection plus any registration result.
pub fn selection_page(
    hidden: &HiddenCredentials<'_>,
    keys: &[ActivationKey],
    capsules: &[Capsule],
    outcome: &RegistrationOutcome,
) -> String {
    let key_options = datalist_options(keys.iter().map(|k| k.name.as_str()));
    let capsule_names: Vec<String> = capsules.iter().map(Capsule::display_name).collect();
    let capsule_options = datalist_options(capsule_names.iter().map(String::as_str));

    let body = format!(
        r#"<h3>Select Activation Key and Capsule</h3>
<form method="post">
  <input type="hidden" name="api_url" value="{api_url}" />
  <input type="hidden" name="username" value="{username}" />
  <input type="hidden" name="password" value="{password}" />

  <label>Activation Key:</label><br>
  <input list="activation_keys" name="activation_key" required />
  <datalist id="activation_keys">{key_options}</datalist><br><br>

  <label>Capsule:</label><br>
  <input list="capsules" name="capsule" required />
  <datalist id="capsules">{capsule_options}</datalist><br><br>

  <input type="submit" value="Generate Registration Command" />
</form>

<hr>
{result}"#,
        api_url = escape_html(hidden.api_url),
        username = escape_html(hidden.username),
        password = escape_html(hidden.password),
        key_options = key_options,
        capsule_options = capsule_options,
        result = registration_block(outcome),
    );
    page("Activation Keys & Capsules", &body)
}

/// Page shown when the orchestration aborts.
pub fn error_page(err: &SatregError) -> String {
    let body = format!(
        "<h3>Unexpected error:</h3>\n<pre>{}</pre>\n<p><small>Error type: {}</small></p>\n<p><a href=\"/\">Back to login</a></p>",
        escape_text(&err.user_message()),
        err.kind()
    );
    page("Error", &body)
}
