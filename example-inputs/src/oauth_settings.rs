//! OAuth-in app registration and its OAuth settings.

use item_input::{
    ArrayDef, CheckboxDef, ComputedDef, Context, ObjectDef, StringDef, Value, array_def,
    computed_def, object_def, optional_string_def, static_def, string_checkbox_def, string_def,
};
use serde::{Deserialize, Serialize};

use crate::validate::{https_url, max_length};

pub const MAX_DISPLAY_NAME_LENGTH: usize = 75;
pub const MAX_DESCRIPTION_LENGTH: usize = 250;
pub const MAX_REDIRECT_URIS: usize = 10;

/// Scopes an OAuth-in app can request.
pub const OAUTH_SCOPES: [&str; 10] = [
    "r:devices:*",
    "w:devices:*",
    "x:devices:*",
    "r:hubs:*",
    "r:locations:*",
    "w:locations:*",
    "x:locations:*",
    "r:scenes:*",
    "x:scenes:*",
    "r:rules:*",
];

const APP_HELP_TEXT: &str = "An OAuth-in app lets an external service act on behalf of a user. \
Pick the scopes the service needs and the URIs it may redirect to after authorization.";

/// OAuth settings of an app, as sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthSettings {
    pub client_name: String,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// Lower-case `name`, keeping letters and digits and collapsing everything
/// else into single dashes.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Unique app name derived from the display name.
///
/// App names must start with a letter.
pub fn app_name(display_name: &str) -> String {
    let name = format!("{}-{}", sanitize(display_name), uuid::Uuid::new_v4());
    let name = name.trim_start_matches('-');
    if name.starts_with(|c: char| c.is_ascii_lowercase()) {
        name.to_string()
    } else {
        format!("a{name}")
    }
}

fn app_name_def() -> ComputedDef {
    computed_def(|context| {
        let display_name = context
            .field("displayName")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Value::String(app_name(display_name))
    })
}

fn scope_def() -> CheckboxDef {
    string_checkbox_def("Scopes", OAUTH_SCOPES).validate(|selected| {
        if selected.is_empty() {
            Err("At least one scope is required.".to_string())
        } else {
            Ok(())
        }
    })
}

fn redirect_uris_def() -> ArrayDef<StringDef> {
    array_def(
        "Redirect URIs",
        string_def("Redirect URI").validate(|input, _| https_url(input)),
    )
    .min_items(0)
    .max_items(MAX_REDIRECT_URIS)
}

/// The OAuth record of a new app. The client name follows the app's display name.
pub fn oauth_def() -> ObjectDef {
    object_def("OAuth")
        .field(
            "clientName",
            computed_def(|context: &Context<'_>| {
                context
                    .get(1)
                    .map(|app| app.field("displayName").clone())
                    .unwrap_or_default()
            }),
        )
        .field("scope", scope_def())
        .field("redirectUris", redirect_uris_def())
}

/// Editing the OAuth settings of an existing app.
pub fn oauth_settings_def() -> ObjectDef {
    object_def("OAuth Settings")
        .field("clientName", string_def("Client Name"))
        .field("scope", scope_def())
        .field("redirectUris", redirect_uris_def())
}

/// A new API-only app with OAuth-in access.
pub fn oauth_app_def() -> ObjectDef {
    object_def("OAuth-In SmartApp")
        .field(
            "displayName",
            string_def("Display Name")
                .validate(|input, _| max_length(MAX_DISPLAY_NAME_LENGTH)(input)),
        )
        .field(
            "description",
            string_def("Description")
                .validate(|input, _| max_length(MAX_DESCRIPTION_LENGTH)(input)),
        )
        .field("appName", app_name_def())
        .field("appType", static_def("API_ONLY"))
        .field("classifications", static_def(vec!["CONNECTED_SERVICE"]))
        .field("singleInstance", static_def(true))
        .object(
            "iconImage",
            object_def("Icon Image").field(
                "url",
                optional_string_def("Icon Image URL").validate(|input, _| https_url(input)),
            ),
        )
        .object(
            "apiOnly",
            object_def("API Only").field(
                "targetUrl",
                optional_string_def("Target URL").validate(|input, _| https_url(input)),
            ),
        )
        .field("principalType", static_def("LOCATION"))
        .object("oauth", oauth_def())
        .help_text(APP_HELP_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_punctuation() {
        assert_eq!(sanitize("My  Cool App!"), "my-cool-app");
        assert_eq!(sanitize("--x--"), "x");
        assert_eq!(sanitize("!!!"), "");
    }

    #[test]
    fn app_names_start_with_a_letter() {
        assert!(app_name("Porch Lights").starts_with("porch-lights-"));
        assert!(app_name("1st App").starts_with("a1st-app-"));
        assert!(app_name("").starts_with(|c: char| c.is_ascii_lowercase()));
        assert_ne!(app_name("Same"), app_name("Same"));
    }

    #[test]
    fn nested_records_roll_up() {
        let def = oauth_app_def();

        assert_eq!(def.is_rolled_up("iconImage"), Some(true));
        assert_eq!(def.is_rolled_up("apiOnly"), Some(true));
        assert_eq!(def.is_rolled_up("oauth"), Some(true));
        assert_eq!(def.is_rolled_up("displayName"), Some(false));
    }
}
