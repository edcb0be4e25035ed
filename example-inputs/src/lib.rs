pub mod device_preference;
pub mod oauth_settings;
pub mod schema_app;
pub mod validate;

// Re-export device_preference items
pub use device_preference::{
    PREFERENCE_TYPES, PreferenceDefinition, device_preference_def, validate_preference_name,
};

// Re-export oauth_settings items
pub use oauth_settings::{
    OAUTH_SCOPES, OAuthSettings, app_name, oauth_app_def, oauth_def, oauth_settings_def, sanitize,
};

// Re-export schema_app items
pub use schema_app::{
    Region, app_links_def, schema_app_def, strip_input_only_fields, validate_hosting,
    with_input_only_fields,
};
