//! Registration of a cloud-connected device integration ("schema app").
//!
//! Lambda-hosted integrations list one ARN per region, webhook-hosted ones a
//! single URL. Which of those fields are asked follows the hosting type, and
//! deployments in China only support lambda hosting in the CN region.

use item_input::{
    BoxedDefinition, Context, MAX_ITEM_VALUE_LENGTH, ObjectDef, Value,
    boolean_def, clip_to_maximum, list_selection_def, object_def, optional_def,
    optional_string_def, static_def, string_def, undefined_def,
};

use crate::validate::{email, https_url};

pub const LAMBDA: &str = "lambda";
pub const WEBHOOK: &str = "webhook";

const AWS_HELP_TEXT: &str = "You can find the ARN of a lambda function at the top right of its \
page in the AWS console. It starts with arn:aws:lambda.";

/// Where the registration is made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Global,
    China,
}

fn hosted_by(context: &Context<'_>, hosting_type: &str) -> bool {
    context.field("hostingType").and_then(Value::as_str) == Some(hosting_type)
}

/// Lambda ARN for one region; left undefined where the region does not apply.
fn arn_def(name: &str, region: Region, for_china: bool) -> BoxedDefinition {
    match (region, for_china) {
        (Region::China, true) => Box::new(optional_def(
            string_def(name).help_text(AWS_HELP_TEXT),
            |context| hosted_by(context, LAMBDA),
        )),
        (Region::Global, false) => Box::new(optional_def(
            optional_string_def(name).help_text(AWS_HELP_TEXT),
            |context| hosted_by(context, LAMBDA),
        )),
        _ => Box::new(undefined_def()),
    }
}

fn webhook_url_def(region: Region) -> BoxedDefinition {
    match region {
        Region::China => Box::new(undefined_def()),
        Region::Global => Box::new(optional_def(
            string_def("Webhook URL").validate(|input, _| https_url(input)),
            |context| hosted_by(context, WEBHOOK),
        )),
    }
}

fn hosting_type_def(region: Region) -> BoxedDefinition {
    match region {
        Region::China => Box::new(static_def(LAMBDA)),
        Region::Global => Box::new(
            list_selection_def("Hosting Type", [LAMBDA, WEBHOOK], Value::to_string)
                .default_value(WEBHOOK),
        ),
    }
}

/// Summary of the app links record: both links, clipped.
pub fn app_links_summary(value: &Value, _context: &Context<'_>) -> String {
    let link = |key: &str| match value.field(key) {
        Value::Null => "undefined".to_string(),
        other => other.to_string(),
    };
    clip_to_maximum(
        &format!("android: {}, ios: {}", link("android"), link("ios")),
        MAX_ITEM_VALUE_LENGTH,
    )
}

/// Lambda hosting needs at least one regional ARN.
pub fn validate_hosting(value: &Value, _context: &Context<'_>) -> Result<(), String> {
    let has_arn = ["lambdaArn", "lambdaArnEU", "lambdaArnAP", "lambdaArnCN"]
        .iter()
        .any(|key| !value.field(key).is_null());
    if value.field("hostingType").as_str() == Some(LAMBDA) && !has_arn {
        return Err("At least one lambda ARN is required.".to_string());
    }
    Ok(())
}

/// The app links record.
pub fn app_links_def() -> ObjectDef {
    object_def("App-to-app Links")
        .field("android", string_def("Android Link"))
        .field("ios", string_def("iOS Link"))
        .field("isLinkingEnabled", static_def(true))
        .summarize_with(app_links_summary)
}

/// The full registration definition.
///
/// `includeAppLinks` only controls whether app links are asked for; strip it
/// with [`strip_input_only_fields`] before sending the value anywhere.
pub fn schema_app_def(region: Region) -> ObjectDef {
    object_def("Schema App")
        .field("partnerName", string_def("Partner Name"))
        .field(
            "userEmail",
            string_def("User email").validate(|input, _| email(input)),
        )
        .field(
            "appName",
            optional_string_def("App Name").default_with(|context| {
                context
                    .field("partnerName")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            }),
        )
        .field(
            "oAuthAuthorizationUrl",
            string_def("OAuth Authorization URL").validate(|input, _| https_url(input)),
        )
        .field(
            "oAuthTokenUrl",
            string_def("Partner OAuth Refresh Token URL").validate(|input, _| https_url(input)),
        )
        .field(
            "icon",
            optional_string_def("Icon URL").validate(|input, _| https_url(input)),
        )
        .field(
            "icon2x",
            optional_string_def("2x Icon URL").validate(|input, _| https_url(input)),
        )
        .field(
            "icon3x",
            optional_string_def("3x Icon URL").validate(|input, _| https_url(input)),
        )
        .field("oAuthClientId", string_def("Partner OAuth Client Id"))
        .field("oAuthClientSecret", string_def("Partner OAuth Client Secret"))
        .field("oAuthScope", optional_string_def("Partner OAuth Scope"))
        .field("schemaType", static_def("st-schema"))
        .field("hostingType", hosting_type_def(region))
        .field("lambdaArn", arn_def("Lambda ARN for US region", region, false))
        .field("lambdaArnEU", arn_def("Lambda ARN for EU region", region, false))
        .field("lambdaArnCN", arn_def("Lambda ARN for CN region", region, true))
        .field("lambdaArnAP", arn_def("Lambda ARN for AP region", region, false))
        .field("webhookUrl", webhook_url_def(region))
        .field(
            "includeAppLinks",
            boolean_def("Enable app-to-app linking?").default_value(false),
        )
        .field(
            "viperAppLinks",
            optional_def(app_links_def(), |context| {
                context.field("includeAppLinks").and_then(Value::as_bool) == Some(true)
            }),
        )
        .validate_final_with(validate_hosting)
}

/// Prepare an existing registration for editing by adding the input-only
/// `includeAppLinks` field.
pub fn with_input_only_fields(app: &Value) -> Value {
    let mut app = app.clone();
    if let Value::Object(fields) = &mut app {
        let include = !fields.get("viperAppLinks").is_none_or(Value::is_null);
        fields.insert("includeAppLinks".to_string(), Value::Bool(include));
    }
    app
}

/// Remove fields that only steer the questions.
pub fn strip_input_only_fields(mut app: Value) -> Value {
    if let Value::Object(fields) = &mut app {
        fields.shift_remove("includeAppLinks");
    }
    app
}
