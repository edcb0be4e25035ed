//! The sample definitions driven end to end with scripted answers.

use example_inputs::{
    OAuthSettings, Region, device_preference_def, oauth_app_def, oauth_settings_def,
    schema_app_def, strip_input_only_fields,
};
use item_input::{
    Answer, Context, DriverOptions, FinishVerb, InputDefinition, Outcome, ScriptedPrompter,
    Value, create_from_user_input, update_typed,
};

fn record<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    pairs.into_iter().collect()
}

/// Answers for the fields every schema app asks before the hosting type.
fn common_answers() -> Vec<Answer> {
    vec![
        Answer::text("Acme Lights"),
        Answer::text("nope"),
        Answer::text("dev@acme.com"),
        Answer::Default,
        Answer::text("https://acme.com/auth"),
        Answer::text("https://acme.com/token"),
        Answer::text(""),
        Answer::text(""),
        Answer::text(""),
        Answer::text("client"),
        Answer::text("secret"),
        Answer::text(""),
    ]
}

fn webhook_app() -> Value {
    record([
        ("partnerName", Value::from("Acme Lights")),
        ("userEmail", Value::from("dev@acme.com")),
        ("appName", Value::from("Acme Lights")),
        ("oAuthAuthorizationUrl", Value::from("https://acme.com/auth")),
        ("oAuthTokenUrl", Value::from("https://acme.com/token")),
        ("icon", Value::Null),
        ("icon2x", Value::Null),
        ("icon3x", Value::Null),
        ("oAuthClientId", Value::from("client")),
        ("oAuthClientSecret", Value::from("secret")),
        ("oAuthScope", Value::Null),
        ("schemaType", Value::from("st-schema")),
        ("hostingType", Value::from("webhook")),
        ("lambdaArn", Value::Null),
        ("lambdaArnEU", Value::Null),
        ("lambdaArnCN", Value::Null),
        ("lambdaArnAP", Value::Null),
        ("webhookUrl", Value::from("https://acme.com/hook")),
        ("includeAppLinks", Value::Bool(false)),
        ("viperAppLinks", Value::Null),
    ])
}

#[test]
fn test_schema_app_webhook_build() {
    let mut answers = common_answers();
    answers.extend([
        Answer::Default,
        Answer::text("https://acme.com/hook"),
        Answer::Default,
    ]);
    let mut prompter = ScriptedPrompter::new(answers);

    let outcome = schema_app_def(Region::Global)
        .build(&Context::root(), &mut prompter)
        .unwrap();

    assert_eq!(outcome, Outcome::Value(webhook_app()));
    assert_eq!(prompter.rejections(), ["must be a valid email address"]);
    let hosting = &prompter.menus()[0];
    assert_eq!(hosting.message, "Select Hosting Type.");
    assert_eq!(hosting.items, ["lambda", "webhook", "Cancel"]);
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_schema_app_lambda_requires_an_arn() {
    let mut answers = common_answers();
    answers.extend([
        Answer::select("lambda"),
        Answer::text(""),
        Answer::text(""),
        Answer::text(""),
        Answer::Default,
        // Final validation rejects the app and reopens it.
        Answer::select("Edit Lambda ARN for EU region: "),
        Answer::text("arn:aws:lambda:eu-west-1:123:function:lights"),
        Answer::select("Finish editing Schema App."),
        Answer::select("Finish and create Schema App."),
    ]);
    let mut prompter = ScriptedPrompter::new(answers);

    let outcome = create_from_user_input(
        &schema_app_def(Region::Global),
        &mut prompter,
        &DriverOptions::default(),
    )
    .unwrap();

    let Outcome::Value(app) = outcome else {
        panic!("creation was cancelled");
    };
    assert_eq!(prompter.printed(), ["At least one lambda ARN is required."]);
    assert_eq!(
        app.field("lambdaArnEU"),
        &Value::from("arn:aws:lambda:eu-west-1:123:function:lights")
    );
    assert!(app.field("lambdaArn").is_null());
    assert!(app.field("webhookUrl").is_null());
}

#[test]
fn test_schema_app_switching_to_lambda_asks_for_arns() {
    let mut prompter = ScriptedPrompter::new([
        Answer::select("Edit Hosting Type: webhook"),
        Answer::select("lambda"),
        Answer::text("?"),
        Answer::text("arn:aws:lambda:us-east-1:123:function:lights"),
        Answer::text(""),
        Answer::text(""),
        Answer::select("Finish editing Schema App."),
    ]);

    let outcome = schema_app_def(Region::Global)
        .update(&webhook_app(), &Context::root(), &mut prompter)
        .unwrap();

    let Outcome::Value(app) = outcome else {
        panic!("edit was cancelled");
    };
    assert_eq!(app.field("hostingType"), &Value::from("lambda"));
    assert_eq!(
        app.field("lambdaArn"),
        &Value::from("arn:aws:lambda:us-east-1:123:function:lights")
    );
    assert!(app.field("webhookUrl").is_null());
    assert_eq!(prompter.printed().len(), 1);
    assert!(prompter.printed()[0].contains("arn:aws:lambda"));
    assert_eq!(
        prompter.asked()[2],
        "Lambda ARN for US region (optional) (? for help)"
    );
}

#[test]
fn test_schema_app_links_follow_toggle() {
    let mut prompter = ScriptedPrompter::new([
        Answer::select("Edit Enable app-to-app linking?: No"),
        Answer::Bool(true),
        Answer::text("a-link"),
        Answer::text("i-link"),
        Answer::select("Finish editing Schema App."),
    ]);

    let outcome = schema_app_def(Region::Global)
        .update(&webhook_app(), &Context::root(), &mut prompter)
        .unwrap();

    let Outcome::Value(app) = outcome else {
        panic!("edit was cancelled");
    };
    assert!(
        prompter
            .last_menu()
            .unwrap()
            .items
            .contains(&"Edit App-to-app Links: android: a-link, ios: i-link".to_string())
    );
    let app = strip_input_only_fields(app);
    assert!(app.get("includeAppLinks").is_none());
    assert_eq!(
        app.field("viperAppLinks"),
        &record([
            ("android", Value::from("a-link")),
            ("ios", Value::from("i-link")),
            ("isLinkingEnabled", Value::Bool(true)),
        ])
    );
}

#[test]
fn test_china_schema_app_only_asks_for_cn_arn() {
    let mut answers = common_answers();
    answers.extend([
        Answer::text("arn:aws-cn:lambda:cn-north-1:123:function:lights"),
        Answer::Default,
    ]);
    let mut prompter = ScriptedPrompter::new(answers);

    let outcome = schema_app_def(Region::China)
        .build(&Context::root(), &mut prompter)
        .unwrap();

    let Outcome::Value(app) = outcome else {
        panic!("build was cancelled");
    };
    assert_eq!(app.field("hostingType"), &Value::from("lambda"));
    assert!(app.field("lambdaArn").is_null());
    assert!(app.field("webhookUrl").is_null());
    assert!(prompter.menus().is_empty());
    assert!(
        prompter
            .asked()
            .contains(&"Lambda ARN for CN region (? for help)".to_string())
    );
}

#[test]
fn test_oauth_app_build() {
    let mut prompter = ScriptedPrompter::new([
        Answer::text("x".repeat(76)),
        Answer::text("Porch Lights"),
        Answer::text("Turns on the porch lights"),
        Answer::text(""),
        Answer::text("https://acme.com/api"),
        Answer::Check(Vec::new()),
        Answer::check(["r:devices:*", "x:devices:*"]),
        Answer::select("Add Redirect URI."),
        Answer::text("https://acme.com/callback"),
        Answer::select("Finish editing Redirect URIs."),
    ]);

    let outcome = oauth_app_def()
        .build(&Context::root(), &mut prompter)
        .unwrap();

    let Outcome::Value(app) = outcome else {
        panic!("build was cancelled");
    };
    assert_eq!(prompter.printed().len(), 1);
    assert_eq!(
        prompter.rejections(),
        [
            "must be no more than 75 characters",
            "At least one scope is required."
        ]
    );
    assert!(
        app.field("appName")
            .as_str()
            .is_some_and(|name| name.starts_with("porch-lights-"))
    );
    assert_eq!(app.field("appType"), &Value::from("API_ONLY"));
    assert_eq!(
        app.field("classifications"),
        &Value::from(vec!["CONNECTED_SERVICE"])
    );
    assert_eq!(
        app.field("apiOnly"),
        &record([("targetUrl", Value::from("https://acme.com/api"))])
    );
    assert_eq!(
        app.field("oauth"),
        &record([
            ("clientName", Value::from("Porch Lights")),
            ("scope", Value::from(vec!["r:devices:*", "x:devices:*"])),
            ("redirectUris", Value::from(vec!["https://acme.com/callback"])),
        ])
    );
}

#[test]
fn test_oauth_app_menu_lists_rolled_up_fields() {
    let app = record([
        ("displayName", Value::from("Porch Lights")),
        ("description", Value::from("Lights")),
        ("appName", Value::from("porch-lights-1")),
        ("iconImage", record([("url", Value::Null)])),
        ("apiOnly", record([("targetUrl", Value::Null)])),
        (
            "oauth",
            record([
                ("clientName", Value::from("Porch Lights")),
                ("scope", Value::from(vec!["r:devices:*"])),
                ("redirectUris", Value::List(Vec::new())),
            ]),
        ),
    ]);
    let mut prompter = ScriptedPrompter::new([Answer::select("Finish editing OAuth-In SmartApp.")]);

    oauth_app_def()
        .update(&app, &Context::root(), &mut prompter)
        .unwrap();

    assert_eq!(
        prompter.last_menu().unwrap().items,
        [
            "Edit Display Name: Porch Lights",
            "Edit Description: Lights",
            "Edit Icon Image URL: ",
            "Edit Target URL: ",
            "Edit Scopes: r:devices:*",
            "Edit Redirect URIs: ",
            "Help",
            "Finish editing OAuth-In SmartApp.",
            "Cancel",
        ]
    );
}

#[test]
fn test_oauth_settings_typed_update() {
    let previous = OAuthSettings {
        client_name: "Porch".to_string(),
        scope: vec!["r:devices:*".to_string()],
        redirect_uris: Vec::new(),
    };
    let options = DriverOptions {
        finish_verb: FinishVerb::Update,
        ..DriverOptions::default()
    };
    let mut prompter = ScriptedPrompter::new([
        Answer::select("Edit OAuth Settings."),
        Answer::select("Edit Scopes: r:devices:*"),
        Answer::check(["r:devices:*", "w:devices:*"]),
        Answer::select("Finish editing OAuth Settings."),
        Answer::select("Finish and update OAuth Settings."),
    ]);

    let outcome = update_typed(&oauth_settings_def(), &previous, &mut prompter, &options).unwrap();

    assert_eq!(
        outcome,
        Outcome::Value(OAuthSettings {
            scope: vec!["r:devices:*".to_string(), "w:devices:*".to_string()],
            ..previous
        })
    );
}

#[test]
fn test_device_preference_integer_bounds() {
    let mut prompter = ScriptedPrompter::new([
        Answer::text("Temp"),
        Answer::text("tempOffset"),
        Answer::text("Temperature offset"),
        Answer::text(""),
        Answer::Default,
        Answer::select("integer"),
        Answer::text("1"),
        Answer::text("0"),
        Answer::text("10"),
        Answer::text("20"),
        Answer::text("5"),
    ]);

    let outcome = device_preference_def()
        .build(&Context::root(), &mut prompter)
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Value(record([
            ("name", Value::from("tempOffset")),
            ("title", Value::from("Temperature offset")),
            ("description", Value::Null),
            ("required", Value::Bool(false)),
            ("preferenceType", Value::from("integer")),
            (
                "definition",
                record([
                    ("minimum", Value::Int(1)),
                    ("maximum", Value::Int(10)),
                    ("default", Value::Int(5)),
                ])
            ),
        ]))
    );
    assert_eq!(
        prompter.rejections(),
        [
            "must be camelCase starting with a lowercase letter and 3-24 characters",
            "must be no less than 1",
            "must be no more than 10",
        ]
    );
}

#[test]
fn test_device_preference_type_change_rebuilds_definition() {
    let previous = record([
        ("title", Value::from("Temperature offset")),
        ("required", Value::Bool(false)),
        ("preferenceType", Value::from("integer")),
        ("definition", record([("minimum", Value::Int(1))])),
    ]);
    let mut prompter = ScriptedPrompter::new([
        Answer::select("Edit Preference type: integer"),
        Answer::select("boolean"),
        Answer::select("true"),
        Answer::select("Finish editing Device Preference."),
    ]);

    let outcome = device_preference_def()
        .update(&previous, &Context::root(), &mut prompter)
        .unwrap();

    let Outcome::Value(preference) = outcome else {
        panic!("edit was cancelled");
    };
    assert_eq!(
        preference.field("definition"),
        &record([("default", Value::Bool(true))])
    );
    assert_eq!(prompter.menus()[2].message, "Select Default value.");
}
