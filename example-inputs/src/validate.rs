//! Answer checks shared by the sample definitions.

/// Accept only `https://` URLs with a host part.
pub fn https_url(input: &str) -> Result<(), String> {
    match input.strip_prefix("https://") {
        Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => Ok(()),
        _ => Err("must be a valid https URL".to_string()),
    }
}

/// A loose email check: one `@`, something on either side, a dot in the domain.
pub fn email(input: &str) -> Result<(), String> {
    let valid = match input.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err("must be a valid email address".to_string())
    }
}

/// Limit answers to `max_length` characters.
pub fn max_length(max_length: usize) -> impl Fn(&str) -> Result<(), String> {
    move |input| {
        if input.chars().count() > max_length {
            Err(format!("must be no more than {max_length} characters"))
        } else {
            Ok(())
        }
    }
}
