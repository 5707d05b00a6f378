use validator::{Validate, ValidationErrors};

/// Turn validator field errors into a single message
///
/// Fields are listed alphabetically so the message is stable.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors
                .iter()
                .map(|err| {
                    if let Some(msg) = &err.message {
                        msg.to_string()
                    } else {
                        format!("Invalid {}", field)
                    }
                })
                .collect();
            format!("{}: {}", field, error_msgs.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}

/// Validate `input`, returning the combined message on failure
pub fn validate_input<T: Validate>(input: &T) -> Result<(), String> {
    input.validate().map_err(|errors| describe_errors(&errors))
}
