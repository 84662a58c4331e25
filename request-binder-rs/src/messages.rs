//! Client-facing messages for binding and validation failures

use host_validation::FieldError;

pub const MSG_INVALID_PARAM: &str = "invalid parameter";
pub const MSG_UNSUPPORTED_CONTENT_TYPE: &str = "unsupported content type";
pub const MSG_CONTENT_TYPE_MISSING: &str = "content type missing";
pub const MSG_INTERNAL_ERROR: &str = "internal error";

/// Render a field error as a user-facing message
pub fn format_field_error(err: &FieldError) -> String {
    let field = err.field.as_str();
    let param = err.param.as_deref().unwrap_or_default();

    let detail = match err.tag {
        "required" => format!("'{}' is required", field),
        "base64" => format!("'{}' should be base64 encoded", field),
        "oneof" => format!(
            "'{}', possible values: '{}'",
            field,
            param.split(' ').collect::<Vec<_>>().join(", ")
        ),
        "email" => format!("'{}' should be a valid email address", field),
        "min" => format!("'{}' should be at least {}", field, param),
        "max" => format!("'{}' should be at most {}", field, param),
        "len" => format!("'{}' should be exactly {} characters long", field, param),
        "url" => format!("'{}' should be a valid URL", field),
        "numeric" => format!("'{}' should be numeric", field),
        "alpha" => format!("'{}' should contain only alphabetic characters", field),
        "alphanumeric" => format!("'{}' should contain only alphanumeric characters", field),
        "gte" => format!("'{}' should be greater than or equal to {}", field, param),
        "lte" => format!("'{}' should be less than or equal to {}", field, param),
        "gt" => format!("'{}' should be greater than {}", field, param),
        "lt" => format!("'{}' should be less than {}", field, param),
        "datetime" => format!("'{}' should be a valid datetime", field),
        "ip" => format!("'{}' should be a valid IP address", field),
        "ipv4" => format!("'{}' should be a valid IPv4 address", field),
        "ipv6" => format!("'{}' should be a valid IPv6 address", field),
        "unique" => format!("'{}' should contain unique values", field),
        tag => {
            log::debug!(
                "{}: field[{}], tag[{}], value[{}], param[{}]",
                MSG_INVALID_PARAM,
                field,
                tag,
                err.value,
                param
            );
            format!("'{}'", field)
        }
    };

    format!("{}: {}", MSG_INVALID_PARAM, detail)
}
