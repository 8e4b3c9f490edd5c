//! Input validation
//!
//! Runs `validator` derives and maps the first violation to a specific
//! [`ErrorCode`] through the `code` attribute each rule carries.

use shared::error::{AppError, ErrorCode};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

fn code_for(rule: &str) -> ErrorCode {
    match rule {
        "order_empty" => ErrorCode::OrderEmpty,
        "item_quantity" => ErrorCode::OrderInvalidQuantity,
        "item_price" | "order_amount" => ErrorCode::OrderInvalidAmount,
        "customer_name" | "customer_email" => ErrorCode::CustomerInvalidContact,
        "store_currency" => ErrorCode::StoreInvalidCurrency,
        "product_price" => ErrorCode::ProductInvalidPrice,
        "store_name" | "product_name" | "product_stock" => ErrorCode::ValueOutOfRange,
        _ => ErrorCode::ValidationFailed,
    }
}

/// Flatten nested errors into `(path, rule code)` pairs, sorted by path so
/// the reported violation is stable.
fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push((path.clone(), err.code.to_string()));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Convert validator output into an `AppError` naming the offending field
pub fn to_app_error(errors: &ValidationErrors) -> AppError {
    let mut violations = Vec::new();
    collect(errors, "", &mut violations);
    violations.sort();

    match violations.first() {
        Some((path, rule)) => {
            let code = code_for(rule);
            AppError::with_message(code, format!("{path}: {}", code.message()))
                .with_detail("field", path.as_str())
                .with_detail("violations", violations.len())
        }
        None => AppError::new(ErrorCode::ValidationFailed),
    }
}

/// Validate a request payload
pub fn check<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(|e| to_app_error(&e))
}
