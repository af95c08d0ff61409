//! Form helpers used by the panel's templates and submit handlers

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{AbstractControl, ControlStatus, FormError, FormGroup};

/// Metadata of a file picked in an upload input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
}

/// Reset every value and mark all controls untouched and pristine
pub fn reset_form(form: &mut FormGroup) {
    form.reset();
}

fn interacted(control: &AbstractControl) -> bool {
    control.is_touched() || control.is_dirty()
}

/// `false` only for an invalid control the user has already interacted with
pub fn is_input_valid(form: &FormGroup, path: &str) -> Result<bool, FormError> {
    let control = form.get(path)?;
    let settled = matches!(control.status(), ControlStatus::Valid | ControlStatus::Disabled);
    Ok(settled || !interacted(control))
}

/// `false` if any of `rules` fails on a control the user has interacted with
pub fn is_input_rule_valid(form: &FormGroup, path: &str, rules: &[&str]) -> Result<bool, FormError> {
    let control = form.get(path)?;
    if !interacted(control) {
        return Ok(true);
    }
    Ok(!rules.iter().any(|rule| control.has_error(rule)))
}

/// Whether the control at `path` carries a validator for `rule`
pub fn is_rule_available(form: &FormGroup, path: &str, rule: &str) -> bool {
    form.get(path).map_or(false, |control| control.has_validator(rule))
}

/// Store the first picked file under `key`, or `null` when nothing was picked
pub fn on_file_uploaded(form: &mut FormGroup, files: &[UploadedFile], key: &str) -> Result<(), FormError> {
    let value = match files.first() {
        Some(file) => {
            debug!("Attaching '{}' ({} bytes) to '{}'", file.name, file.size, key);
            json!({
                "name": file.name,
                "size": file.size,
                "content_type": file.content_type
            })
        }
        None => Value::Null,
    };
    form.get_mut(key)?.patch(&value);
    Ok(())
}

/// Rows of the form array at `path`
pub fn form_array_controls<'a>(form: &'a FormGroup, path: &str) -> Result<&'a [AbstractControl], FormError> {
    form.get(path)?
        .as_array()
        .map(|array| array.controls())
        .ok_or_else(|| FormError::NotAnArray(path.to_string()))
}

/// Remove and return row `index` of the form array at `path`
pub fn remove_form_array_row(form: &mut FormGroup, path: &str, index: usize) -> Result<AbstractControl, FormError> {
    let array = form
        .get_mut(path)?
        .as_array_mut()
        .ok_or_else(|| FormError::NotAnArray(path.to_string()))?;
    let len = array.len();
    array.remove_at(index).ok_or_else(|| FormError::IndexOutOfRange {
        path: path.to_string(),
        index,
        len,
    })
}

/// Drop every row of the form array at `path`
pub fn clear_form_array(form: &mut FormGroup, path: &str) -> Result<(), FormError> {
    form.get_mut(path)?
        .as_array_mut()
        .ok_or_else(|| FormError::NotAnArray(path.to_string()))?
        .clear();
    Ok(())
}

/// Index of the first row of `array_key` whose `field` equals `value`.
///
/// Numbers and numeric strings compare equal when they denote the same number.
pub fn index_of_control(form: &FormGroup, array_key: &str, field: &str, value: &Value) -> Result<Option<usize>, FormError> {
    let rows = match form.get(array_key)?.value() {
        Value::Array(rows) => rows,
        _ => return Err(FormError::NotAnArray(array_key.to_string())),
    };

    Ok(rows
        .iter()
        .position(|row| row.get(field).map_or(false, |v| loosely_equal(v, value))))
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (n.as_f64(), s.trim().parse::<f64>()) {
                (Some(n), Ok(s)) => n == s,
                _ => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormArray, FormControl, Validator};

    fn signup_form() -> FormGroup {
        FormGroup::new()
            .with_control(
                "email",
                FormControl::new("")
                    .with_validator(Validator::Required)
                    .with_validator(Validator::Email),
            )
            .with_control("nickname", FormControl::new("guest"))
            .with_control("avatar", FormControl::new(Value::Null))
            .with_control(
                "products",
                FormArray::new()
                    .with_control(FormGroup::new().with_control("sku", FormControl::new("A-1")))
                    .with_control(FormGroup::new().with_control("sku", FormControl::new(42))),
            )
    }

    fn control_mut<'a>(form: &'a mut FormGroup, path: &str) -> &'a mut FormControl {
        form.get_mut(path).unwrap().as_control_mut().unwrap()
    }

    #[test]
    fn untouched_invalid_input_still_counts_as_valid() {
        let mut form = signup_form();
        assert!(is_input_valid(&form, "email").unwrap());

        control_mut(&mut form, "email").mark_touched();
        assert!(!is_input_valid(&form, "email").unwrap());

        control_mut(&mut form, "email").disable();
        assert!(is_input_valid(&form, "email").unwrap());
    }

    #[test]
    fn missing_path_is_an_error_not_a_panic() {
        let form = signup_form();
        assert_eq!(is_input_valid(&form, "phone"), Err(FormError::MissingControl("phone".into())));
        assert!(is_input_rule_valid(&form, "products.7.sku", &["required"]).is_err());
    }

    #[test]
    fn rule_validity_checks_each_rule() {
        let mut form = signup_form();
        control_mut(&mut form, "email").input("not-an-email");

        assert!(is_input_rule_valid(&form, "email", &["required"]).unwrap());
        assert!(!is_input_rule_valid(&form, "email", &["email"]).unwrap());
        assert!(!is_input_rule_valid(&form, "email", &["required", "email"]).unwrap());
    }

    #[test]
    fn rule_availability_reflects_validators() {
        let form = signup_form();
        assert!(is_rule_available(&form, "email", "required"));
        assert!(is_rule_available(&form, "email", "email"));
        assert!(!is_rule_available(&form, "nickname", "required"));
        assert!(!is_rule_available(&form, "missing", "required"));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut form = signup_form();
        control_mut(&mut form, "nickname").input("ravi");
        control_mut(&mut form, "nickname").mark_touched();

        reset_form(&mut form);

        let nickname = form.get("nickname").unwrap();
        assert_eq!(nickname.value(), json!("guest"));
        assert!(!nickname.is_touched());
        assert!(!nickname.is_dirty());
    }

    #[test]
    fn file_upload_patches_first_file_or_null() {
        let mut form = signup_form();
        let files = vec![
            UploadedFile {
                name: "me.png".into(),
                size: 2048,
                content_type: Some("image/png".into()),
            },
            UploadedFile {
                name: "other.png".into(),
                size: 1,
                content_type: None,
            },
        ];

        on_file_uploaded(&mut form, &files, "avatar").unwrap();
        assert_eq!(
            form.get("avatar").unwrap().value(),
            json!({"name": "me.png", "size": 2048, "content_type": "image/png"})
        );

        on_file_uploaded(&mut form, &[], "avatar").unwrap();
        assert_eq!(form.get("avatar").unwrap().value(), Value::Null);

        assert!(on_file_uploaded(&mut form, &files, "banner").is_err());
    }

    #[test]
    fn form_array_rows() {
        let mut form = signup_form();
        assert_eq!(form_array_controls(&form, "products").unwrap().len(), 2);
        assert_eq!(form_array_controls(&form, "email"), Err(FormError::NotAnArray("email".into())));

        assert_eq!(
            remove_form_array_row(&mut form, "products", 5),
            Err(FormError::IndexOutOfRange {
                path: "products".into(),
                index: 5,
                len: 2
            })
        );
        let removed = remove_form_array_row(&mut form, "products", 0).unwrap();
        assert_eq!(removed.value(), json!({"sku": "A-1"}));

        clear_form_array(&mut form, "products").unwrap();
        assert!(form_array_controls(&form, "products").unwrap().is_empty());
    }

    #[test]
    fn index_lookup_uses_loose_equality() {
        let form = signup_form();
        assert_eq!(index_of_control(&form, "products", "sku", &json!("A-1")), Ok(Some(0)));
        assert_eq!(index_of_control(&form, "products", "sku", &json!("42")), Ok(Some(1)));
        assert_eq!(index_of_control(&form, "products", "sku", &json!("B-2")), Ok(None));
        assert_eq!(
            index_of_control(&form, "nickname", "sku", &json!(1)),
            Err(FormError::NotAnArray("nickname".into()))
        );
    }
}
