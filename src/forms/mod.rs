//! Typed form module
//!
//! A small form-control tree with validators and checked path lookup, plus
//! the helpers the panel uses to validate, reset and patch its forms.

pub mod control;
pub mod error;
pub mod ops;
pub mod path;

pub use control::{AbstractControl, ControlStatus, FormArray, FormControl, FormGroup, Validator};
pub use error::FormError;
pub use ops::{
    clear_form_array, form_array_controls, index_of_control, is_input_rule_valid, is_input_valid,
    is_rule_available, on_file_uploaded, remove_form_array_row, reset_form, UploadedFile,
};
pub use path::ControlPath;
