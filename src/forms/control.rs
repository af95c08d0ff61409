//! Form control tree: single controls, groups and arrays

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ControlPath, FormError};

/// Validation rule attached to a control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
}

impl Validator {
    /// Error key reported when this rule fails
    pub fn key(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength(_) => "minlength",
            Self::MaxLength(_) => "maxlength",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Email => "email",
        }
    }

    /// Whether `value` satisfies the rule. Only `Required` rejects empty values.
    pub fn check(&self, value: &Value) -> bool {
        if is_empty(value) {
            return !matches!(self, Self::Required);
        }

        match self {
            Self::Required => true,
            Self::MinLength(min) => length(value).map_or(true, |len| len >= *min),
            Self::MaxLength(max) => length(value).map_or(true, |len| len <= *max),
            Self::Min(min) => number(value).map_or(true, |n| n >= *min),
            Self::Max(max) => number(value).map_or(true, |n| n <= *max),
            Self::Email => value.as_str().map_or(false, looks_like_email),
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}

/// Validation status of a control or container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlStatus {
    Valid,
    Invalid,
    Disabled,
}

/// A single input
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    value: Value,
    initial: Value,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
    disabled: bool,
}

impl FormControl {
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            initial: value.clone(),
            value,
            validators: Vec::new(),
            touched: false,
            dirty: false,
            disabled: false,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Programmatic update; leaves interaction flags alone
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Update as if typed by the user
    pub fn input(&mut self, value: impl Into<Value>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Keys of the failing rules; empty while disabled
    pub fn errors(&self) -> Vec<&'static str> {
        if self.disabled {
            return Vec::new();
        }
        self.validators
            .iter()
            .filter(|validator| !validator.check(&self.value))
            .map(Validator::key)
            .collect()
    }

    pub fn has_error(&self, rule: &str) -> bool {
        self.errors().contains(&rule)
    }

    pub fn status(&self) -> ControlStatus {
        if self.disabled {
            ControlStatus::Disabled
        } else if self.errors().is_empty() {
            ControlStatus::Valid
        } else {
            ControlStatus::Invalid
        }
    }

    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.touched = false;
        self.dirty = false;
    }
}

/// Named controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormGroup {
    controls: BTreeMap<String, AbstractControl>,
}

/// Ordered, index-addressed controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormArray {
    controls: Vec<AbstractControl>,
}

/// Any node of the form tree
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractControl {
    Control(FormControl),
    Group(FormGroup),
    Array(FormArray),
}

impl From<FormControl> for AbstractControl {
    fn from(control: FormControl) -> Self {
        Self::Control(control)
    }
}

impl From<FormGroup> for AbstractControl {
    fn from(group: FormGroup) -> Self {
        Self::Group(group)
    }
}

impl From<FormArray> for AbstractControl {
    fn from(array: FormArray) -> Self {
        Self::Array(array)
    }
}

impl AbstractControl {
    fn children(&self) -> Box<dyn Iterator<Item = &AbstractControl> + '_> {
        match self {
            Self::Control(_) => Box::new(std::iter::empty()),
            Self::Group(group) => Box::new(group.controls.values()),
            Self::Array(array) => Box::new(array.controls.iter()),
        }
    }

    fn children_mut(&mut self) -> Box<dyn Iterator<Item = &mut AbstractControl> + '_> {
        match self {
            Self::Control(_) => Box::new(std::iter::empty()),
            Self::Group(group) => Box::new(group.controls.values_mut()),
            Self::Array(array) => Box::new(array.controls.iter_mut()),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::Control(control) => control.value.clone(),
            Self::Group(group) => group.value(),
            Self::Array(array) => array.value(),
        }
    }

    /// Containers are disabled only when every child is disabled
    pub fn status(&self) -> ControlStatus {
        if let Self::Control(control) = self {
            return control.status();
        }

        let statuses: Vec<ControlStatus> = self.children().map(AbstractControl::status).collect();
        if !statuses.is_empty() && statuses.iter().all(|s| *s == ControlStatus::Disabled) {
            ControlStatus::Disabled
        } else if statuses.contains(&ControlStatus::Invalid) {
            ControlStatus::Invalid
        } else {
            ControlStatus::Valid
        }
    }

    pub fn is_touched(&self) -> bool {
        match self {
            Self::Control(control) => control.touched,
            _ => self.children().any(AbstractControl::is_touched),
        }
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            Self::Control(control) => control.dirty,
            _ => self.children().any(AbstractControl::is_dirty),
        }
    }

    /// Containers carry no validators of their own
    pub fn has_error(&self, rule: &str) -> bool {
        match self {
            Self::Control(control) => control.has_error(rule),
            _ => false,
        }
    }

    pub fn has_validator(&self, rule: &str) -> bool {
        match self {
            Self::Control(control) => control.validators.iter().any(|v| v.key() == rule),
            _ => false,
        }
    }

    pub fn mark_untouched(&mut self) {
        match self {
            Self::Control(control) => control.touched = false,
            _ => self.children_mut().for_each(AbstractControl::mark_untouched),
        }
    }

    pub fn mark_pristine(&mut self) {
        match self {
            Self::Control(control) => control.dirty = false,
            _ => self.children_mut().for_each(AbstractControl::mark_pristine),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Control(control) => control.reset(),
            _ => self.children_mut().for_each(AbstractControl::reset),
        }
    }

    /// Merge `value` into this node; keys or indices with no matching
    /// control are ignored
    pub fn patch(&mut self, value: &Value) {
        match (self, value) {
            (Self::Control(control), value) => control.set_value(value.clone()),
            (Self::Group(group), Value::Object(fields)) => group.patch_value(fields),
            (Self::Array(array), Value::Array(items)) => {
                for (control, item) in array.controls.iter_mut().zip(items) {
                    control.patch(item);
                }
            }
            _ => {}
        }
    }

    pub fn as_control(&self) -> Option<&FormControl> {
        match self {
            Self::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_control_mut(&mut self) -> Option<&mut FormControl> {
        match self {
            Self::Control(control) => Some(control),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&FormArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut FormArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    fn child(&self, segment: &str) -> Option<&AbstractControl> {
        match self {
            Self::Control(_) => None,
            Self::Group(group) => group.controls.get(segment),
            Self::Array(array) => segment.parse::<usize>().ok().and_then(|i| array.controls.get(i)),
        }
    }

    fn child_mut(&mut self, segment: &str) -> Option<&mut AbstractControl> {
        match self {
            Self::Control(_) => None,
            Self::Group(group) => group.controls.get_mut(segment),
            Self::Array(array) => segment.parse::<usize>().ok().and_then(|i| array.controls.get_mut(i)),
        }
    }
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, name: impl Into<String>, control: impl Into<AbstractControl>) -> Self {
        self.controls.insert(name.into(), control.into());
        self
    }

    pub fn controls(&self) -> &BTreeMap<String, AbstractControl> {
        &self.controls
    }

    /// Resolve a dotted path such as `address.city` or `items.0.qty`
    pub fn get(&self, path: &str) -> Result<&AbstractControl, FormError> {
        let path = ControlPath::parse(path)?;
        let segments = path.segments();

        let mut current = self
            .controls
            .get(&segments[0])
            .ok_or_else(|| FormError::MissingControl(path.prefix(1)))?;

        for (depth, segment) in segments.iter().enumerate().skip(1) {
            if matches!(current, AbstractControl::Control(_)) {
                return Err(FormError::NotAContainer(path.prefix(depth)));
            }
            current = current
                .child(segment)
                .ok_or_else(|| FormError::MissingControl(path.prefix(depth + 1)))?;
        }

        Ok(current)
    }

    pub fn get_mut(&mut self, path: &str) -> Result<&mut AbstractControl, FormError> {
        let path = ControlPath::parse(path)?;
        let segments = path.segments();

        let mut current = self
            .controls
            .get_mut(&segments[0])
            .ok_or_else(|| FormError::MissingControl(path.prefix(1)))?;

        for (depth, segment) in segments.iter().enumerate().skip(1) {
            if matches!(current, AbstractControl::Control(_)) {
                return Err(FormError::NotAContainer(path.prefix(depth)));
            }
            current = current
                .child_mut(segment)
                .ok_or_else(|| FormError::MissingControl(path.prefix(depth + 1)))?;
        }

        Ok(current)
    }

    pub fn value(&self) -> Value {
        let fields: Map<String, Value> = self
            .controls
            .iter()
            .map(|(name, control)| (name.clone(), control.value()))
            .collect();
        Value::Object(fields)
    }

    pub fn patch_value(&mut self, fields: &Map<String, Value>) {
        for (name, value) in fields {
            if let Some(control) = self.controls.get_mut(name) {
                control.patch(value);
            }
        }
    }

    /// Restore initial values and mark every control untouched and pristine
    pub fn reset(&mut self) {
        for control in self.controls.values_mut() {
            control.reset();
        }
    }
}

impl FormArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(mut self, control: impl Into<AbstractControl>) -> Self {
        self.controls.push(control.into());
        self
    }

    pub fn push(&mut self, control: impl Into<AbstractControl>) {
        self.controls.push(control.into());
    }

    pub fn controls(&self) -> &[AbstractControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<AbstractControl> {
        (index < self.controls.len()).then(|| self.controls.remove(index))
    }

    pub fn clear(&mut self) {
        self.controls.clear();
    }

    pub fn value(&self) -> Value {
        Value::Array(self.controls.iter().map(AbstractControl::value).collect())
    }
}
