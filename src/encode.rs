//! Request encoding: typed records to an ordered list of wire fields.
//!
//! Every request type implements [`ToForm`] by hand and writes its fields
//! through [`Form::field`], which applies one [`FieldPolicy`] per field. The
//! resulting [`Form`] is transport-agnostic; the client turns it into query
//! pairs for GET calls or a multipart body for POST calls.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Result, VoipMsError};

/// Wire format of plain dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format of date-times.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// When a field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Written even when the value is empty.
    AlwaysEmit,
    /// Written as `true` when true, not written at all otherwise.
    OmitIfFalse,
    /// Skipped when the value's text is empty.
    OmitIfEmpty,
}

/// A value that has a single-field text form on the wire.
pub trait FormValue {
    fn form_value(&self) -> Result<String>;
}

impl FormValue for str {
    fn form_value(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl FormValue for String {
    fn form_value(&self) -> Result<String> {
        Ok(self.clone())
    }
}

impl FormValue for bool {
    fn form_value(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

macro_rules! int_form_value {
    ($($t:ty),*) => {
        $(impl FormValue for $t {
            fn form_value(&self) -> Result<String> {
                Ok(self.to_string())
            }
        })*
    };
}

int_form_value!(u8, u16, u32, u64, usize, i32, i64);

/// Amounts go out with six decimals, the way the vendor echoes them back.
impl FormValue for f64 {
    fn form_value(&self) -> Result<String> {
        if !self.is_finite() {
            return Err(VoipMsError::Encoding(format!(
                "cannot encode non-finite amount {self}"
            )));
        }
        Ok(format!("{self:.6}"))
    }
}

impl FormValue for NaiveDate {
    fn form_value(&self) -> Result<String> {
        Ok(self.format(DATE_FORMAT).to_string())
    }
}

impl FormValue for NaiveDateTime {
    fn form_value(&self) -> Result<String> {
        Ok(self.format(DATE_TIME_FORMAT).to_string())
    }
}

impl<T: FormValue + ?Sized> FormValue for &T {
    fn form_value(&self) -> Result<String> {
        (**self).form_value()
    }
}

/// A request record that can write itself into a [`Form`].
///
/// Embedded records flatten by calling [`Form::record`] from inside the
/// outer impl, so their fields land at the same level.
pub trait ToForm {
    fn write_form(&self, form: &mut Form) -> Result<()>;

    fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        self.write_form(&mut form)?;
        Ok(form)
    }
}

/// Ordered wire fields. Writing a name twice replaces the earlier value in
/// place, so the last write wins and order stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` under `name` according to `policy`.
    pub fn field<V: FormValue + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
        policy: FieldPolicy,
    ) -> Result<&mut Self> {
        let value = value.form_value()?;
        let skip = match policy {
            FieldPolicy::AlwaysEmit => false,
            FieldPolicy::OmitIfFalse => value != "true",
            FieldPolicy::OmitIfEmpty => value.is_empty(),
        };
        if !skip {
            self.insert(name, value);
        }
        Ok(self)
    }

    /// Like [`Form::field`], but `None` is never written.
    pub fn optional<V: FormValue>(
        &mut self,
        name: &str,
        value: Option<&V>,
        policy: FieldPolicy,
    ) -> Result<&mut Self> {
        match value {
            Some(value) => self.field(name, value, policy),
            None => Ok(self),
        }
    }

    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.insert(name, value.to_string());
        self
    }

    /// Optional string filter: written only when non-empty.
    pub fn non_empty(&mut self, name: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.insert(name, value.to_string());
        }
        self
    }

    /// Boolean switch: `name=true` when set, absent otherwise.
    pub fn flag(&mut self, name: &str, value: bool) -> &mut Self {
        if value {
            self.insert(name, "true".to_string());
        }
        self
    }

    /// Numeric filter where zero means "all": written only when positive.
    pub fn positive(&mut self, name: &str, value: u32) -> &mut Self {
        if value > 0 {
            self.insert(name, value.to_string());
        }
        self
    }

    /// Flatten a nested record into this form.
    pub fn record<R: ToForm + ?Sized>(&mut self, record: &R) -> Result<&mut Self> {
        record.write_form(self)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, name: &str, value: String) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }
}

impl ToForm for Form {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        for (name, value) in &self.fields {
            form.insert(name, value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inner {
        pop: String,
        note: String,
    }

    impl ToForm for Inner {
        fn write_form(&self, form: &mut Form) -> Result<()> {
            form.field("pop", &self.pop, FieldPolicy::AlwaysEmit)?
                .field("note", &self.note, FieldPolicy::OmitIfEmpty)?;
            Ok(())
        }
    }

    struct Outer {
        did: String,
        test: bool,
        inner: Inner,
    }

    impl ToForm for Outer {
        fn write_form(&self, form: &mut Form) -> Result<()> {
            form.field("did", &self.did, FieldPolicy::AlwaysEmit)?
                .record(&self.inner)?
                .field("test", &self.test, FieldPolicy::OmitIfFalse)?;
            Ok(())
        }
    }

    #[test]
    fn always_emit_writes_empty_values() {
        let mut form = Form::new();
        form.field("a", "", FieldPolicy::AlwaysEmit).unwrap();
        form.field("b", "x", FieldPolicy::AlwaysEmit).unwrap();
        form.field("c", &false, FieldPolicy::AlwaysEmit).unwrap();
        assert_eq!(form.get("a"), Some(""));
        assert_eq!(form.get("b"), Some("x"));
        assert_eq!(form.get("c"), Some("false"));
    }

    #[test]
    fn omit_if_false_only_writes_true() {
        let mut form = Form::new();
        form.field("on", &true, FieldPolicy::OmitIfFalse).unwrap();
        form.field("off", &false, FieldPolicy::OmitIfFalse).unwrap();
        form.flag("also_on", true).flag("also_off", false);
        assert_eq!(form.get("on"), Some("true"));
        assert_eq!(form.get("also_on"), Some("true"));
        assert!(!form.contains("off"));
        assert!(!form.contains("also_off"));
    }

    #[test]
    fn omit_if_empty_skips_only_empty_text() {
        let mut form = Form::new();
        form.field("empty", "", FieldPolicy::OmitIfEmpty).unwrap();
        form.field("full", "ulaw;g729", FieldPolicy::OmitIfEmpty)
            .unwrap();
        form.non_empty("also_empty", "").non_empty("spaced", " ");
        assert!(!form.contains("empty"));
        assert!(!form.contains("also_empty"));
        assert_eq!(form.get("full"), Some("ulaw;g729"));
        assert_eq!(form.get("spaced"), Some(" "));
    }

    #[test]
    fn optional_none_is_never_written() {
        let mut form = Form::new();
        let date = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap();
        form.optional::<NaiveDate>("next_billing", None, FieldPolicy::AlwaysEmit)
            .unwrap();
        assert!(form.is_empty());
        form.optional("next_billing", Some(&date), FieldPolicy::AlwaysEmit)
            .unwrap();
        assert_eq!(form.get("next_billing"), Some("2016-11-07"));
    }

    #[test]
    fn positive_filter_skips_zero() {
        let mut form = Form::new();
        form.positive("type", 0).positive("device_type", 2);
        assert!(!form.contains("type"));
        assert_eq!(form.get("device_type"), Some("2"));
    }

    #[test]
    fn nested_records_flatten_in_declaration_order() {
        let outer = Outer {
            did: "5551234567".into(),
            test: true,
            inner: Inner {
                pop: "3".into(),
                note: String::new(),
            },
        };
        let form = outer.to_form().unwrap();
        let names: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["did", "pop", "test"]);
    }

    #[test]
    fn colliding_names_keep_last_write_in_first_position() {
        let mut form = Form::new();
        form.text("account", "first").text("pop", "1").text("account", "second");
        assert_eq!(form.len(), 2);
        assert_eq!(form.fields()[0], ("account".to_string(), "second".to_string()));
    }

    #[test]
    fn amounts_use_six_decimals_and_reject_non_finite() {
        assert_eq!(12.5f64.form_value().unwrap(), "12.500000");
        let err = f64::NAN.form_value().unwrap_err();
        assert!(matches!(err, VoipMsError::Encoding(_)));
        let mut form = Form::new();
        assert!(form
            .field("charge", &f64::INFINITY, FieldPolicy::AlwaysEmit)
            .is_err());
        assert!(form.is_empty());
    }

    #[test]
    fn date_times_use_vendor_format() {
        let at = NaiveDate::from_ymd_opt(2016, 10, 26)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();
        assert_eq!(at.form_value().unwrap(), "2016-10-26 08:05:00");
    }
}
