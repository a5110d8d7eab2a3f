//! Call detail records and the filters used to query them.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::de;
use crate::encode::{FieldPolicy, Form, ToForm};
use crate::types::ValueDescription;
use crate::{Result, VoipMsClient, VoipMsError};

pub type CallAccount = ValueDescription;
pub type CallBilling = ValueDescription;
pub type CallType = ValueDescription;

/// Which dispositions to include. Unset means "leave out".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStatus {
    pub answered: bool,
    pub no_answer: bool,
    pub busy: bool,
    pub failed: bool,
}

impl CallStatus {
    pub fn all() -> Self {
        Self {
            answered: true,
            no_answer: true,
            busy: true,
            failed: true,
        }
    }
}

/// Arguments of getCDR. Dates and timezone are required; the rest narrow
/// the result and are sent as given.
#[derive(Debug, Clone, Default)]
pub struct CdrQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// The vendor wants an hour offset; it is taken from this zone at call time.
    pub timezone: Option<Tz>,
    pub call_status: CallStatus,
    /// A value from [`CdrApi::get_call_types`], e.g. `all`.
    pub call_type: String,
    /// A value from [`CdrApi::get_call_billing`], e.g. `all`.
    pub call_billing: String,
    /// A value from [`CdrApi::get_call_accounts`], e.g. `all`.
    pub account: String,
}

impl CdrQuery {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, timezone: Tz) -> Self {
        Self {
            date_from: Some(date_from),
            date_to: Some(date_to),
            timezone: Some(timezone),
            call_status: CallStatus::all(),
            call_type: "all".into(),
            call_billing: "all".into(),
            account: "all".into(),
        }
    }

    /// Fails with the first missing required argument.
    pub fn validate(&self) -> Result<()> {
        if self.date_from.is_none() {
            return Err(VoipMsError::Validation("dateFrom is required!".into()));
        }
        if self.date_to.is_none() {
            return Err(VoipMsError::Validation("dateTo is required!".into()));
        }
        if self.timezone.is_none() {
            return Err(VoipMsError::Validation("timezone is required!".into()));
        }
        Ok(())
    }

    fn write_at(&self, form: &mut Form, now: DateTime<Utc>) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfEmpty};

        self.validate()?;
        let status = self.call_status;
        form.optional("date_from", self.date_from.as_ref(), AlwaysEmit)?
            .optional("date_to", self.date_to.as_ref(), AlwaysEmit)?;
        if let Some(tz) = &self.timezone {
            form.text("timezone", &timezone_param(tz, now));
        }
        form.field("answered", if status.answered { "1" } else { "" }, OmitIfEmpty)?
            .field("noanswer", if status.no_answer { "1" } else { "" }, OmitIfEmpty)?
            .field("busy", if status.busy { "1" } else { "" }, OmitIfEmpty)?
            .field("failed", if status.failed { "1" } else { "" }, OmitIfEmpty)?
            .field("calltype", &self.call_type, AlwaysEmit)?
            .field("callbilling", &self.call_billing, AlwaysEmit)?
            .field("account", &self.account, AlwaysEmit)?;
        Ok(())
    }
}

impl ToForm for CdrQuery {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        self.write_at(form, Utc::now())
    }
}

/// The zone's UTC offset at `at`, in hours: `-7`, `5.5`, `5.75`.
///
/// Keeps up to two decimals; `5.75` is sent as is, never rounded to two
/// significant digits (`5.8`).
pub fn timezone_param(tz: &Tz, at: DateTime<Utc>) -> String {
    let seconds = tz
        .offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc();
    if seconds % 3600 == 0 {
        return (seconds / 3600).to_string();
    }
    let hours = format!("{:.2}", f64::from(seconds) / 3600.0);
    hours.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One call detail record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cdr {
    #[serde(deserialize_with = "de::date_time")]
    pub date: NaiveDateTime,
    #[serde(rename = "callerid")]
    pub caller_id: String,
    pub destination: String,
    pub description: String,
    pub account: String,
    pub disposition: String,
    #[serde(deserialize_with = "de::hms_duration")]
    pub duration: Duration,
    #[serde(default, deserialize_with = "de::lenient")]
    pub seconds: u64,
    #[serde(default, deserialize_with = "de::lenient")]
    pub rate: f64,
    #[serde(default, deserialize_with = "de::lenient")]
    pub total: f64,
    #[serde(rename = "uniqueid", deserialize_with = "de::string_or_number")]
    pub unique_id: String,
}

#[derive(Deserialize)]
struct CallAccountsResp {
    accounts: Vec<CallAccount>,
}

#[derive(Deserialize)]
struct CallBillingResp {
    call_billing: Vec<CallBilling>,
}

#[derive(Deserialize)]
struct CallTypesResp {
    call_types: Vec<CallType>,
}

#[derive(Deserialize)]
struct CdrResp {
    cdr: Vec<Cdr>,
}

pub struct CdrApi<'a> {
    client: &'a VoipMsClient,
}

impl<'a> CdrApi<'a> {
    pub(crate) fn new(client: &'a VoipMsClient) -> Self {
        Self { client }
    }

    /// Accounts CDRs can be filtered by; `client` narrows to a reseller client.
    pub fn get_call_accounts(&self, client: &str) -> Result<Vec<CallAccount>> {
        let mut params = Form::new();
        params.non_empty("client", client);
        let rs: CallAccountsResp = self.client.get("getCallAccounts", &params)?;
        Ok(rs.accounts)
    }

    pub fn get_call_billing(&self) -> Result<Vec<CallBilling>> {
        let rs: CallBillingResp = self.client.get("getCallBilling", &Form::new())?;
        Ok(rs.call_billing)
    }

    pub fn get_call_types(&self, client: &str) -> Result<Vec<CallType>> {
        let mut params = Form::new();
        params.non_empty("client", client);
        let rs: CallTypesResp = self.client.get("getCallTypes", &params)?;
        Ok(rs.call_types)
    }

    /// getCDR. Missing dates or timezone fail before anything is sent.
    pub fn get_cdr(&self, query: &CdrQuery) -> Result<Vec<Cdr>> {
        let params = query.to_form()?;
        let rs: CdrResp = self.client.get("getCDR", &params)?;
        Ok(rs.cdr)
    }
}
