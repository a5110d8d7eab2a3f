//! DID provisioning: ordering, routing, lookups and the feature objects
//! (IVRs, forwardings, time conditions, ...) a DID can be routed to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{simple_call, Ack};
use crate::de;
use crate::encode::{FieldPolicy, Form, FormValue, ToForm};
use crate::route::{serde_choices, IvrChoice, Route};
use crate::types::ValueDescription;
use crate::{Result, VoipMsClient};

pub type DidCountry = ValueDescription;
pub type Carrier = ValueDescription;
pub type InternationalType = ValueDescription;
pub type JoinWhenEmptyType = ValueDescription;
pub type VoicemailSetup = ValueDescription;
pub type VoicemailAttachmentFormat = ValueDescription;

/// How a DID is billed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BillingType {
    #[default]
    PerMinute,
    Flat,
}

impl FormValue for BillingType {
    fn form_value(&self) -> Result<String> {
        Ok(match self {
            BillingType::PerMinute => "1",
            BillingType::Flat => "2",
        }
        .to_string())
    }
}

/// Routing and billing settings shared by every kind of DID order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub routing: Route,
    pub failover_busy: Option<Route>,
    pub failover_unreachable: Option<Route>,
    pub failover_noanswer: Option<Route>,
    /// Voicemail box, empty for none.
    pub voicemail: String,
    /// Server POP id, see `GeneralApi::get_servers_info`.
    pub pop: String,
    /// Seconds to ring before failing over.
    pub dialtime: u32,
    /// CNAM lookup on incoming calls.
    pub cnam: bool,
    pub callerid_prefix: String,
    pub note: String,
    pub billing_type: BillingType,
    /// Validate the order without placing it.
    pub test: bool,
}

impl ToForm for Order {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfEmpty, OmitIfFalse};

        form.field("routing", &self.routing, AlwaysEmit)?
            .optional("failover_busy", self.failover_busy.as_ref(), AlwaysEmit)?
            .optional("failover_unreachable", self.failover_unreachable.as_ref(), AlwaysEmit)?
            .optional("failover_noanswer", self.failover_noanswer.as_ref(), AlwaysEmit)?
            .field("voicemail", &self.voicemail, OmitIfEmpty)?
            .field("pop", &self.pop, AlwaysEmit)?
            .field("dialtime", &self.dialtime, AlwaysEmit)?
            .field("cnam", if self.cnam { "1" } else { "0" }, AlwaysEmit)?
            .field("callerid_prefix", &self.callerid_prefix, OmitIfEmpty)?
            .field("note", &self.note, OmitIfEmpty)?
            .field("billing_type", &self.billing_type, AlwaysEmit)?
            .field("test", &self.test, OmitIfFalse)?;
        Ok(())
    }
}

/// Back order of DIDs in a rate center. `state` is used for US orders,
/// `province` for Canadian ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackOrder {
    pub quantity: u32,
    pub state: String,
    pub province: String,
    pub ratecenter: String,
    pub order: Order,
}

impl ToForm for BackOrder {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfEmpty};

        form.field("quantity", &self.quantity, AlwaysEmit)?
            .field("state", &self.state, OmitIfEmpty)?
            .field("province", &self.province, OmitIfEmpty)?
            .field("ratecenter", &self.ratecenter, AlwaysEmit)?
            .record(&self.order)?;
        Ok(())
    }
}

/// Reseller billing attached to an order; leave empty for own DIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DidOrderResellerConfig {
    pub account: String,
    pub monthly: String,
    pub setup: String,
    pub minute: String,
}

impl ToForm for DidOrderResellerConfig {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        form.non_empty("account", &self.account)
            .non_empty("monthly", &self.monthly)
            .non_empty("setup", &self.setup)
            .non_empty("minute", &self.minute);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DidOrder {
    pub did: String,
    pub order: Order,
    pub reseller: DidOrderResellerConfig,
}

impl ToForm for DidOrder {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        form.text("did", &self.did)
            .record(&self.order)?
            .record(&self.reseller)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DidOrderInternationalGeographic {
    pub location_id: String,
    pub quantity: u32,
    pub order: Order,
    pub reseller: DidOrderResellerConfig,
}

impl ToForm for DidOrderInternationalGeographic {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        form.text("location_id", &self.location_id)
            .field("quantity", &self.quantity, FieldPolicy::AlwaysEmit)?
            .record(&self.order)?
            .record(&self.reseller)?;
        Ok(())
    }
}

/// connectDID: attach an existing DID to a reseller client account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectDid {
    pub did: String,
    pub account: String,
    pub monthly: String,
    pub setup: String,
    pub minute: String,
    pub next_billing: Option<NaiveDate>,
    pub dont_charge_setup: bool,
    pub dont_charge_monthly: bool,
}

impl ToForm for ConnectDid {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfFalse};

        form.text("did", &self.did)
            .text("account", &self.account)
            .text("monthly", &self.monthly)
            .text("setup", &self.setup)
            .text("minute", &self.minute)
            .optional("next_billing", self.next_billing.as_ref(), AlwaysEmit)?
            .field("dont_charge_setup", &self.dont_charge_setup, OmitIfFalse)?
            .field("dont_charge_monthly", &self.dont_charge_monthly, OmitIfFalse)?;
        Ok(())
    }
}

/// Match mode of searchDIDsCAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidSearchType {
    Starts,
    Contains,
    Ends,
}

impl DidSearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DidSearchType::Starts => "starts",
            DidSearchType::Contains => "contains",
            DidSearchType::Ends => "ends",
        }
    }
}

/// An available DID. `province*` is filled on Canadian calls, `state*` on US ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Did {
    #[serde(deserialize_with = "de::string_or_number")]
    pub did: String,
    pub ratecenter: String,
    pub province: String,
    pub province_description: String,
    pub state: String,
    pub state_description: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub perminute_monthly: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub perminute_minute: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub perminute_setup: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub flat_monthly: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub flat_minute: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub flat_setup: String,
    #[serde(deserialize_with = "de::lenient")]
    pub sms: u32,
}

/// A DID on the account with its routing, billing and SMS settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DidInfo {
    #[serde(deserialize_with = "de::string_or_number")]
    pub did: String,
    pub description: String,
    pub routing: Route,
    pub failover_busy: Route,
    pub failover_unreachable: Route,
    pub failover_noanswer: Route,
    pub voicemail: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub pop: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub dialtime: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub cnam: String,
    pub callerid_prefix: String,
    pub note: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub billing_type: String,
    pub e911: String,
    pub next_billing: String,
    pub order_date: String,
    pub reseller_account: String,
    pub reseller_next_billing: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_monthly: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_minute: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_setup: String,
    #[serde(deserialize_with = "de::lenient")]
    pub sms_available: u32,
    #[serde(deserialize_with = "de::string_or_number")]
    pub sms_enabled: String,
    pub sms_email: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub sms_email_enabled: String,
    pub sms_forward: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub sms_forward_enabled: String,
    pub sms_url_callback: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub sms_url_callback_enabled: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub sms_url_callback_retry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disa {
    #[serde(deserialize_with = "de::string_or_number")]
    pub disa: String,
    pub name: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub pin: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub digit_timeout: String,
    pub callerid_override: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forwarding {
    #[serde(deserialize_with = "de::string_or_number")]
    pub forwarding: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub phone_number: String,
    pub callerid_override: String,
    pub description: String,
    pub dtmf_digits: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub pause: String,
}

/// An IVR menu. `choices` travels as `1=account:100001;2=queue:3333`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ivr {
    #[serde(deserialize_with = "de::string_or_number")]
    pub ivr: String,
    pub name: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub recording: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub timeout: String,
    pub language: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub voicemailsetup: String,
    #[serde(with = "serde_choices")]
    pub choices: Vec<IvrChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phonebook {
    #[serde(deserialize_with = "de::string_or_number")]
    pub phonebook: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub speed_dial: String,
    pub name: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub number: String,
    pub callerid: String,
    pub note: String,
}

/// A port-in plan offered by getPortability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub title: String,
    #[serde(rename = "pricePerMonth", deserialize_with = "de::string_or_number")]
    pub price_per_month: String,
    #[serde(rename = "pricePerMin", deserialize_with = "de::string_or_number")]
    pub price_per_min: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub province: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Callback {
    #[serde(deserialize_with = "de::string_or_number")]
    pub callback: String,
    pub description: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub number: String,
    #[serde(deserialize_with = "de::lenient")]
    pub delay_before: u32,
    #[serde(deserialize_with = "de::lenient")]
    pub response_timeout: u32,
    #[serde(deserialize_with = "de::lenient")]
    pub digit_timeout: u32,
    #[serde(deserialize_with = "de::string_or_number")]
    pub callerid_number: String,
}

/// A caller-id filter. Routes are kept as the vendor's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallerIdFilter {
    #[serde(deserialize_with = "de::string_or_number")]
    pub filtering: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub callerid: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub did: String,
    pub routing: String,
    pub failover_unreachable: String,
    pub failover_busy: String,
    pub failover_noanswer: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternationalLocation {
    #[serde(deserialize_with = "de::string_or_number")]
    pub location_id: String,
    pub location_name: String,
    pub country: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub area_code: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub stock: String,
    // sic
    #[serde(rename = "montly", deserialize_with = "de::string_or_number")]
    pub monthly: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub setup: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub minute: String,
    /// Only sent by getDIDsInternationalGeographic.
    #[serde(deserialize_with = "de::string_or_number")]
    pub channels: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCenter {
    pub ratecenter: String,
    #[serde(default, deserialize_with = "de::yes_no")]
    pub available: bool,
}

/// A static member of a call queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    #[serde(deserialize_with = "de::string_or_number")]
    pub member: String,
    pub queue_name: String,
    pub name: String,
    pub account: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeCondition {
    #[serde(deserialize_with = "de::string_or_number")]
    pub timecondition: String,
    pub name: String,
    pub routingmatch: String,
    pub routingnomatch: String,
    pub starthour: String,
    pub startminute: String,
    pub endhour: String,
    pub endminute: String,
    pub weekdaystart: String,
    pub weekdayend: String,
}

#[derive(Deserialize)]
struct DidsResp {
    #[serde(default)]
    dids: Vec<Did>,
}

#[derive(Deserialize)]
struct DidInfosResp {
    #[serde(default)]
    dids: Vec<DidInfo>,
}

#[derive(Deserialize)]
struct CountriesResp {
    countries: Vec<DidCountry>,
}

#[derive(Deserialize)]
struct DisasResp {
    disa: Vec<Disa>,
}

#[derive(Deserialize)]
struct ForwardingsResp {
    forwardings: Vec<Forwarding>,
}

#[derive(Deserialize)]
struct IvrsResp {
    ivrs: Vec<Ivr>,
}

#[derive(Deserialize)]
struct TypesResp {
    types: Vec<ValueDescription>,
}

#[derive(Deserialize)]
struct PhonebooksResp {
    phonebooks: Vec<Phonebook>,
}

#[derive(Deserialize)]
struct PortabilityResp {
    portable: String,
    #[serde(default)]
    plans: Vec<Plan>,
}

#[derive(Deserialize)]
struct ProvincesResp {
    provinces: Vec<Province>,
}

#[derive(Deserialize)]
struct CallbacksResp {
    callbacks: Vec<Callback>,
}

#[derive(Deserialize)]
struct FilteringResp {
    filtering: Vec<CallerIdFilter>,
}

#[derive(Deserialize)]
struct CarriersResp {
    carriers: Vec<Carrier>,
}

#[derive(Deserialize)]
struct LocationsResp {
    locations: Vec<InternationalLocation>,
}

#[derive(Deserialize)]
struct RateCentersResp {
    ratecenters: Vec<RateCenter>,
}

#[derive(Deserialize)]
struct StatesResp {
    states: Vec<State>,
}

#[derive(Deserialize)]
struct MembersResp {
    members: Vec<Member>,
}

#[derive(Deserialize)]
struct TimeConditionsResp {
    // sic
    timeconditon: Vec<TimeCondition>,
}

#[derive(Deserialize)]
struct VoicemailSetupsResp {
    voicemailsetups: Vec<VoicemailSetup>,
}

#[derive(Deserialize)]
struct AttachmentFormatsResp {
    email_attachment_formats: Vec<VoicemailAttachmentFormat>,
}

pub struct DidsApi<'a> {
    client: &'a VoipMsClient,
}

impl<'a> DidsApi<'a> {
    pub(crate) fn new(client: &'a VoipMsClient) -> Self {
        Self { client }
    }

    /// backOrderDIDUSA. The vendor has been seen answering
    /// `invalid_ratecenter` for rate centers it lists itself; that status is
    /// returned unchanged.
    pub fn back_order_did_usa(&self, back_order: &BackOrder) -> Result<()> {
        self.client.post::<_, Ack>("backOrderDIDUSA", back_order)?;
        Ok(())
    }

    /// backOrderDIDCAN, with the same caveat as [`Self::back_order_did_usa`].
    pub fn back_order_did_can(&self, back_order: &BackOrder) -> Result<()> {
        self.client.post::<_, Ack>("backOrderDIDCAN", back_order)?;
        Ok(())
    }

    /// Documented as `CancelDID`; the endpoint answers to `cancelDID`.
    pub fn cancel_did(&self, did: &str, comment: &str, port_out: bool, test: bool) -> Result<()> {
        let mut params = Form::new();
        params
            .text("did", did)
            .flag("portout", port_out)
            .flag("test", test)
            .non_empty("cancelcomment", comment);
        self.client.get::<Ack>("cancelDID", &params)?;
        Ok(())
    }

    pub fn connect_did(&self, connect: &ConnectDid) -> Result<()> {
        self.client.get::<Ack>("connectDID", &connect.to_form()?)?;
        Ok(())
    }

    pub fn del_callback(&self, callback: &str) -> Result<()> {
        simple_call(self.client, "delCallback", "callback", callback)
    }

    pub fn del_caller_id_filtering(&self, filtering: &str) -> Result<()> {
        simple_call(self.client, "delCallerIDFiltering", "filtering", filtering)
    }

    pub fn del_client(&self, client: &str) -> Result<()> {
        simple_call(self.client, "delClient", "client", client)
    }

    pub fn del_disa(&self, disa: &str) -> Result<()> {
        simple_call(self.client, "delDISA", "disa", disa)
    }

    pub fn delete_sms(&self, id: &str) -> Result<()> {
        simple_call(self.client, "deleteSMS", "id", id)
    }

    pub fn del_forwarding(&self, forwarding: &str) -> Result<()> {
        simple_call(self.client, "delForwarding", "forwarding", forwarding)
    }

    pub fn del_ivr(&self, ivr: &str) -> Result<()> {
        simple_call(self.client, "delIVR", "ivr", ivr)
    }

    pub fn del_phonebook(&self, phonebook: &str) -> Result<()> {
        simple_call(self.client, "delPhonebook", "phonebook", phonebook)
    }

    pub fn del_queue(&self, queue: &str) -> Result<()> {
        simple_call(self.client, "delQueue", "queue", queue)
    }

    pub fn del_recording(&self, recording: &str) -> Result<()> {
        simple_call(self.client, "delRecording", "recording", recording)
    }

    pub fn del_ring_group(&self, ring_group: &str) -> Result<()> {
        simple_call(self.client, "delRingGroup", "ringGroup", ring_group)
    }

    pub fn del_sip_uri(&self, sip_uri: &str) -> Result<()> {
        simple_call(self.client, "delSIPURI", "sipuri", sip_uri)
    }

    pub fn del_static_member(&self, member: &str, queue: &str) -> Result<()> {
        let mut params = Form::new();
        params.text("member", member).text("queue", queue);
        self.client.get::<Ack>("delStaticMember", &params)?;
        Ok(())
    }

    pub fn del_time_condition(&self, time_condition: &str) -> Result<()> {
        simple_call(self.client, "delTimeCondition", "timecondition", time_condition)
    }

    pub fn get_callbacks(&self, callback: &str) -> Result<Vec<Callback>> {
        let mut params = Form::new();
        params.non_empty("callback", callback);
        let rs: CallbacksResp = self.client.get("getCallbacks", &params)?;
        Ok(rs.callbacks)
    }

    pub fn get_caller_id_filtering(&self, filtering: &str) -> Result<Vec<CallerIdFilter>> {
        let mut params = Form::new();
        params.non_empty("filtering", filtering);
        let rs: FilteringResp = self.client.get("getCallerIDFiltering", &params)?;
        Ok(rs.filtering)
    }

    pub fn get_carriers(&self, carrier: &str) -> Result<Vec<Carrier>> {
        let mut params = Form::new();
        params.non_empty("carrier", carrier);
        let rs: CarriersResp = self.client.get("getCarriers", &params)?;
        Ok(rs.carriers)
    }

    /// Countries with international DIDs of `kind` (see
    /// [`Self::get_international_types`]).
    pub fn get_did_countries(&self, country_id: &str, kind: &str) -> Result<Vec<DidCountry>> {
        let mut params = Form::new();
        params.text("type", kind).non_empty("country_id", country_id);
        let rs: CountriesResp = self.client.get("getDIDCountries", &params)?;
        Ok(rs.countries)
    }

    pub fn get_dids_can(&self, province: &str, ratecenter: &str) -> Result<Vec<Did>> {
        let mut params = Form::new();
        params
            .text("province", province)
            .non_empty("ratecenter", ratecenter);
        let rs: DidsResp = self.client.get("getDIDsCAN", &params)?;
        Ok(rs.dids)
    }

    pub fn get_dids_info(&self, client: &str, did: &str) -> Result<Vec<DidInfo>> {
        let mut params = Form::new();
        params.non_empty("client", client).non_empty("did", did);
        let rs: DidInfosResp = self.client.get("getDIDsInfo", &params)?;
        Ok(rs.dids)
    }

    pub fn get_dids_international_geographic(&self, country_id: &str) -> Result<Vec<InternationalLocation>> {
        self.international_locations("getDIDsInternationalGeographic", country_id)
    }

    pub fn get_dids_international_national(&self, country_id: &str) -> Result<Vec<InternationalLocation>> {
        self.international_locations("getDIDsInternationalNational", country_id)
    }

    pub fn get_dids_international_toll_free(&self, country_id: &str) -> Result<Vec<InternationalLocation>> {
        self.international_locations("getDIDsInternationalTollFree", country_id)
    }

    fn international_locations(&self, method: &str, country_id: &str) -> Result<Vec<InternationalLocation>> {
        let mut params = Form::new();
        params.text("country_id", country_id);
        let rs: LocationsResp = self.client.get(method, &params)?;
        Ok(rs.locations)
    }

    pub fn get_dids_usa(&self, state: &str, ratecenter: &str) -> Result<Vec<Did>> {
        let mut params = Form::new();
        params.text("state", state).non_empty("ratecenter", ratecenter);
        let rs: DidsResp = self.client.get("getDIDsUSA", &params)?;
        Ok(rs.dids)
    }

    pub fn get_disas(&self, disa: &str) -> Result<Vec<Disa>> {
        let mut params = Form::new();
        params.non_empty("disa", disa);
        let rs: DisasResp = self.client.get("getDISAs", &params)?;
        Ok(rs.disa)
    }

    pub fn get_forwardings(&self, forwarding: &str) -> Result<Vec<Forwarding>> {
        let mut params = Form::new();
        params.non_empty("forwarding", forwarding);
        let rs: ForwardingsResp = self.client.get("getForwardings", &params)?;
        Ok(rs.forwardings)
    }

    pub fn get_international_types(&self, kind: &str) -> Result<Vec<InternationalType>> {
        let mut params = Form::new();
        params.non_empty("type", kind);
        let rs: TypesResp = self.client.get("getInternationalTypes", &params)?;
        Ok(rs.types)
    }

    pub fn get_ivrs(&self, ivr: &str) -> Result<Vec<Ivr>> {
        let mut params = Form::new();
        params.non_empty("ivr", ivr);
        let rs: IvrsResp = self.client.get("getIVRs", &params)?;
        Ok(rs.ivrs)
    }

    pub fn get_join_when_empty_types(&self, kind: &str) -> Result<Vec<JoinWhenEmptyType>> {
        let mut params = Form::new();
        params.non_empty("type", kind);
        let rs: TypesResp = self.client.get("getJoinWhenEmptyTypes", &params)?;
        Ok(rs.types)
    }

    pub fn get_phonebook(&self, phonebook: &str, name: &str) -> Result<Vec<Phonebook>> {
        let mut params = Form::new();
        params.non_empty("phonebook", phonebook).non_empty("name", name);
        let rs: PhonebooksResp = self.client.get("getPhonebook", &params)?;
        Ok(rs.phonebooks)
    }

    /// Whether `did` can be ported in, and the plans offered for it.
    pub fn get_portability(&self, did: &str) -> Result<(bool, Vec<Plan>)> {
        let mut params = Form::new();
        params.text("did", did);
        let rs: PortabilityResp = self.client.get("getPortability", &params)?;
        Ok((rs.portable == "yes", rs.plans))
    }

    pub fn get_provinces(&self) -> Result<Vec<Province>> {
        let rs: ProvincesResp = self.client.get("getProvinces", &Form::new())?;
        Ok(rs.provinces)
    }

    pub fn get_rate_centers_can(&self, province: &str) -> Result<Vec<RateCenter>> {
        let mut params = Form::new();
        params.text("province", province);
        let rs: RateCentersResp = self.client.get("getRateCentersCAN", &params)?;
        Ok(rs.ratecenters)
    }

    pub fn get_rate_centers_usa(&self, state: &str) -> Result<Vec<RateCenter>> {
        let mut params = Form::new();
        params.text("state", state);
        let rs: RateCentersResp = self.client.get("getRateCentersUSA", &params)?;
        Ok(rs.ratecenters)
    }

    pub fn get_states(&self) -> Result<Vec<State>> {
        let rs: StatesResp = self.client.get("getStates", &Form::new())?;
        Ok(rs.states)
    }

    pub fn get_static_members(&self, queue: &str, member: &str) -> Result<Vec<Member>> {
        let mut params = Form::new();
        params.text("queue", queue).non_empty("member", member);
        let rs: MembersResp = self.client.get("getStaticMembers", &params)?;
        Ok(rs.members)
    }

    pub fn get_time_conditions(&self, time_condition: &str) -> Result<Vec<TimeCondition>> {
        let mut params = Form::new();
        params.non_empty("timecondition", time_condition);
        let rs: TimeConditionsResp = self.client.get("getTimeConditions", &params)?;
        Ok(rs.timeconditon)
    }

    pub fn get_voicemail_setups(&self, voicemail_setup: &str) -> Result<Vec<VoicemailSetup>> {
        let mut params = Form::new();
        params.non_empty("voicemailsetup", voicemail_setup);
        let rs: VoicemailSetupsResp = self.client.get("getVoicemailSetups", &params)?;
        Ok(rs.voicemailsetups)
    }

    pub fn get_voicemail_attachment_formats(&self, format: &str) -> Result<Vec<VoicemailAttachmentFormat>> {
        let mut params = Form::new();
        params.non_empty("email_attachment_format", format);
        let rs: AttachmentFormatsResp = self.client.get("getVoicemailAttachmentFormats", &params)?;
        Ok(rs.email_attachment_formats)
    }

    pub fn order_did(&self, order: &DidOrder) -> Result<()> {
        self.client.post::<_, Ack>("orderDID", order)?;
        Ok(())
    }

    pub fn order_did_international_geographic(&self, order: &DidOrderInternationalGeographic) -> Result<()> {
        self.client.post::<_, Ack>("orderDIDInternationalGeographic", order)?;
        Ok(())
    }

    /// searchDIDsCAN; an empty `province` searches all provinces.
    pub fn search_dids_can(&self, province: &str, kind: DidSearchType, query: &str) -> Result<Vec<Did>> {
        let mut params = Form::new();
        params
            .text("type", kind.as_str())
            .text("query", query)
            .non_empty("province", province);
        let rs: DidsResp = self.client.get("searchDIDsCAN", &params)?;
        Ok(rs.dids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            routing: Route::account("100001_VoIP"),
            failover_busy: Some(Route::vm("101")),
            pop: "3".into(),
            dialtime: 60,
            cnam: true,
            billing_type: BillingType::Flat,
            ..Order::default()
        }
    }

    #[test]
    fn back_order_flattens_the_order() {
        let rq = BackOrder {
            quantity: 1,
            state: "AL".into(),
            ratecenter: "ALBERTVILLE".into(),
            order: order(),
            ..BackOrder::default()
        };
        let form = rq.to_form().unwrap();
        let names: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec![
                "quantity",
                "state",
                "ratecenter",
                "routing",
                "failover_busy",
                "pop",
                "dialtime",
                "cnam",
                "billing_type"
            ]
        );
        assert_eq!(form.get("routing"), Some("account:100001_VoIP"));
        assert_eq!(form.get("failover_busy"), Some("vm:101"));
        assert_eq!(form.get("cnam"), Some("1"));
        assert_eq!(form.get("billing_type"), Some("2"));
    }

    #[test]
    fn target_less_routes_are_sent_with_the_colon() {
        let mut rq = DidOrder {
            did: "5551234567".into(),
            order: order(),
            ..DidOrder::default()
        };
        rq.order.failover_noanswer = Some(Route::none());
        rq.order.test = true;
        let form = rq.to_form().unwrap();
        assert_eq!(form.get("failover_noanswer"), Some("none:"));
        assert_eq!(form.get("test"), Some("true"));
        assert!(!form.contains("account"));
    }

    #[test]
    fn reseller_config_rides_along_when_set() {
        let rq = DidOrderInternationalGeographic {
            location_id: "42".into(),
            quantity: 2,
            order: order(),
            reseller: DidOrderResellerConfig {
                account: "100001_client".into(),
                monthly: "4.95".into(),
                ..DidOrderResellerConfig::default()
            },
        };
        let form = rq.to_form().unwrap();
        assert_eq!(form.get("location_id"), Some("42"));
        assert_eq!(form.get("quantity"), Some("2"));
        assert_eq!(form.get("account"), Some("100001_client"));
        assert_eq!(form.get("monthly"), Some("4.95"));
        assert!(!form.contains("setup"));
    }

    #[test]
    fn connect_did_sends_optional_parts_only_when_set() {
        let mut rq = ConnectDid {
            did: "5551234567".into(),
            account: "100001_client".into(),
            ..ConnectDid::default()
        };
        let form = rq.to_form().unwrap();
        assert_eq!(form.get("monthly"), Some(""));
        assert!(!form.contains("next_billing"));
        assert!(!form.contains("dont_charge_setup"));

        rq.next_billing = NaiveDate::from_ymd_opt(2017, 1, 1);
        rq.dont_charge_monthly = true;
        let form = rq.to_form().unwrap();
        assert_eq!(form.get("next_billing"), Some("2017-01-01"));
        assert_eq!(form.get("dont_charge_monthly"), Some("true"));
    }

    #[test]
    fn rate_center_availability_is_yes_no() {
        let rows: Vec<RateCenter> = serde_json::from_str(
            r#"[{"ratecenter":"AUSTIN","available":"yes"},{"ratecenter":"WACO","available":"no"}]"#,
        )
        .unwrap();
        assert!(rows[0].available);
        assert!(!rows[1].available);
    }

    #[test]
    fn ivr_choices_decode_into_routes() {
        let ivr: Ivr = serde_json::from_str(
            r#"{"ivr":"3","name":"Main","recording":"1","timeout":"10","language":"en",
                "voicemailsetup":"1","choices":"1=account:100001;2=queue:3333"}"#,
        )
        .unwrap();
        assert_eq!(ivr.choices.len(), 2);
        assert_eq!(ivr.choices[0].dtmf_tone, "1");
        assert_eq!(ivr.choices[0].route, Route::account("100001"));
        assert_eq!(ivr.choices[1].route.to_string(), "queue:3333");
    }

    #[test]
    fn misspelled_vendor_keys_are_matched() {
        let location: InternationalLocation =
            serde_json::from_str(r#"{"location_id":"7","montly":"1.50","setup":"0"}"#).unwrap();
        assert_eq!(location.monthly, "1.50");

        let plan: Plan =
            serde_json::from_str(r#"{"title":"Flat","pricePerMonth":"4.95","pricePerMin":0.01}"#)
                .unwrap();
        assert_eq!(plan.price_per_month, "4.95");
        assert_eq!(plan.price_per_min, "0.01");
    }

    #[test]
    fn did_info_accepts_empty_failovers() {
        let info: DidInfo = serde_json::from_str(
            r#"{"did":"5551234567","routing":"account:100001","failover_busy":"",
                "failover_unreachable":"none:","failover_noanswer":"fwd:2","sms_available":"1"}"#,
        )
        .unwrap();
        assert!(info.failover_busy.is_none());
        assert!(info.failover_unreachable.is_none());
        assert_eq!(info.failover_noanswer, Route::fwd("2"));
        assert_eq!(info.sms_available, 1);
    }
}
