//! Accounts: sub-account management and the lookup tables its fields use.

use serde::{Deserialize, Serialize};

use super::{require, Ack};
use crate::de;
use crate::encode::{FieldPolicy, Form, ToForm};
use crate::types::{Server, ValueDescription};
use crate::{Result, VoipMsClient};

pub type Codec = ValueDescription;
pub type AuthType = ValueDescription;
pub type DeviceType = ValueDescription;
pub type DtmfMode = ValueDescription;
pub type LockInternational = ValueDescription;
pub type MusicOnHold = ValueDescription;
pub type Nat = ValueDescription;
pub type Protocol = ValueDescription;
pub type EstimatedHoldTime = ValueDescription;
pub type RouteOption = ValueDescription;

/// A sub-account. Field values are the vendor's codes (see the lookup
/// endpoints on [`AccountsApi`]); `id` and `account` are assigned by
/// [`AccountsApi::create_sub_account`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub account: String,
    pub username: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub protocol: String,
    pub description: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub auth_type: String,
    pub password: String,
    pub ip: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub device_type: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub callerid_number: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub canada_routing: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub lock_international: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub international_route: String,
    pub music_on_hold: String,
    pub allowed_codecs: String,
    pub dtmf_mode: String,
    pub nat: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub internal_extension: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub internal_voicemail: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub internal_dialtime: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_client: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_package: String,
    pub reseller_nextbilling: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub reseller_chargesetup: String,
}

impl ToForm for Account {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfEmpty};

        form.field("id", &self.id, OmitIfEmpty)?
            .field("account", &self.account, OmitIfEmpty)?
            .field("username", &self.username, AlwaysEmit)?
            .field("protocol", &self.protocol, AlwaysEmit)?
            .field("description", &self.description, OmitIfEmpty)?
            .field("auth_type", &self.auth_type, AlwaysEmit)?
            .field("password", &self.password, OmitIfEmpty)?
            .field("ip", &self.ip, OmitIfEmpty)?
            .field("device_type", &self.device_type, AlwaysEmit)?
            .field("callerid_number", &self.callerid_number, OmitIfEmpty)?
            .field("canada_routing", &self.canada_routing, OmitIfEmpty)?
            .field("lock_international", &self.lock_international, AlwaysEmit)?
            .field("international_route", &self.international_route, AlwaysEmit)?
            .field("music_on_hold", &self.music_on_hold, AlwaysEmit)?
            .field("allowed_codecs", &self.allowed_codecs, AlwaysEmit)?
            .field("dtmf_mode", &self.dtmf_mode, AlwaysEmit)?
            .field("nat", &self.nat, AlwaysEmit)?
            .field("internal_extension", &self.internal_extension, OmitIfEmpty)?
            .field("internal_voicemail", &self.internal_voicemail, OmitIfEmpty)?
            .field("internal_dialtime", &self.internal_dialtime, OmitIfEmpty)?
            .field("reseller_client", &self.reseller_client, OmitIfEmpty)?
            .field("reseller_package", &self.reseller_package, OmitIfEmpty)?
            .field("reseller_nextbilling", &self.reseller_nextbilling, OmitIfEmpty)?
            .field("reseller_chargesetup", &self.reseller_chargesetup, OmitIfEmpty)?;
        Ok(())
    }
}

/// One registration of a sub-account against a voip.ms server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatus {
    #[serde(flatten)]
    pub server: Server,
    pub register_ip: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub register_port: String,
    pub register_next: String,
}

#[derive(Deserialize)]
struct CreateSubAccountResp {
    #[serde(deserialize_with = "de::string_or_number")]
    id: String,
    account: String,
}

#[derive(Deserialize)]
struct AllowedCodecsResp {
    allowed_codecs: Vec<Codec>,
}

#[derive(Deserialize)]
struct AuthTypesResp {
    auth_types: Vec<AuthType>,
}

#[derive(Deserialize)]
struct DeviceTypesResp {
    device_types: Vec<DeviceType>,
}

#[derive(Deserialize)]
struct DtmfModesResp {
    dtmf_modes: Vec<DtmfMode>,
}

#[derive(Deserialize)]
struct LockInternationalResp {
    lock_international: Vec<LockInternational>,
}

#[derive(Deserialize)]
struct MusicOnHoldResp {
    music_on_hold: Vec<MusicOnHold>,
}

#[derive(Deserialize)]
struct NatResp {
    nat: Vec<Nat>,
}

#[derive(Deserialize)]
struct ProtocolsResp {
    protocols: Vec<Protocol>,
}

#[derive(Deserialize)]
struct RegistrationStatusResp {
    registered: String,
    #[serde(default)]
    registrations: Vec<RegistrationStatus>,
}

#[derive(Deserialize)]
struct EstimatedHoldTimeResp {
    types: Vec<EstimatedHoldTime>,
}

#[derive(Deserialize)]
struct RoutesResp {
    routes: Vec<RouteOption>,
}

#[derive(Deserialize)]
struct SubAccountsResp {
    accounts: Vec<Account>,
}

pub struct AccountsApi<'a> {
    client: &'a VoipMsClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a VoipMsClient) -> Self {
        Self { client }
    }

    /// createSubAccount. On success the new `id` and `account` name are
    /// written back into `sub_account`.
    pub fn create_sub_account(&self, sub_account: &mut Account) -> Result<()> {
        let rs: CreateSubAccountResp = self.client.post("createSubAccount", &*sub_account)?;
        sub_account.id = rs.id;
        sub_account.account = rs.account;
        Ok(())
    }

    pub fn del_sub_account(&self, id: &str) -> Result<()> {
        let mut rq = Form::new();
        rq.text("id", id);
        self.client.post::<_, Ack>("delSubAccount", &rq)?;
        Ok(())
    }

    pub fn set_sub_account(&self, account: &Account) -> Result<()> {
        self.client.post::<_, Ack>("setSubAccount", account)?;
        Ok(())
    }

    /// getSubAccounts; an empty `account` lists all of them.
    pub fn get_sub_accounts(&self, account: &str) -> Result<Vec<Account>> {
        let mut params = Form::new();
        params.non_empty("account", account);
        let rs: SubAccountsResp = self.client.get("getSubAccounts", &params)?;
        Ok(rs.accounts)
    }

    pub fn get_allowed_codecs(&self, codec: &str) -> Result<Vec<Codec>> {
        let mut params = Form::new();
        params.non_empty("codec", codec);
        let rs: AllowedCodecsResp = self.client.get("getAllowedCodecs", &params)?;
        Ok(rs.allowed_codecs)
    }

    /// `auth_type == 0` lists all.
    pub fn get_auth_types(&self, auth_type: u32) -> Result<Vec<AuthType>> {
        let mut params = Form::new();
        params.positive("type", auth_type);
        let rs: AuthTypesResp = self.client.get("getAuthTypes", &params)?;
        Ok(rs.auth_types)
    }

    pub fn get_device_types(&self, device_type: u32) -> Result<Vec<DeviceType>> {
        let mut params = Form::new();
        params.positive("device_type", device_type);
        let rs: DeviceTypesResp = self.client.get("getDeviceTypes", &params)?;
        Ok(rs.device_types)
    }

    pub fn get_dtmf_modes(&self, dtmf_mode: &str) -> Result<Vec<DtmfMode>> {
        let mut params = Form::new();
        params.non_empty("dtmf_mode", dtmf_mode);
        let rs: DtmfModesResp = self.client.get("getDTMFModes", &params)?;
        Ok(rs.dtmf_modes)
    }

    /// Takes text because `0` is a real lock setting, not "all".
    pub fn get_lock_international(&self, lock_international: &str) -> Result<Vec<LockInternational>> {
        let mut params = Form::new();
        params.non_empty("lock_international", lock_international);
        let rs: LockInternationalResp = self.client.get("getLockInternational", &params)?;
        Ok(rs.lock_international)
    }

    pub fn get_music_on_hold(&self, music_on_hold: &str) -> Result<Vec<MusicOnHold>> {
        let mut params = Form::new();
        params.non_empty("music_on_hold", music_on_hold);
        let rs: MusicOnHoldResp = self.client.get("getMusicOnHold", &params)?;
        Ok(rs.music_on_hold)
    }

    pub fn get_nat(&self, nat: &str) -> Result<Vec<Nat>> {
        let mut params = Form::new();
        params.non_empty("nat", nat);
        let rs: NatResp = self.client.get("getNAT", &params)?;
        Ok(rs.nat)
    }

    pub fn get_protocols(&self, protocol: u32) -> Result<Vec<Protocol>> {
        let mut params = Form::new();
        params.positive("protocol", protocol);
        let rs: ProtocolsResp = self.client.get("getProtocols", &params)?;
        Ok(rs.protocols)
    }

    /// Returns whether `account` is registered, and where.
    pub fn get_registration_status(&self, account: &str) -> Result<(bool, Vec<RegistrationStatus>)> {
        require(account, "missing_account")?;
        let mut params = Form::new();
        params.text("account", account);
        let rs: RegistrationStatusResp = self.client.get("getRegistrationStatus", &params)?;
        Ok((rs.registered == "yes", rs.registrations))
    }

    pub fn get_report_estimated_hold_time(&self, kind: &str) -> Result<Vec<EstimatedHoldTime>> {
        let mut params = Form::new();
        params.non_empty("type", kind);
        let rs: EstimatedHoldTimeResp = self.client.get("getReportEstimatedHoldTime", &params)?;
        Ok(rs.types)
    }

    pub fn get_routes(&self, route: u32) -> Result<Vec<RouteOption>> {
        let mut params = Form::new();
        params.positive("route", route);
        let rs: RoutesResp = self.client.get("getRoutes", &params)?;
        Ok(rs.routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Account {
        Account {
            username: "Test1".into(),
            protocol: "1".into(),
            description: "Description".into(),
            auth_type: "1".into(),
            password: "Password1".into(),
            device_type: "2".into(),
            callerid_number: "5555551234".into(),
            canada_routing: "1".into(),
            lock_international: "1".into(),
            international_route: "1".into(),
            music_on_hold: "default".into(),
            allowed_codecs: "ulaw;g729".into(),
            dtmf_mode: "auto".into(),
            nat: "yes".into(),
            internal_dialtime: "20".into(),
            ..Account::default()
        }
    }

    #[test]
    fn new_account_omits_unassigned_identifiers() {
        let form = sample().to_form().unwrap();
        assert!(!form.contains("id"));
        assert!(!form.contains("account"));
        assert!(!form.contains("ip"));
        assert!(!form.contains("reseller_client"));
        assert_eq!(form.get("allowed_codecs"), Some("ulaw;g729"));
        assert_eq!(form.get("internal_dialtime"), Some("20"));
    }

    #[test]
    fn required_fields_are_sent_even_when_empty() {
        let form = Account::default().to_form().unwrap();
        for name in ["username", "protocol", "auth_type", "device_type", "nat", "dtmf_mode"] {
            assert_eq!(form.get(name), Some(""), "{name}");
        }
    }

    #[test]
    fn listed_accounts_tolerate_numeric_codes() {
        let account: Account = serde_json::from_str(
            r#"{"id":"2468","account":"100000_Test1","username":"Test1","protocol":1,
                "auth_type":"1","device_type":2,"lock_international":0,"nat":"yes"}"#,
        )
        .unwrap();
        assert_eq!(account.id, "2468");
        assert_eq!(account.protocol, "1");
        assert_eq!(account.lock_international, "0");
        assert!(account.password.is_empty());
    }
}
