//! Reseller client management and billing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Ack;
use crate::de;
use crate::encode::{FieldPolicy, Form, ToForm};
use crate::types::{Balance, ValueDescription};
use crate::{Result, VoipMsClient};

pub type BalanceManagement = ValueDescription;
pub type ClientPackage = ValueDescription;

/// A reseller client. `client` is the vendor's client id; leave it empty
/// when signing a new client up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(deserialize_with = "de::string_or_number")]
    pub client: String,
    pub email: String,
    pub password: String,
    pub company: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub zip: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub phone_number: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub balance_management: String,
}

impl ToForm for Client {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfEmpty};

        form.field("client", &self.client, OmitIfEmpty)?
            .field("email", &self.email, AlwaysEmit)?
            .field("password", &self.password, AlwaysEmit)?
            .field("company", &self.company, OmitIfEmpty)?
            .field("firstname", &self.first_name, AlwaysEmit)?
            .field("lastname", &self.last_name, AlwaysEmit)?
            .field("address", &self.address, OmitIfEmpty)?
            .field("city", &self.city, OmitIfEmpty)?
            .field("state", &self.state, OmitIfEmpty)?
            .field("country", &self.country, OmitIfEmpty)?
            .field("zip", &self.zip, OmitIfEmpty)?
            .field("phone_number", &self.phone_number, AlwaysEmit)?
            .field("balance_management", &self.balance_management, OmitIfEmpty)?;
        Ok(())
    }
}

/// signupClient: a [`Client`] plus the confirmation fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupClient {
    pub client: Client,
    pub confirm_email: String,
    pub confirm_password: String,
    /// Activate the client right away.
    pub activate: bool,
}

impl ToForm for SignupClient {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfFalse};

        form.record(&self.client)?
            .field("confirm_email", &self.confirm_email, AlwaysEmit)?
            .field("confirm_password", &self.confirm_password, AlwaysEmit)?
            .field("activate", &self.activate, OmitIfFalse)?;
        Ok(())
    }
}

/// A charge or a deposit on a client's account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Charge {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "de::date_time")]
    pub date: NaiveDateTime,
    #[serde(deserialize_with = "de::lenient")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

pub type Deposit = Charge;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientThreshold {
    #[serde(deserialize_with = "de::string_or_number")]
    pub threshold: String,
    pub email: String,
}

/// A reseller billing package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Package id.
    #[serde(deserialize_with = "de::string_or_number")]
    pub package: String,
    pub name: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub markup_fixed: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub markup_percentage: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub pulse: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub international_route: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub canada_route: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub monthly_fee: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub setup_fee: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub free_minutes: String,
}

/// Body of addCharge / addPayment; `amount_field` names the amount key.
struct Movement<'a> {
    client: &'a str,
    amount_field: &'static str,
    amount: f64,
    description: &'a str,
    test: bool,
}

impl ToForm for Movement<'_> {
    fn write_form(&self, form: &mut Form) -> Result<()> {
        use FieldPolicy::{AlwaysEmit, OmitIfFalse};

        form.field("client", self.client, AlwaysEmit)?
            .field(self.amount_field, &self.amount, AlwaysEmit)?
            .field("description", self.description, AlwaysEmit)?
            .field("test", &self.test, OmitIfFalse)?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct BalanceManagementResp {
    // sic
    balance_mangement: Vec<BalanceManagement>,
}

#[derive(Deserialize)]
struct ChargesResp {
    charges: Vec<Charge>,
}

#[derive(Deserialize)]
struct ClientPackagesResp {
    packages: Vec<ClientPackage>,
}

#[derive(Deserialize)]
struct ClientsResp {
    clients: Vec<Client>,
}

#[derive(Deserialize)]
struct ClientThresholdResp {
    threshold_information: ClientThreshold,
}

#[derive(Deserialize)]
struct DepositsResp {
    deposits: Vec<Deposit>,
}

#[derive(Deserialize)]
struct PackagesResp {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct ResellerBalanceResp {
    balance: Balance,
}

pub struct ClientsApi<'a> {
    client: &'a VoipMsClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(client: &'a VoipMsClient) -> Self {
        Self { client }
    }

    /// addCharge. `test` asks the vendor to validate without booking.
    pub fn add_charge(&self, client: &str, description: &str, charge: f64, test: bool) -> Result<()> {
        let rq = Movement {
            client,
            amount_field: "charge",
            amount: charge,
            description,
            test,
        };
        self.client.post::<_, Ack>("addCharge", &rq)?;
        Ok(())
    }

    pub fn add_payment(&self, client: &str, description: &str, payment: f64, test: bool) -> Result<()> {
        let rq = Movement {
            client,
            amount_field: "payment",
            amount: payment,
            description,
            test,
        };
        self.client.post::<_, Ack>("addPayment", &rq)?;
        Ok(())
    }

    pub fn get_balance_management(&self, balance_management: &str) -> Result<Vec<BalanceManagement>> {
        let mut params = Form::new();
        params.non_empty("balance_management", balance_management);
        let rs: BalanceManagementResp = self.client.get("getBalanceManagement", &params)?;
        Ok(rs.balance_mangement)
    }

    pub fn get_charges(&self, client: &str) -> Result<Vec<Charge>> {
        let mut params = Form::new();
        params.text("client", client);
        let rs: ChargesResp = self.client.get("getCharges", &params)?;
        Ok(rs.charges)
    }

    pub fn get_client_packages(&self, client: &str) -> Result<Vec<ClientPackage>> {
        let mut params = Form::new();
        params.text("client", client);
        let rs: ClientPackagesResp = self.client.get("getClientPackages", &params)?;
        Ok(rs.packages)
    }

    /// getClients; `client` may be an id or an e-mail, empty lists all.
    pub fn get_clients(&self, client: &str) -> Result<Vec<Client>> {
        let mut params = Form::new();
        params.non_empty("client", client);
        let rs: ClientsResp = self.client.get("getClients", &params)?;
        Ok(rs.clients)
    }

    pub fn get_client_threshold(&self, client: &str) -> Result<ClientThreshold> {
        let mut params = Form::new();
        params.text("client", client);
        let rs: ClientThresholdResp = self.client.get("getClientThreshold", &params)?;
        Ok(rs.threshold_information)
    }

    pub fn get_deposits(&self, client: &str) -> Result<Vec<Deposit>> {
        let mut params = Form::new();
        params.text("client", client);
        let rs: DepositsResp = self.client.get("getDeposits", &params)?;
        Ok(rs.deposits)
    }

    pub fn get_packages(&self, package: &str) -> Result<Vec<Package>> {
        let mut params = Form::new();
        params.non_empty("package", package);
        let rs: PackagesResp = self.client.get("getPackages", &params)?;
        Ok(rs.packages)
    }

    pub fn get_reseller_balance(&self, client: &str) -> Result<Balance> {
        let mut params = Form::new();
        params.text("client", client);
        let rs: ResellerBalanceResp = self.client.get("getResellerBalance", &params)?;
        Ok(rs.balance)
    }

    pub fn set_client(&self, client: &Client) -> Result<()> {
        self.client.post::<_, Ack>("setClient", client)?;
        Ok(())
    }

    pub fn set_client_threshold(&self, client: &str, threshold: &str, email: &str) -> Result<()> {
        let mut rq = Form::new();
        rq.text("client", client)
            .text("threshold", threshold)
            .text("email", email);
        self.client.post::<_, Ack>("setClientThreshold", &rq)?;
        Ok(())
    }

    pub fn signup_client(&self, signup: &SignupClient) -> Result<()> {
        self.client.post::<_, Ack>("signupClient", signup)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoipMsError;

    fn client() -> Client {
        Client {
            email: "jane@example.com".into(),
            password: "pw".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone_number: "5551234567".into(),
            ..Client::default()
        }
    }

    #[test]
    fn signup_flattens_the_client_record() {
        let signup = SignupClient {
            client: client(),
            confirm_email: "jane@example.com".into(),
            confirm_password: "pw".into(),
            activate: false,
        };
        let form = signup.to_form().unwrap();
        let names: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec![
                "email",
                "password",
                "firstname",
                "lastname",
                "phone_number",
                "confirm_email",
                "confirm_password"
            ]
        );
    }

    #[test]
    fn activate_is_sent_only_when_set() {
        let signup = SignupClient {
            client: client(),
            activate: true,
            ..SignupClient::default()
        };
        assert_eq!(signup.to_form().unwrap().get("activate"), Some("true"));
    }

    #[test]
    fn movements_name_the_amount_field() {
        let rq = Movement {
            client: "561115",
            amount_field: "payment",
            amount: 9.99,
            description: "Refund",
            test: false,
        };
        let form = rq.to_form().unwrap();
        assert_eq!(form.get("payment"), Some("9.990000"));
        assert!(!form.contains("charge"));
        assert!(!form.contains("test"));
    }

    #[test]
    fn nan_amount_is_an_encoding_error() {
        let rq = Movement {
            client: "561115",
            amount_field: "charge",
            amount: f64::NAN,
            description: "",
            test: true,
        };
        assert!(matches!(rq.to_form().unwrap_err(), VoipMsError::Encoding(_)));
    }

    #[test]
    fn charges_decode_dates_and_amounts() {
        let charge: Charge = serde_json::from_str(
            r#"{"id":"8827","date":"2016-11-02 09:41:26","amount":"-5.00","description":"Setup"}"#,
        )
        .unwrap();
        assert_eq!(charge.amount, -5.0);
        assert_eq!(charge.date.to_string(), "2016-11-02 09:41:26");
    }
}
