//! General: balance, lookups, transaction history.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::encode::{FieldPolicy, Form};
use crate::types::{Balance, Server, ValueDescription};
use crate::{Result, VoipMsClient, VoipMsError};

pub type Country = ValueDescription;
pub type Language = ValueDescription;

/// One line of the account's transaction history.
///
/// `date` stays text: summary lines come back as ranges such as
/// `2015-11-02 to 2016-11-01`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    #[serde(rename = "uniqueid")]
    pub unique_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub amount: String,
}

#[derive(Deserialize)]
struct BalanceResp {
    balance: Balance,
}

#[derive(Deserialize)]
struct CountriesResp {
    countries: Vec<Country>,
}

#[derive(Deserialize)]
struct IpResp {
    ip: String,
}

#[derive(Deserialize)]
struct LanguagesResp {
    languages: Vec<Language>,
}

#[derive(Deserialize)]
struct ServersResp {
    servers: Vec<Server>,
}

#[derive(Deserialize)]
struct TransactionsResp {
    transactions: Vec<Transaction>,
}

pub struct GeneralApi<'a> {
    client: &'a VoipMsClient,
}

impl<'a> GeneralApi<'a> {
    pub(crate) fn new(client: &'a VoipMsClient) -> Self {
        Self { client }
    }

    /// getBalance. `advanced` adds spend/call totals.
    pub fn get_balance(&self, advanced: bool) -> Result<Balance> {
        let mut params = Form::new();
        params.flag("advanced", advanced);
        let rs: BalanceResp = self.client.get("getBalance", &params)?;
        Ok(rs.balance)
    }

    pub fn get_countries(&self, country: &str) -> Result<Vec<Country>> {
        let mut params = Form::new();
        params.non_empty("country", country);
        let rs: CountriesResp = self.client.get("getCountries", &params)?;
        Ok(rs.countries)
    }

    /// The public IP the vendor sees this client calling from.
    pub fn get_ip(&self) -> Result<String> {
        let rs: IpResp = self.client.get("getIP", &Form::new())?;
        Ok(rs.ip)
    }

    pub fn get_languages(&self, language: &str) -> Result<Vec<Language>> {
        let mut params = Form::new();
        params.non_empty("language", language);
        let rs: LanguagesResp = self.client.get("getLanguages", &params)?;
        Ok(rs.languages)
    }

    pub fn get_servers_info(&self, server_pop: &str) -> Result<Vec<Server>> {
        let mut params = Form::new();
        params.non_empty("server_pop", server_pop);
        let rs: ServersResp = self.client.get("getServersInfo", &params)?;
        Ok(rs.servers)
    }

    /// getTransactionHistory between two instants; both are required.
    pub fn get_transaction_history(
        &self,
        date_from: Option<NaiveDateTime>,
        date_to: Option<NaiveDateTime>,
    ) -> Result<Vec<Transaction>> {
        let date_from =
            date_from.ok_or_else(|| VoipMsError::Validation("dateFrom is required!".into()))?;
        let date_to =
            date_to.ok_or_else(|| VoipMsError::Validation("dateTo is required!".into()))?;

        let mut params = Form::new();
        params
            .field("date_from", &date_from, FieldPolicy::AlwaysEmit)?
            .field("date_to", &date_to, FieldPolicy::AlwaysEmit)?;
        let rs: TransactionsResp = self.client.get("getTransactionHistory", &params)?;
        Ok(rs.transactions)
    }
}
