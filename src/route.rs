//! Call routing values used by the DID endpoints.
//!
//! The vendor writes a route as `kind:target` (`account:100000_VoIP`,
//! `fwd:1234`, `none:`). IVR menus carry several routes in one string,
//! `1=account:12345;2=queue:3333`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encode::FormValue;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRouteError {
    #[error("unknown route kind `{0}`")]
    UnknownKind(String),
}

/// Where a call leg goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Account,
    Fwd,
    Vm,
    Sip,
    Grp,
    Ivr,
    Sys,
    Recording,
    Queue,
    Cb,
    Tc,
    Disa,
    None,
}

impl RouteKind {
    pub const ALL: [RouteKind; 13] = [
        RouteKind::Account,
        RouteKind::Fwd,
        RouteKind::Vm,
        RouteKind::Sip,
        RouteKind::Grp,
        RouteKind::Ivr,
        RouteKind::Sys,
        RouteKind::Recording,
        RouteKind::Queue,
        RouteKind::Cb,
        RouteKind::Tc,
        RouteKind::Disa,
        RouteKind::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Account => "account",
            RouteKind::Fwd => "fwd",
            RouteKind::Vm => "vm",
            RouteKind::Sip => "sip",
            RouteKind::Grp => "grp",
            RouteKind::Ivr => "ivr",
            RouteKind::Sys => "sys",
            RouteKind::Recording => "recording",
            RouteKind::Queue => "queue",
            RouteKind::Cb => "cb",
            RouteKind::Tc => "tc",
            RouteKind::Disa => "disa",
            RouteKind::None => "none",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKind {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RouteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseRouteError::UnknownKind(s.to_string()))
    }
}

/// A `kind:target` routing value. `target` is empty for kinds that need no
/// destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub kind: RouteKind,
    pub target: String,
}

impl Route {
    pub fn new(kind: RouteKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }

    /// Ring a sub-account.
    pub fn account(target: impl Into<String>) -> Self {
        Self::new(RouteKind::Account, target)
    }

    /// Forward to a configured forwarding entry.
    pub fn fwd(target: impl Into<String>) -> Self {
        Self::new(RouteKind::Fwd, target)
    }

    /// Send to a voicemail box.
    pub fn vm(target: impl Into<String>) -> Self {
        Self::new(RouteKind::Vm, target)
    }

    /// System recording (`sys:hangup`, `sys:busy`, ...).
    pub fn sys(target: impl Into<String>) -> Self {
        Self::new(RouteKind::Sys, target)
    }

    pub fn sip() -> Self {
        Self::new(RouteKind::Sip, "")
    }

    pub fn grp() -> Self {
        Self::new(RouteKind::Grp, "")
    }

    pub fn ivr() -> Self {
        Self::new(RouteKind::Ivr, "")
    }

    pub fn recording() -> Self {
        Self::new(RouteKind::Recording, "")
    }

    pub fn queue() -> Self {
        Self::new(RouteKind::Queue, "")
    }

    pub fn cb() -> Self {
        Self::new(RouteKind::Cb, "")
    }

    pub fn tc() -> Self {
        Self::new(RouteKind::Tc, "")
    }

    pub fn disa() -> Self {
        Self::new(RouteKind::Disa, "")
    }

    pub fn none() -> Self {
        Self::new(RouteKind::None, "")
    }

    pub fn is_none(&self) -> bool {
        self.kind == RouteKind::None
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::none()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.target)
    }
}

/// Splits on the first `:` only, so SIP-style targets survive. An empty
/// string is the `none:` route; the vendor sends that for unset failovers.
impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Route::none());
        }
        let (kind, target) = s.split_once(':').unwrap_or((s, ""));
        Ok(Route::new(kind.parse()?, target))
    }
}

impl FormValue for Route {
    fn form_value(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// One IVR menu entry, `tone=kind:target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvrChoice {
    pub dtmf_tone: String,
    pub route: Route,
}

impl fmt::Display for IvrChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dtmf_tone, self.route)
    }
}

impl FromStr for IvrChoice {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (tone, route) = s.split_once('=').unwrap_or((s, ""));
        Ok(IvrChoice {
            dtmf_tone: tone.to_string(),
            route: route.parse()?,
        })
    }
}

impl FormValue for IvrChoice {
    fn form_value(&self) -> Result<String> {
        Ok(self.to_string())
    }
}

/// Parse a `;`-separated menu. Empty segments are skipped.
pub fn parse_ivr_choices(text: &str) -> std::result::Result<Vec<IvrChoice>, ParseRouteError> {
    text.split(';')
        .filter(|segment| !segment.is_empty())
        .map(str::parse)
        .collect()
}

pub fn format_ivr_choices(choices: &[IvrChoice]) -> String {
    choices
        .iter()
        .map(IvrChoice::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

pub(crate) mod serde_choices {
    use super::*;

    pub fn serialize<S: Serializer>(
        choices: &[IvrChoice],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_ivr_choices(choices))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Vec<IvrChoice>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_ivr_choices(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_route_round_trips_through_text() {
        let route = Route::account("1234");
        assert_eq!(route.to_string(), "account:1234");
        assert_eq!(route.form_value().unwrap(), "account:1234");
        let parsed: Route = "account:1234".parse().unwrap();
        assert_eq!(parsed.kind, RouteKind::Account);
        assert_eq!(parsed.target, "1234");
    }

    #[test]
    fn target_less_routes_keep_the_colon() {
        assert_eq!(Route::none().to_string(), "none:");
        assert_eq!(Route::queue().to_string(), "queue:");
        assert_eq!("sip:".parse::<Route>().unwrap(), Route::sip());
        assert_eq!("none".parse::<Route>().unwrap(), Route::none());
        assert_eq!("".parse::<Route>().unwrap(), Route::none());
    }

    #[test]
    fn every_kind_is_recognised() {
        for kind in RouteKind::ALL {
            let text = format!("{kind}:x");
            assert_eq!(text.parse::<Route>().unwrap().kind, kind);
        }
        assert_eq!(
            "teleport:1".parse::<Route>().unwrap_err(),
            ParseRouteError::UnknownKind("teleport".into())
        );
    }

    #[test]
    fn only_the_first_colon_splits() {
        let route: Route = "fwd:sip:100@example.com".parse().unwrap();
        assert_eq!(route.kind, RouteKind::Fwd);
        assert_eq!(route.target, "sip:100@example.com");
    }

    #[test]
    fn routes_are_json_strings() {
        let json = serde_json::to_string(&Route::vm("101")).unwrap();
        assert_eq!(json, "\"vm:101\"");
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Route::vm("101"));
    }

    #[test]
    fn ivr_menu_parses_and_formats() {
        let choices = parse_ivr_choices("1=account:12345;2=queue:3333").unwrap();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].dtmf_tone, "1");
        assert_eq!(choices[0].route, Route::account("12345"));
        assert_eq!(choices[1].route, Route::new(RouteKind::Queue, "3333"));
        assert_eq!(format_ivr_choices(&choices), "1=account:12345;2=queue:3333");
        assert!(parse_ivr_choices("").unwrap().is_empty());
    }
}
