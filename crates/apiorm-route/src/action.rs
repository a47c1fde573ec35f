//! Logical actions and HTTP methods
//!
//! [`Action`] names the seven persistence operations a model delegates to the
//! API. [`HttpMethod`] decides whether parameters travel in the body or the
//! query string.

use crate::error::RouteError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Standard persistence action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Fetch every record in scope
    All,
    /// Fetch the first record in scope
    First,
    /// Fetch the last record in scope
    Last,
    /// Count records in scope
    Count,
    /// Create a new record
    Create,
    /// Update a persisted record
    Update,
    /// Delete a persisted record
    Delete,
}

/// Whether an action addresses the collection or one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionScope {
    /// `/<collection>/...`
    Collection,
    /// `/<member>/:id/...`
    Member,
}

impl Action {
    /// All standard actions, in route generation order
    pub const STANDARD: [Action; 7] = [
        Action::All,
        Action::First,
        Action::Last,
        Action::Count,
        Action::Create,
        Action::Update,
        Action::Delete,
    ];

    /// Name used as the route table key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::All => "all",
            Action::First => "first",
            Action::Last => "last",
            Action::Count => "count",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Collection or member route
    #[inline]
    #[must_use]
    pub fn scope(&self) -> ActionScope {
        match self {
            Action::Update | Action::Delete => ActionScope::Member,
            _ => ActionScope::Collection,
        }
    }

    /// Path segment appended after the collection or member prefix
    ///
    /// `all` has none: it is served from the bare collection path.
    #[inline]
    #[must_use]
    pub fn default_segment(&self) -> Option<&'static str> {
        match self {
            Action::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "list" => Ok(Action::All),
            "first" => Ok(Action::First),
            "last" => Ok(Action::Last),
            "count" => Ok(Action::Count),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(RouteError::UnknownAction(other.to_string())),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

/// HTTP request method
///
/// Parsed case-insensitively, rendered upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Method used when a route does not configure one
    pub const DEFAULT: HttpMethod = HttpMethod::Post;

    /// Upper-case wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Parameters go in a JSON body for POST, PUT and PATCH; in the query
    /// string otherwise
    #[inline]
    #[must_use]
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl Default for HttpMethod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(RouteError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_through_name() {
        for action in Action::STANDARD {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn list_is_alias_of_all() {
        assert_eq!("list".parse::<Action>().unwrap(), Action::All);
    }

    #[test]
    fn unknown_action_rejected() {
        let err = "frobnicate".parse::<Action>().unwrap_err();
        assert_eq!(err, RouteError::UnknownAction("frobnicate".into()));
    }

    #[test]
    fn member_actions() {
        assert_eq!(Action::Update.scope(), ActionScope::Member);
        assert_eq!(Action::Delete.scope(), ActionScope::Member);
        assert_eq!(Action::Create.scope(), ActionScope::Collection);
        assert_eq!(Action::All.default_segment(), None);
        assert_eq!(Action::Count.default_segment(), Some("count"));
    }

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert!("fetch".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn body_methods() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(HttpMethod::Patch.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
        assert_eq!(HttpMethod::default(), HttpMethod::Post);
    }
}
