use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Role a user holds in the shop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Role::Customer),
            "SELLER" => Ok(Role::Seller),
            "ADMIN" => Ok(Role::Admin),
            other => anyhow::bail!("unknown role: {other}"),
        }
    }
}

/// JWT payload of a session token.
///
/// `roles` is informational; authorization uses the authorities from the user
/// store. Only `sub` and `exp` are required to accept a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // user uid
    #[serde(default, deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub roles: Option<Role>, // role at issuance, unknown values read as None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>, // issued at (unix seconds)
    pub exp: i64, // expires at (unix seconds)
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_form_is_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"CUSTOMER\"");
        let parsed: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn role_from_str_matches_wire_form() {
        for role in [Role::Customer, Role::Seller, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("customer".parse::<Role>().is_err());
    }

    #[test]
    fn optional_claims_may_be_absent_or_unknown() {
        let bare: Claims = serde_json::from_str(r#"{"sub":"u","exp":10}"#).unwrap();
        assert_eq!(bare.roles, None);
        assert_eq!(bare.iat, None);

        let odd: Claims =
            serde_json::from_str(r#"{"sub":"u","exp":10,"iat":1,"roles":["GUEST"]}"#).unwrap();
        assert_eq!(odd.roles, None);
        assert_eq!(odd.iat, Some(1));

        assert!(serde_json::from_str::<Claims>(r#"{"exp":10}"#).is_err());
    }
}
