use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::errors::HubSpotError;

use crate::storage::CacheData;

/// Payload carried through HubSpot in the `state` parameter and kept in the
/// cache until the callback arrives
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct StateParams {
    pub(crate) state: String,
    pub(crate) user_id: String,
    pub(crate) org_id: String,
}

/// Query parameters HubSpot appends to the redirect URI
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Token material as returned by the HubSpot token endpoint
///
/// Only `access_token` is required; everything else the endpoint sends is kept
/// in `extra` so the caller receives it unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct HubSpotCredentials {
    pub(crate) access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) token_type: Option<String>,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, Value>,
}

impl HubSpotCredentials {
    /// Accepts the credentials either as a JSON object or as a JSON-encoded string.
    pub(crate) fn from_value(credentials: Value) -> Result<Self, HubSpotError> {
        let credentials = match credentials {
            Value::String(s) => {
                serde_json::from_str(&s).map_err(|_| HubSpotError::InvalidCredentials)?
            }
            other => other,
        };

        let credentials: Self =
            serde_json::from_value(credentials).map_err(|_| HubSpotError::InvalidCredentials)?;

        if credentials.access_token.trim().is_empty() {
            return Err(HubSpotError::InvalidCredentials);
        }

        Ok(credentials)
    }
}

/// Raw token response kept in the cache between callback and retrieval
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredCredentials(pub(crate) Value);

impl TryFrom<StateParams> for CacheData {
    type Error = HubSpotError;

    fn try_from(data: StateParams) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(&data).map_err(|e| HubSpotError::Serde(e.to_string()))?,
        })
    }
}

impl TryFrom<CacheData> for StateParams {
    type Error = HubSpotError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| HubSpotError::Storage(e.to_string()))
    }
}

impl TryFrom<StoredCredentials> for CacheData {
    type Error = HubSpotError;

    fn try_from(data: StoredCredentials) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(&data.0)
                .map_err(|e| HubSpotError::Serde(e.to_string()))?,
        })
    }
}

impl TryFrom<CacheData> for StoredCredentials {
    type Error = HubSpotError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value)
            .map(StoredCredentials)
            .map_err(|e| HubSpotError::Storage(e.to_string()))
    }
}

/// CRM object collections this connector reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CrmObjectKind {
    Contacts,
    Companies,
    Deals,
}

impl CrmObjectKind {
    /// Collections in the order their items are emitted
    pub(crate) const ALL: [CrmObjectKind; 3] = [Self::Contacts, Self::Companies, Self::Deals];

    /// Path segment under `/crm/v3/objects/`
    pub(crate) fn path(&self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Companies => "companies",
            Self::Deals => "deals",
        }
    }

    pub(crate) fn list_id(&self) -> &'static str {
        match self {
            Self::Contacts => "hubspot_contacts",
            Self::Companies => "hubspot_companies",
            Self::Deals => "hubspot_deals",
        }
    }

    pub(crate) fn list_name(&self) -> &'static str {
        match self {
            Self::Contacts => "Contacts",
            Self::Companies => "Companies",
            Self::Deals => "Deals",
        }
    }

    pub(crate) fn list_type(&self) -> &'static str {
        match self {
            Self::Contacts => "ContactList",
            Self::Companies => "CompanyList",
            Self::Deals => "DealList",
        }
    }

    pub(crate) fn item_type(&self) -> &'static str {
        match self {
            Self::Contacts => "Contact",
            Self::Companies => "Company",
            Self::Deals => "Deal",
        }
    }

    pub(crate) fn item_id(&self, object_id: &str) -> String {
        let prefix = match self {
            Self::Contacts => "contact",
            Self::Companies => "company",
            Self::Deals => "deal",
        };
        format!("{prefix}_{object_id}")
    }

    /// Properties requested from HubSpot for each object
    pub(crate) fn properties(&self) -> &'static [&'static str] {
        match self {
            Self::Contacts => &["firstname", "lastname", "email"],
            Self::Companies => &["name", "domain"],
            Self::Deals => &["dealname", "amount", "dealstage"],
        }
    }
}

/// One record from a `/crm/v3/objects/{type}` page
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CrmObject {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) properties: HashMap<String, Option<String>>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl CrmObject {
    /// Non-blank, trimmed property value
    pub(crate) fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CrmObjectPage {
    #[serde(default)]
    pub(crate) results: Vec<CrmObject>,
    pub(crate) paging: Option<Paging>,
}

impl CrmObjectPage {
    /// Cursor for the next page, if HubSpot reported one
    pub(crate) fn next_after(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_ref())
            .map(|n| n.after.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Paging {
    pub(crate) next: Option<PagingNext>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PagingNext {
    pub(crate) after: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_from_object() {
        let value = json!({
            "access_token": "CJSP5qf1KhICAQEYs-gDIIGOBii1",
            "refresh_token": "6f18f21e-a743-4509-b7fd-1a5e632fffa1",
            "expires_in": 1800,
            "token_type": "bearer",
            "hub_id": 123456
        });

        let credentials = HubSpotCredentials::from_value(value).unwrap();

        assert_eq!(credentials.access_token, "CJSP5qf1KhICAQEYs-gDIIGOBii1");
        assert_eq!(credentials.expires_in, Some(1800));
        assert_eq!(credentials.extra.get("hub_id"), Some(&json!(123456)));
    }

    #[test]
    fn test_credentials_from_json_string() {
        let value = Value::String(r#"{"access_token":"abc"}"#.to_string());

        let credentials = HubSpotCredentials::from_value(value).unwrap();

        assert_eq!(credentials.access_token, "abc");
        assert_eq!(credentials.refresh_token, None);
    }

    #[test]
    fn test_credentials_without_access_token_rejected() {
        for value in [
            json!({"refresh_token": "r"}),
            json!({"access_token": ""}),
            json!({"access_token": null}),
            json!(null),
            Value::String("not json".to_string()),
        ] {
            assert!(
                matches!(
                    HubSpotCredentials::from_value(value.clone()),
                    Err(HubSpotError::InvalidCredentials)
                ),
                "expected InvalidCredentials for {value}"
            );
        }
    }

    #[test]
    fn test_state_params_cache_conversion() {
        let params = StateParams {
            state: "random".to_string(),
            user_id: "user1".to_string(),
            org_id: "org1".to_string(),
        };

        let data = CacheData::try_from(params.clone()).unwrap();
        assert_eq!(
            data.value,
            r#"{"state":"random","user_id":"user1","org_id":"org1"}"#
        );
        assert_eq!(StateParams::try_from(data).unwrap(), params);
    }

    #[test]
    fn test_corrupt_cached_state_is_storage_error() {
        let data = CacheData {
            value: "{broken".to_string(),
        };
        assert!(matches!(
            StateParams::try_from(data),
            Err(HubSpotError::Storage(_))
        ));
    }

    #[test]
    fn test_crm_page_deserialization() {
        let page: CrmObjectPage = serde_json::from_value(json!({
            "results": [
                {
                    "id": "51",
                    "properties": {
                        "firstname": "Ada",
                        "lastname": null,
                        "hs_object_id": "51"
                    },
                    "createdAt": "2024-03-01T10:00:00.000Z",
                    "updatedAt": "2024-03-02T11:30:00.000Z",
                    "archived": false
                }
            ],
            "paging": {
                "next": {
                    "after": "52",
                    "link": "https://api.hubapi.com/crm/v3/objects/contacts?after=52"
                }
            }
        }))
        .unwrap();

        assert_eq!(page.results.len(), 1);
        let contact = &page.results[0];
        assert_eq!(contact.property("firstname"), Some("Ada"));
        assert_eq!(contact.property("lastname"), None);
        assert_eq!(contact.property("email"), None);
        assert!(contact.created_at.is_some());
        assert_eq!(page.next_after(), Some("52"));
    }

    #[test]
    fn test_crm_page_without_paging() {
        let page: CrmObjectPage = serde_json::from_value(json!({"results": []})).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.next_after(), None);
    }

    #[test]
    fn test_object_kind_naming() {
        assert_eq!(CrmObjectKind::Contacts.item_id("7"), "contact_7");
        assert_eq!(CrmObjectKind::Companies.item_id("7"), "company_7");
        assert_eq!(CrmObjectKind::Deals.item_id("7"), "deal_7");
        assert_eq!(CrmObjectKind::Deals.list_type(), "DealList");
        assert_eq!(
            CrmObjectKind::ALL.map(|k| k.path()),
            ["contacts", "companies", "deals"]
        );
    }
}
