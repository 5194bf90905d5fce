use serde::{Deserialize, Serialize};

use bookstall_db::SellerRecord;

use crate::modules::books::models::ReturnedBook;

/// Registration payload. The password is an opaque credential, hashed before
/// it ever reaches storage.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingSeller {
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_e_mail")]
    pub e_mail: String,
    pub password: String,
}

// Historical placeholder applied when registration omits an e_mail.
fn default_e_mail() -> String {
    "defolt@gmail.com".to_string()
}

/// Profile update payload: full-field replace of the mutable attributes.
/// Password is immutable post-creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfileBody {
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
}

/// Outbound seller representation. Never carries credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnedSeller {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
}

impl From<SellerRecord> for ReturnedSeller {
    fn from(record: SellerRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            e_mail: record.e_mail,
        }
    }
}

/// Self-lookup response: profile plus every owned book.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnedSellerDetail {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    pub books: Vec<ReturnedBook>,
}

/// List envelope: `{"sallers": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnedAllSellers {
    pub sallers: Vec<ReturnedSeller>,
}

/// `POST /saller/token` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn e_mail_defaults_when_omitted() {
        let seller: IncomingSeller = serde_json::from_value(json!({
            "first_name": "Ivan",
            "last_name": "Ivanov",
            "password": "pw"
        }))
        .unwrap();
        assert_eq!(seller.e_mail, "defolt@gmail.com");
    }

    #[test]
    fn returned_seller_drops_credentials() {
        let record = SellerRecord {
            id: 1,
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            e_mail: "ivan@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let returned = ReturnedSeller::from(record);
        let body = serde_json::to_string(&returned).unwrap();
        assert!(!body.contains("argon2id"));
        assert!(!body.contains("password"));
    }
}
