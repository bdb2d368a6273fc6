use serde::{Deserialize, Serialize};

/// A registered client and its optional stored photo reference.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub photo_url: Option<String>,
}

/// A client about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub photo_url: Option<String>,
}

/// Client fields decoded from the multipart form, before validation.
#[derive(Debug, Clone, Default)]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
}

/// One rejected field with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ClientInput {
    /// Check field shapes, collecting a `field -> reason` pair for every
    /// invalid field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                reason: "name is required",
            });
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email",
                reason: "invalid email",
            });
        }
        if !is_digits(&self.cpf) || self.cpf.len() != 11 {
            errors.push(FieldError {
                field: "cpf",
                reason: "cpf must be 11 digits",
            });
        }
        if !is_digits(&self.phone) || !(10..=11).contains(&self.phone.len()) {
            errors.push(FieldError {
                field: "phone",
                reason: "phone must be 10 or 11 digits",
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ClientInput {
        ClientInput {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            cpf: "12345678901".to_string(),
            phone: "11999999999".to_string(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "ana", "ana@", "@x.com", "ana@x", "ana @x.com"] {
            let mut input = valid_input();
            input.email = email.to_string();
            let errors = input.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "email"), "{email}");
        }
    }

    #[test]
    fn rejects_bad_cpf() {
        for cpf in ["", "123", "123456789012", "1234567890a"] {
            let mut input = valid_input();
            input.cpf = cpf.to_string();
            let errors = input.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "cpf"), "{cpf}");
        }
    }

    #[test]
    fn accepts_ten_digit_phone() {
        let mut input = valid_input();
        input.phone = "1199999999".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn rejects_bad_phone() {
        for phone in ["", "119", "119999999999", "11-99999999"] {
            let mut input = valid_input();
            input.phone = phone.to_string();
            let errors = input.validate().unwrap_err();
            assert!(errors.iter().any(|e| e.field == "phone"), "{phone}");
        }
    }

    #[test]
    fn collects_every_invalid_field() {
        let input = ClientInput::default();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
