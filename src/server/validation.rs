use super::dto::ContactRequest;

const MIN_MESSAGE_LEN: usize = 10;

/// Minimal `local@domain.tld` shape check, matching what the public contact
/// form enforces client-side.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) || local.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !domain.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Validates a contact submission. Errors are collected and joined into a
/// single human-readable message.
pub fn validate_contact(req: &ContactRequest) -> Result<(), String> {
    let mut errors: Vec<&str> = Vec::new();

    let name = req.name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        errors.push("Ime je obavezno");
    }

    let email = req.email.as_deref().unwrap_or("").trim();
    if email.is_empty() {
        errors.push("Email je obavezan");
    } else if !is_valid_email(email) {
        errors.push("Email nije ispravan");
    }

    let message = req.message.as_deref().unwrap_or("").trim();
    if message.is_empty() {
        errors.push("Poruka je obavezna");
    } else if message.chars().count() < MIN_MESSAGE_LEN {
        errors.push("Poruka mora imati najmanje 10 znakova");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join(", "))
    }
}
