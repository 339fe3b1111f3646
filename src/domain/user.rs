#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub disabled: bool,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub disabled: Option<bool>,
    pub contact_number: Option<String>,
    pub permanent_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub contact_number_2: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.disabled.is_none()
            && self.contact_number.is_none()
            && self.permanent_address.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.contact_number_2.is_none()
    }
}

/// Identity established by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
}

/// Post-commit greeting for a newly created profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeNotice {
    pub to_email: String,
    pub to_name: String,
}

impl WelcomeNotice {
    pub fn for_user(user: &User) -> Self {
        let name = user.name.trim();
        WelcomeNotice {
            to_email: user.email.clone(),
            to_name: if name.is_empty() {
                "there".to_string()
            } else {
                name.to_string()
            },
        }
    }
}
