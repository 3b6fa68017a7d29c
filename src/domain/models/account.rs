use crate::domain::error::DomainError;

pub type ProfilePicture = String;

/// Store-assigned account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(i32);

impl AccountId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Registration input that passed the presence checks, minus the password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    full_name: String,
    email: String,
    phone: String,
    profile_picture: ProfilePicture,
}

impl NewAccount {
    pub fn new(
        full_name: String,
        email: String,
        phone: String,
        profile_picture: ProfilePicture,
    ) -> Result<Self, DomainError> {
        for (name, value) in [
            ("full_name", &full_name),
            ("email", &email),
            ("phone", &phone),
            ("profile_picture", &profile_picture),
        ] {
            if value.is_empty() {
                return Err(DomainError::EmptyField(name));
            }
        }

        Ok(Self {
            full_name,
            email,
            phone,
            profile_picture,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn profile_picture(&self) -> &str {
        &self.profile_picture
    }
}

/// Account joined with its profile. Carries no credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    full_name: String,
    email: String,
    phone: String,
    profile_picture: Option<ProfilePicture>,
}

impl Account {
    pub fn new(
        id: AccountId,
        full_name: String,
        email: String,
        phone: String,
        profile_picture: Option<ProfilePicture>,
    ) -> Self {
        Self {
            id,
            full_name,
            email,
            phone,
            profile_picture,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }
}
