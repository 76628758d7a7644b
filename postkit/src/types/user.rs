use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl User {
    /// First letter of each whitespace-separated name part, upper-cased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Case-insensitive email comparison, ignoring surrounding whitespace.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Search backend user listing: `{"users":[...],"total":..}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUserList {
    pub users: Vec<SearchUser>,
}

/// A user as the search backend sends it: split name, avatar under `image`,
/// numeric coordinates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUser {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<SearchCompany>,
    #[serde(default)]
    pub address: Option<SearchAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCompany {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAddress {
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<SearchUser> for User {
    fn from(u: SearchUser) -> Self {
        let name = format!("{} {}", u.first_name.trim(), u.last_name.trim())
            .trim()
            .to_string();
        User {
            id: u.id,
            name,
            username: u.username,
            email: u.email,
            avatar: u.image,
            phone: u.phone,
            website: None,
            company: u.company.map(|c| Company {
                name: c.name,
                catch_phrase: c.title,
                bs: None,
            }),
            address: u.address.map(|a| Address {
                street: a.address.unwrap_or_default(),
                suite: None,
                city: a.city,
                zipcode: a.postal_code,
                geo: a.coordinates.map(|c| Geo {
                    lat: c.lat.to_string(),
                    lng: c.lng.to_string(),
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            id: 1,
            name: name.into(),
            username: "bret".into(),
            email: email.into(),
            avatar: None,
            phone: None,
            website: None,
            company: None,
            address: None,
        }
    }

    #[test]
    fn initials_take_first_letter_of_each_part() {
        assert_eq!(user("Leanne Graham", "x@y.z").initials(), "LG");
        assert_eq!(user("mrs. dennis schulist", "x@y.z").initials(), "MDS");
    }

    #[test]
    fn initials_of_blank_name_are_empty() {
        assert_eq!(user("   ", "x@y.z").initials(), "");
    }

    #[test]
    fn search_user_joins_name_and_keeps_avatar() {
        let raw = SearchUser {
            id: 5,
            first_name: "Emily".into(),
            last_name: "Johnson".into(),
            username: "emilys".into(),
            email: "emily.johnson@x.dummyjson.com".into(),
            image: Some("https://dummyjson.com/icon/emilys/128".into()),
            phone: None,
            company: None,
            address: Some(SearchAddress {
                address: None,
                city: "Phoenix".into(),
                postal_code: Some("29112".into()),
                coordinates: Some(Coordinates { lat: 1.5, lng: -2.25 }),
            }),
        };
        let user = User::from(raw);
        assert_eq!(user.name, "Emily Johnson");
        assert_eq!(user.initials(), "EJ");
        assert_eq!(user.avatar.as_deref(), Some("https://dummyjson.com/icon/emilys/128"));
        let address = user.address.unwrap();
        assert_eq!(address.street, "");
        assert_eq!(address.geo.unwrap().lng, "-2.25");
    }

    #[test]
    fn email_match_ignores_case_and_padding() {
        let u = user("Leanne Graham", "Sincere@april.biz");
        assert!(u.has_email("  sincere@APRIL.biz "));
        assert!(!u.has_email("sincere@april.com"));
    }
}
