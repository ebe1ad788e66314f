use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::item::models::ItemCounts;
use crate::domain::list::errors::BudgetError;
use crate::domain::list::errors::CurrencyError;
use crate::domain::list::errors::HexColorError;
use crate::domain::list::errors::ListIdError;
use crate::domain::list::errors::ListNameError;
use crate::domain::list::errors::ShareRoleError;
use crate::domain::user::models::UserId;

/// Shopping list aggregate root.
///
/// Item and done counts are never stored here; see [`ListWithCounts`].
#[derive(Debug, Clone)]
pub struct List {
    pub id: ListId,
    pub owner_id: UserId,
    pub name: ListName,
    pub store: String,
    pub color: HexColor,
    pub budget: Option<Budget>,
    pub currency: Currency,
    pub is_archived: bool,
    pub shared_with: Vec<ListShare>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A list together with its derived item counts.
#[derive(Debug, Clone)]
pub struct ListWithCounts {
    pub list: List,
    pub counts: ItemCounts,
}

/// List unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(pub Uuid);

impl ListId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a list ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ListIdError> {
        Uuid::parse_str(s)
            .map(ListId)
            .map_err(|e| ListIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// List name value object: trimmed, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListName(String);

impl ListName {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, ListNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(ListNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ListNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `#RRGGBB` color used for the list card in the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    const DEFAULT: &'static str = "#007aff";

    /// # Errors
    /// * `InvalidFormat` - Not `#` followed by exactly six hex digits
    pub fn new(color: String) -> Result<Self, HexColorError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if valid {
            Ok(Self(color))
        } else {
            Err(HexColorError::InvalidFormat(color))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Non-negative spending limit for a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget(f64);

impl Budget {
    /// # Errors
    /// * `NotFinite` - NaN or infinity
    /// * `Negative` - Less than zero
    pub fn new(amount: f64) -> Result<Self, BudgetError> {
        if !amount.is_finite() {
            Err(BudgetError::NotFinite)
        } else if amount < 0.0 {
            Err(BudgetError::Negative(amount))
        } else {
            Ok(Self(amount))
        }
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Jpy,
    Cny,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "JPY" => Ok(Currency::Jpy),
            "CNY" => Ok(Currency::Cny),
            other => Err(CurrencyError::Unsupported(other.to_string())),
        }
    }
}

/// Access level granted to another user through `sharedWith`.
///
/// Stored and returned, but not consulted by the authorization gate: only
/// the owner can read or modify a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShareRole {
    Editor,
    #[default]
    Viewer,
}

impl ShareRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareRole::Editor => "editor",
            ShareRole::Viewer => "viewer",
        }
    }
}

impl FromStr for ShareRole {
    type Err = ShareRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" => Ok(ShareRole::Editor),
            "viewer" => Ok(ShareRole::Viewer),
            other => Err(ShareRoleError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListShare {
    pub user_id: UserId,
    pub role: ShareRole,
}

/// Command to create a list with defaults already applied.
#[derive(Debug)]
pub struct CreateListCommand {
    pub name: ListName,
    pub store: String,
    pub color: HexColor,
    pub budget: Option<Budget>,
    pub currency: Currency,
}

/// Command to update an existing list.
///
/// All fields are optional to support partial updates.
#[derive(Debug, Default)]
pub struct UpdateListCommand {
    pub name: Option<ListName>,
    pub store: Option<String>,
    pub color: Option<HexColor>,
    pub is_archived: Option<bool>,
    pub budget: Option<Budget>,
    pub currency: Option<Currency>,
}

impl UpdateListCommand {
    /// Apply the provided fields to `list`, leaving the rest untouched.
    pub fn apply_to(self, list: &mut List) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(store) = self.store {
            list.store = store;
        }
        if let Some(color) = self.color {
            list.color = color;
        }
        if let Some(is_archived) = self.is_archived {
            list.is_archived = is_archived;
        }
        if let Some(budget) = self.budget {
            list.budget = Some(budget);
        }
        if let Some(currency) = self.currency {
            list.currency = currency;
        }
    }
}
