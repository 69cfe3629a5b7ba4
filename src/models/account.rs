use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// An account is plain bookkeeping: a generated identity and a display name.
/// It shares the store mechanism with transactions and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub uuid: String,
    pub name: String,
}

impl Account {
    pub fn new(name: String) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name,
        }
    }
}

impl Entity for Account {
    const KIND: &'static str = "Account";

    fn key(&self) -> String {
        self.uuid.clone()
    }
}
