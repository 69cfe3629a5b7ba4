use crate::error::Error;
use crate::models::Account;
use crate::store::{self, Store};

pub fn create_account(store: &dyn Store, name: &str) -> Result<Account, Error> {
    let account = Account::new(name.to_string());
    store::create(store, &account)?;
    Ok(account)
}

pub fn rename_account(store: &dyn Store, uuid: &str, name: &str) -> Result<Account, Error> {
    let updated = store::update(store, uuid, |account: &mut Account| {
        account.name = name.to_string();
    })?;
    Ok(updated)
}

pub fn all_accounts(store: &dyn Store) -> Result<Vec<Account>, Error> {
    Ok(store::get_all(store)?)
}
