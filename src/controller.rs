// src/controller.rs
//! In-memory state behind the page: the two collections plus whatever is
//! currently shown in the edit form, the portfolio list and the stock panel.
//!
//! Lookups that find nothing leave everything as it was. Each action reports
//! whether it matched so the caller can log it.

use crate::models::{Holding, Stock, User};
use log::{debug, info};
use serde::Deserialize;

/// Values of the edit form, named after the page's input ids.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserForm {
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub email: String,
}

/// Text of the stock detail panel. All fields are empty when cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockInfo {
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub address: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserListItem {
    pub id: String,
    pub label: String,
}

pub fn logo_path(symbol: &str) -> String {
    format!("logos/{}.svg", symbol)
}

#[derive(Debug, Default)]
pub struct PortfolioBrowser {
    users: Vec<User>,
    stocks: Vec<Stock>,
    form: UserForm,
    portfolio: Vec<Holding>,
    stock_info: StockInfo,
}

impl PortfolioBrowser {
    pub fn new(users: Vec<User>, stocks: Vec<Stock>) -> Self {
        Self {
            users,
            stocks,
            ..Self::default()
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    /// Portfolio entries currently displayed.
    pub fn portfolio(&self) -> &[Holding] {
        &self.portfolio
    }

    pub fn stock_info(&self) -> &StockInfo {
        &self.stock_info
    }

    pub fn user_list(&self) -> Vec<UserListItem> {
        self.users
            .iter()
            .map(|user| UserListItem {
                id: user.id.to_string(),
                label: user.list_label(),
            })
            .collect()
    }

    pub fn select_user(&mut self, user_id: &str) -> bool {
        let Some(user) = self.users.iter().find(|u| u.id.matches(user_id)).cloned() else {
            debug!("No user matches id {:?}", user_id);
            return false;
        };

        self.clear_stock_info();
        self.fill_user_details(&user);
        self.display_portfolio(&user);
        true
    }

    /// Removes the first user matching the form's id, then clears the form
    /// and stock panel. The displayed portfolio entries stay on screen.
    pub fn delete_user(&mut self, form: UserForm) -> bool {
        self.form = form;
        let Some(index) = self
            .users
            .iter()
            .position(|u| u.id.matches(&self.form.user_id))
        else {
            debug!("Delete ignored, no user matches id {:?}", self.form.user_id);
            return false;
        };

        let removed = self.users.remove(index);
        info!("Deleted user {} ({})", removed.id, removed.list_label());
        self.clear_user_details();
        self.clear_stock_info();
        true
    }

    /// Overwrites the five contact fields of the first user matching the
    /// form's id. The portfolio is never touched.
    pub fn save_user(&mut self, form: UserForm) -> bool {
        self.form = form;
        let Some(user) = self
            .users
            .iter_mut()
            .find(|u| u.id.matches(&self.form.user_id))
        else {
            debug!("Save ignored, no user matches id {:?}", self.form.user_id);
            return false;
        };

        let contact = &mut user.contact;
        contact.firstname.clone_from(&self.form.firstname);
        contact.lastname.clone_from(&self.form.lastname);
        contact.address.clone_from(&self.form.address);
        contact.city.clone_from(&self.form.city);
        contact.email.clone_from(&self.form.email);
        info!("Saved user {}", user.id);
        true
    }

    pub fn show_stock_details(&mut self, symbol: &str) -> bool {
        let Some(stock) = self.stocks.iter().find(|s| s.symbol == symbol) else {
            debug!("No stock record for symbol {:?}", symbol);
            return false;
        };

        self.stock_info = StockInfo {
            name: stock.name.clone(),
            sector: stock.sector.clone(),
            industry: stock.sub_industry.clone(),
            address: stock.address.clone(),
            logo: logo_path(symbol),
        };
        true
    }

    /// Keeps values typed into the edit form on screen without applying
    /// them to any user.
    pub fn keep_form(&mut self, form: UserForm) {
        self.form = form;
    }

    pub fn clear_user_details(&mut self) {
        self.form = UserForm::default();
    }

    pub fn clear_stock_info(&mut self) {
        self.stock_info = StockInfo::default();
    }

    fn fill_user_details(&mut self, user: &User) {
        let contact = &user.contact;
        self.form = UserForm {
            user_id: user.id.to_string(),
            firstname: contact.firstname.clone(),
            lastname: contact.lastname.clone(),
            address: contact.address.clone(),
            city: contact.city.clone(),
            email: contact.email.clone(),
        };
    }

    fn display_portfolio(&mut self, user: &User) {
        self.portfolio = user.portfolio.clone();
    }
}
