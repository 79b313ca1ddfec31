// src/view.rs
use crate::controller::{PortfolioBrowser, StockInfo, UserForm, UserListItem};
use crate::error::AppError;
use askama::Template;

struct PortfolioRow {
    symbol: String,
    owned: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate<'a> {
    users: Vec<UserListItem>,
    form: &'a UserForm,
    portfolio: Vec<PortfolioRow>,
    stock: &'a StockInfo,
}

/// Formats a share count the way the page's script prints numbers:
/// no negative zero, and exponent notation outside `[1e-6, 1e21)`.
fn display_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }
    n.to_string()
}

/// Renders the whole page from the browser's current state.
pub fn render_page(browser: &PortfolioBrowser) -> Result<String, AppError> {
    let page = PageTemplate {
        users: browser.user_list(),
        form: browser.form(),
        portfolio: browser
            .portfolio()
            .iter()
            .map(|holding| PortfolioRow {
                symbol: holding.symbol.clone(),
                owned: display_number(holding.owned),
            })
            .collect(),
        stock: browser.stock_info(),
    };
    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_users;
    use crate::models::Stock;

    fn browser() -> PortfolioBrowser {
        let users = parse_users(
            r#"[
                {"id":1,"user":{"firstname":"Ann","lastname":"O'Hara","address":"1 Elm","city":"Calgary","email":"ann@example.com"},
                 "portfolio":[{"symbol":"AAPL","owned":10},{"symbol":"T&T","owned":2.5}]},
                {"id":2,"user":{"firstname":"Bo","lastname":"Chen","address":"2 Oak","city":"Regina","email":"bo@example.com"},"portfolio":[]}
            ]"#,
        )
        .unwrap();
        let stocks = vec![Stock {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            sector: "Information Technology".to_string(),
            sub_industry: "Technology Hardware".to_string(),
            address: "Cupertino, California".to_string(),
        }];
        PortfolioBrowser::new(users, stocks)
    }

    #[test]
    fn initial_page_lists_users_with_empty_panels() {
        let html = render_page(&browser()).unwrap();
        assert!(html.contains("class=\"user-list\""));
        assert!(html.contains("Chen, Bo"));
        assert!(html.contains("id=\"userID\" name=\"userID\" value=\"\""));
        assert!(html.contains("<dd id=\"stockName\"></dd>"));
        assert!(html.contains("id=\"logo\" src=\"\""));
        assert!(!html.contains(">View</button>"));
    }

    #[test]
    fn selected_user_shows_form_and_portfolio() {
        let mut b = browser();
        b.select_user("1");
        let html = render_page(&b).unwrap();

        assert!(html.contains("id=\"firstname\" name=\"firstname\" value=\"Ann\""));
        assert!(html.contains("<p>AAPL</p>"));
        assert!(html.contains("<p>10</p>"));
        assert!(html.contains("<p>2.5</p>"));
        assert_eq!(html.matches(">View</button>").count(), 2);
    }

    #[test]
    fn share_counts_print_like_script_numbers() {
        assert_eq!(display_number(10.0), "10");
        assert_eq!(display_number(2.5), "2.5");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(1.5e22), "1.5e+22");
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(1e-7), "1e-7");
    }

    #[test]
    fn view_buttons_submit_the_edit_form() {
        let mut b = browser();
        b.select_user("1");
        let html = render_page(&b).unwrap();
        assert!(html.contains("<form class=\"user-form\" id=\"userForm\""));
        assert!(html.contains(
            "form=\"userForm\" formaction=\"/stocks/view\" name=\"symbol\" value=\"AAPL\""
        ));
    }

    #[test]
    fn text_is_escaped() {
        let mut b = browser();
        b.select_user("1");
        let html = render_page(&b).unwrap();
        assert!(!html.contains("O'Hara"));
        assert!(!html.contains("<p>T&T</p>"));
    }

    #[test]
    fn stock_panel_shows_details_and_logo() {
        let mut b = browser();
        b.show_stock_details("AAPL");
        let html = render_page(&b).unwrap();
        assert!(html.contains("<dd id=\"stockName\">Apple Inc.</dd>"));
        assert!(html.contains("<dd id=\"stockIndustry\">Technology Hardware</dd>"));
        assert!(html.contains("src=\"logos/AAPL.svg\""));
    }
}
