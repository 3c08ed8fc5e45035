use crate::CURRENCY;

/// Format an amount the way the menus show prices, rounded to whole rupees
pub fn format_amount(amount: f64) -> String {
    format!("{} {:.0}", CURRENCY, amount)
}
