pub fn format_brl(amount: f64) -> String {
    format!("R$ {:.2}", amount)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
