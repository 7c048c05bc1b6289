//! Rupee formatting and paise conversion.

/// Format a rupee amount with Indian digit grouping, e.g. `₹12,34,567.5`.
///
/// Up to three fraction digits are kept, trailing zeros dropped.
pub fn format_inr(amount: f64) -> String {
    let scaled = (amount.abs() * 1000.0).round() as u64;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let mut out = String::from("₹");
    if amount < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&group_indian(whole));

    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Last three digits form one group, the rest are grouped in pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Convert rupees to paise, rounding to the nearest paisa.
pub fn rupees_to_paise(rupees: f64) -> i64 {
    (rupees * 100.0).round() as i64
}

pub fn paise_to_rupees(paise: i64) -> f64 {
    paise as f64 / 100.0
}
