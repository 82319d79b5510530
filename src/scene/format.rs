//! Label text for callouts, tooltips and axis ticks.

/// Unit suffix for energy quantities.
pub const ENERGY_UNIT: &str = "PJ";

/// Round to an integer and group thousands with commas: `170,000`.
pub fn thousands(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"2020: 170,000 PJ"`
pub fn energy_label(year: i32, value: f64) -> String {
    format!("{year}: {} {ENERGY_UNIT}", thousands(value))
}

/// `"2016: 10.2%"`
pub fn share_label(year: i32, share: f64) -> String {
    format!("{year}: {share:.1}%")
}

/// How axis tick values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    Year,
    Thousands,
    Percent,
}

impl TickFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            TickFormat::Year => format!("{}", value.round() as i64),
            TickFormat::Thousands => thousands(value),
            TickFormat::Percent => format!("{value:.0}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(43360.0), "43,360");
        assert_eq!(thousands(170000.0), "170,000");
        assert_eq!(thousands(1234567.8), "1,234,568");
        assert_eq!(thousands(-1500.0), "-1,500");
        assert_eq!(thousands(-0.3), "0");
    }

    #[test]
    fn callout_labels() {
        assert_eq!(energy_label(2020, 170000.0), "2020: 170,000 PJ");
        assert_eq!(share_label(2016, 10.24), "2016: 10.2%");
    }

    #[test]
    fn tick_formats() {
        assert_eq!(TickFormat::Year.format(1970.0), "1970");
        assert_eq!(TickFormat::Thousands.format(50000.0), "50,000");
        assert_eq!(TickFormat::Percent.format(40.0), "40%");
    }
}
