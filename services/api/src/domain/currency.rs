//! Currency selection and display formatting.
//!
//! Country matching is substring-based and ordered, matching what the
//! mobile clients were built against; `billing_currency`, `display_currency`
//! and `price_symbol` intentionally use three slightly different rule sets.

/// Currencies the payment processor accepts from this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Inr,
    Gbp,
    Usd,
    Eur,
    Aud,
    Cad,
}

/// All currencies accepted by `/create-payment-intent`.
pub const SUPPORTED_CURRENCIES: [Currency; 6] = [
    Currency::Inr,
    Currency::Gbp,
    Currency::Usd,
    Currency::Eur,
    Currency::Aud,
    Currency::Cad,
];

impl Currency {
    /// Lowercase ISO code, as sent to the processor.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "inr",
            Self::Gbp => "gbp",
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Aud => "aud",
            Self::Cad => "cad",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Gbp => "£",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Aud => "A$",
            Self::Cad => "C$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inr => "Indian Rupee",
            Self::Gbp => "British Pound",
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Aud => "Australian Dollar",
            Self::Cad => "Canadian Dollar",
        }
    }

    pub fn country(&self) -> &'static str {
        match self {
            Self::Inr => "India",
            Self::Gbp => "United Kingdom",
            Self::Usd => "United States",
            Self::Eur => "European Union",
            Self::Aud => "Australia",
            Self::Cad => "Canada",
        }
    }

    /// Processor-enforced minimum charge in minor units, where we check one.
    pub fn minimum_minor(&self) -> Option<i64> {
        match self {
            Self::Inr => Some(50),
            Self::Gbp => Some(30),
            Self::Usd => Some(50),
            _ => None,
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "inr" => Some(Self::Inr),
            "gbp" => Some(Self::Gbp),
            "usd" => Some(Self::Usd),
            "eur" => Some(Self::Eur),
            "aud" => Some(Self::Aud),
            "cad" => Some(Self::Cad),
            _ => None,
        }
    }
}

/// Currency override applied by `/create-payment-intent` when a country is
/// given. Only the three launch markets force a currency.
pub fn billing_currency(country: &str) -> Option<Currency> {
    let country = country.to_lowercase();
    if country.contains("india") {
        Some(Currency::Inr)
    } else if country.contains("uk") || country.contains("united kingdom") {
        Some(Currency::Gbp)
    } else if country.contains("us") || country.contains("usa") || country.contains("united states")
    {
        Some(Currency::Usd)
    } else {
        None
    }
}

/// Country-to-currency mapping for `/get-currency`. Falls back to USD.
pub fn display_currency(country: &str) -> Currency {
    let country = country.to_lowercase();
    if country.contains("india") {
        Currency::Inr
    } else if country.contains("uk") || country.contains("united kingdom") || country.contains("britain")
    {
        Currency::Gbp
    } else if country.contains("us") || country.contains("usa") || country.contains("united states")
    {
        Currency::Usd
    } else if country.contains("euro") || country.contains("eu") {
        Currency::Eur
    } else {
        Currency::Usd
    }
}

/// Currency symbol shown next to a booking price. Exact-match on the
/// country name, unlike the substring rules above.
pub fn price_symbol(country: Option<&str>) -> &'static str {
    let Some(country) = country else {
        return "$";
    };
    match country.to_lowercase().as_str() {
        "india" => "₹",
        "united kingdom" | "uk" | "great britain" => "£",
        _ => "$",
    }
}

/// Format a major-unit amount with its currency symbol. INR amounts use the
/// Indian digit-grouping system.
pub fn format_currency(amount: f64, code: &str) -> String {
    let symbol = Currency::parse(code).map(|c| c.symbol()).unwrap_or("$");
    let formatted = format!("{amount:.2}");
    if code.eq_ignore_ascii_case("inr") {
        return format!("₹ {}", format_indian_number(&formatted));
    }
    format!("{symbol}{formatted}")
}

/// Apply Indian digit grouping to a plain decimal string: the last three
/// integer digits stand alone, the rest group in pairs ("12,34,567.89").
pub fn format_indian_number(num: &str) -> String {
    let (integer_part, decimal_part) = match num.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (num, None),
    };

    let grouped = if integer_part.len() > 3 {
        let (head, last_three) = integer_part.split_at(integer_part.len() - 3);
        let mut pairs = Vec::new();
        let chars: Vec<char> = head.chars().collect();
        let mut end = chars.len();
        while end > 2 {
            pairs.push(chars[end - 2..end].iter().collect::<String>());
            end -= 2;
        }
        pairs.push(chars[..end].iter().collect());
        pairs.reverse();
        format!("{},{}", pairs.join(","), last_three)
    } else {
        integer_part.to_owned()
    };

    match decimal_part {
        Some(d) => format!("{grouped}.{d}"),
        None => grouped,
    }
}
