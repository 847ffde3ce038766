#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Address {
    pub street  : Option<String>,
    pub city    : String,
    pub region  : Option<String>,
    pub country : String,
}

impl Address {
    /// Formats the address as a single line, skipping empty parts.
    pub fn single_line(&self) -> String {
        let Self {
            street,
            city,
            region,
            country,
        } = self;
        [
            street.as_deref(),
            Some(city.as_str()),
            region.as_deref(),
            Some(country.as_str()),
        ]
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_single_line() {
        let addr = Address {
            street: Some("Rua Augusta 12".into()),
            city: "Lisboa".into(),
            region: None,
            country: "Portugal".into(),
        };
        assert_eq!("Rua Augusta 12, Lisboa, Portugal", addr.single_line());
    }

    #[test]
    fn skip_empty_parts() {
        let addr = Address {
            street: Some("  ".into()),
            city: "Porto".into(),
            region: Some("Norte".into()),
            country: "Portugal".into(),
        };
        assert_eq!("Porto, Norte, Portugal", addr.single_line());
    }
}
