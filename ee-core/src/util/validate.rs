use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{2,31}$").expect("valid username regex");
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.len() <= 200
}

pub fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(is_valid_username("maria"));
        assert!(is_valid_username("jo.ao_23"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username(".maria"));
        assert!(!is_valid_username("maria lopes"));
        assert!(!is_valid_username(&"x".repeat(33)));
    }

    #[test]
    fn title_rules() {
        assert!(is_valid_title("Where to buy tempeh?"));
        assert!(!is_valid_title("   "));
        assert!(!is_valid_title(&"x".repeat(201)));
    }
}
