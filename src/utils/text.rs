//! Text formatting helpers

/// Capitalize the first letter of every word and lowercase the rest
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("category 1"), "Category 1");
        assert_eq!(title_case("GROUP  dance"), "Group Dance");
        assert_eq!(title_case(""), "");
    }
}
