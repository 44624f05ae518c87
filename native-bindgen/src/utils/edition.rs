/// Rust edition of the crate the generated code is compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RustEdition {
    /// Rust 2021 edition: plain `extern "C"` blocks
    Edition2021,
    /// Rust 2024 edition: `unsafe extern "C"` blocks
    Edition2024,
}

impl RustEdition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RustEdition::Edition2021 => "2021",
            RustEdition::Edition2024 => "2024",
        }
    }
}

impl std::fmt::Display for RustEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RustEdition {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2021" => Ok(RustEdition::Edition2021),
            "2024" => Ok(RustEdition::Edition2024),
            other => Err(crate::Error::InvalidConfig(format!(
                "unsupported edition `{other}`, expected 2021 or 2024"
            ))),
        }
    }
}

impl Default for RustEdition {
    /// `unsafe extern` blocks are accepted from Rust 1.82 on
    fn default() -> Self {
        if_rust_version::if_rust_version! { >= 1.82 {
            RustEdition::Edition2024
        } else {
            RustEdition::Edition2021
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edition() {
        assert_eq!("2021".parse::<RustEdition>().unwrap(), RustEdition::Edition2021);
        assert_eq!("2024".parse::<RustEdition>().unwrap(), RustEdition::Edition2024);
        assert!(matches!(
            "2018".parse::<RustEdition>(),
            Err(crate::Error::InvalidConfig(_))
        ));
        assert_eq!(RustEdition::Edition2024.to_string(), "2024");
    }
}
