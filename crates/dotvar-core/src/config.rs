use std::{env, fs, path::Path};

use crate::{
    errors::Error,
    variations::{VariationOptions, DEFAULT_MAX_VARIATIONS, DEFAULT_TARGET_DOMAIN},
    Result,
};

/// Upper bound for `DOTVAR_MAX_VARIATIONS`.
pub const MAX_VARIATIONS_LIMIT: usize = 100_000;

/// Typed configuration, read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    // Generation
    pub target_domain: String,
    pub max_variations: usize,

    // Dispatch
    pub recognized_domains: Vec<String>,

    // Replies
    pub reply_char_limit: usize,
    pub csv_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_domain: DEFAULT_TARGET_DOMAIN.to_string(),
            max_variations: DEFAULT_MAX_VARIATIONS,
            recognized_domains: vec![DEFAULT_TARGET_DOMAIN.to_string()],
            reply_char_limit: 4000,
            csv_file_name: "gmail_variations.csv".to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment, after applying `.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).and_then(non_empty);

        let target_domain = match get("DOTVAR_TARGET_DOMAIN") {
            Some(d) => parse_domain("DOTVAR_TARGET_DOMAIN", &d)?,
            None => defaults.target_domain,
        };

        let max_variations = match get("DOTVAR_MAX_VARIATIONS") {
            Some(v) => parse_max_variations(&v)?,
            None => defaults.max_variations,
        };

        let recognized_domains = match get("DOTVAR_RECOGNIZED_DOMAINS") {
            Some(v) => parse_domain_list("DOTVAR_RECOGNIZED_DOMAINS", &v)?,
            None => defaults.recognized_domains,
        };

        let reply_char_limit = match get("DOTVAR_REPLY_LIMIT") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::Config(format!(
                        "DOTVAR_REPLY_LIMIT must be a positive integer, got {v:?}"
                    )))
                }
            },
            None => defaults.reply_char_limit,
        };

        let csv_file_name = get("DOTVAR_CSV_FILE_NAME")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.csv_file_name);

        Ok(Self {
            target_domain,
            max_variations,
            recognized_domains,
            reply_char_limit,
            csv_file_name,
        })
    }

    pub fn variation_options(&self) -> VariationOptions {
        VariationOptions {
            target_domain: self.target_domain.clone(),
            max_variations: self.max_variations,
        }
    }

    pub fn set_target_domain(&mut self, domain: &str) -> Result<()> {
        self.target_domain = parse_domain("--domain", domain)?;
        Ok(())
    }

    pub fn set_max_variations(&mut self, max: usize) -> Result<()> {
        self.max_variations = check_max_variations(max)?;
        Ok(())
    }
}

/// Normalize a domain setting: strip a leading `@`, lowercase, reject `@` inside.
pub fn parse_domain(key: &str, raw: &str) -> Result<String> {
    let d = raw.trim();
    let d = d.strip_prefix('@').unwrap_or(d).to_lowercase();
    if d.is_empty() || d.contains('@') || d.chars().any(char::is_whitespace) {
        return Err(Error::Config(format!("{key}: invalid domain {raw:?}")));
    }
    Ok(d)
}

fn parse_domain_list(key: &str, raw: &str) -> Result<Vec<String>> {
    let out = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| parse_domain(key, s))
        .collect::<Result<Vec<_>>>()?;
    if out.is_empty() {
        return Err(Error::Config(format!("{key}: no domains given")));
    }
    Ok(out)
}

fn parse_max_variations(raw: &str) -> Result<usize> {
    let n = raw.trim().parse::<usize>().map_err(|_| {
        Error::Config(format!(
            "DOTVAR_MAX_VARIATIONS must be a positive integer, got {raw:?}"
        ))
    })?;
    check_max_variations(n)
}

fn check_max_variations(n: usize) -> Result<usize> {
    if n == 0 || n > MAX_VARIATIONS_LIMIT {
        return Err(Error::Config(format!(
            "max variations must be within 1..={MAX_VARIATIONS_LIMIT}, got {n}"
        )));
    }
    Ok(n)
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.target_domain, "gmail.com");
        assert_eq!(cfg.max_variations, 100);
        assert_eq!(cfg.reply_char_limit, 4000);
        assert_eq!(cfg.recognized_domains, vec!["gmail.com"]);
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_pairs(&[
            ("DOTVAR_TARGET_DOMAIN", "@GoogleMail.com"),
            ("DOTVAR_MAX_VARIATIONS", " 250 "),
            ("DOTVAR_RECOGNIZED_DOMAINS", "gmail.com, googlemail.com,"),
            ("DOTVAR_REPLY_LIMIT", "1000"),
            ("DOTVAR_CSV_FILE_NAME", "out.csv"),
        ])
        .unwrap();
        assert_eq!(cfg.target_domain, "googlemail.com");
        assert_eq!(cfg.max_variations, 250);
        assert_eq!(cfg.recognized_domains, vec!["gmail.com", "googlemail.com"]);
        assert_eq!(cfg.reply_char_limit, 1000);
        assert_eq!(cfg.csv_file_name, "out.csv");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = from_pairs(&[("DOTVAR_TARGET_DOMAIN", "  ")]).unwrap();
        assert_eq!(cfg.target_domain, "gmail.com");
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            [("DOTVAR_MAX_VARIATIONS", "0")],
            [("DOTVAR_MAX_VARIATIONS", "lots")],
            [("DOTVAR_MAX_VARIATIONS", "100001")],
            [("DOTVAR_TARGET_DOMAIN", "a@b.com")],
            [("DOTVAR_RECOGNIZED_DOMAINS", ",,")],
            [("DOTVAR_REPLY_LIMIT", "0")],
        ] {
            let err = from_pairs(&pairs).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{pairs:?}: {err}");
        }
    }

    #[test]
    fn cli_overrides_are_validated() {
        let mut cfg = Config::default();
        cfg.set_target_domain("example.org").unwrap();
        cfg.set_max_variations(5).unwrap();
        assert_eq!(cfg.variation_options().target_domain, "example.org");
        assert_eq!(cfg.variation_options().max_variations, 5);
        assert!(cfg.set_max_variations(0).is_err());
        assert!(cfg.set_target_domain("").is_err());
    }
}
