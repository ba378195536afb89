//! Gmail dot-variation generation.
//!
//! Gmail ignores dots in the local part, so `jo.hn@gmail.com` and
//! `john@gmail.com` reach the same inbox. Given a base address, the generator
//! enumerates dot placements over the gaps between local-part characters as
//! an ascending bitmask, keeps the valid ones, and stops once the cap is hit.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{errors::Error, Result};

pub const DEFAULT_TARGET_DOMAIN: &str = "gmail.com";
pub const DEFAULT_MAX_VARIATIONS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariationOptions {
    /// Domain appended to every candidate. The input address's own domain is
    /// ignored.
    pub target_domain: String,
    /// Enumeration stops once this many distinct candidates are collected.
    pub max_variations: usize,
}

impl Default for VariationOptions {
    fn default() -> Self {
        Self {
            target_domain: DEFAULT_TARGET_DOMAIN.to_string(),
            max_variations: DEFAULT_MAX_VARIATIONS,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VariationGenerator {
    opts: VariationOptions,
}

impl VariationGenerator {
    pub fn new(opts: VariationOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &VariationOptions {
        &self.opts
    }

    /// Generate the sorted dot-variations of `address`.
    ///
    /// Fails with [`Error::InvalidAddress`] unless the input has exactly one
    /// `@` and a non-empty local part. For local parts of 8+ characters the
    /// result may be truncated: it holds the first `max_variations` valid
    /// candidates in bitmask order, re-sorted lexicographically.
    pub fn generate(&self, address: &str) -> Result<Vec<String>> {
        let local = local_part(address)?;
        let set = self.collect(local);
        Ok(set.into_iter().collect())
    }

    fn collect(&self, local: &str) -> BTreeSet<String> {
        let cap = self.opts.max_variations;
        let mut out = BTreeSet::new();
        if cap == 0 {
            return out;
        }

        // Dots only get added, so a local part that is already malformed
        // poisons every candidate.
        if !is_valid_dotted(local) {
            debug!(local, "local part is malformed; no valid variations");
            return out;
        }

        // Byte offsets of the gaps between adjacent chars. A dot in a gap next
        // to an existing dot always produces `..`, so only the remaining gaps
        // are enumerated. Compressing the mask onto these gaps keeps the
        // ascending order of the valid full-width masks.
        let gaps: Vec<usize> = local
            .char_indices()
            .skip(1)
            .map(|(at, _)| at)
            .filter(|&at| !touches_dot(local, at))
            .collect();

        let total: Option<u64> = (gaps.len() < 64).then(|| 1u64 << gaps.len());

        let mut mask: u64 = 0;
        loop {
            let dotted = insert_dots(local, &gaps, mask);
            if is_valid_dotted(&dotted) {
                out.insert(format!("{dotted}@{}", self.opts.target_domain));
            }
            if out.len() >= cap {
                break;
            }

            mask = match mask.checked_add(1) {
                Some(next) if total.map_or(true, |t| next < t) => next,
                _ => break,
            };
        }

        debug!(
            local_chars = local.chars().count(),
            free_gaps = gaps.len(),
            produced = out.len(),
            truncated = total.map_or(true, |t| mask.saturating_add(1) < t),
            "generated dot variations"
        );

        out
    }
}

/// Generate variations with the default options (`@gmail.com`, cap 100).
pub fn generate_variations(address: &str) -> Result<Vec<String>> {
    VariationGenerator::default().generate(address)
}

fn local_part(address: &str) -> Result<&str> {
    let Some((local, rest)) = address.split_once('@') else {
        return Err(Error::invalid_address(address, "missing '@'"));
    };
    if rest.contains('@') {
        return Err(Error::invalid_address(address, "more than one '@'"));
    }
    if local.is_empty() {
        return Err(Error::invalid_address(address, "empty local part"));
    }
    Ok(local)
}

fn touches_dot(local: &str, at: usize) -> bool {
    local[..at].ends_with('.') || local[at..].starts_with('.')
}

fn insert_dots(local: &str, gaps: &[usize], mask: u64) -> String {
    let mut out = String::with_capacity(local.len() + gaps.len());
    let mut last = 0;
    for (bit, &at) in gaps.iter().enumerate() {
        if bit < 64 && mask & (1u64 << bit) != 0 {
            out.push_str(&local[last..at]);
            out.push('.');
            last = at;
        }
    }
    out.push_str(&local[last..]);
    out
}

fn is_valid_dotted(local: &str) -> bool {
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}
